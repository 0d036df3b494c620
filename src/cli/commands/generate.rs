//! Generate Command
//!
//! Render test files for the given sources. Directories are expanded to
//! the source files below them; existing tests are never sources.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CommandContext;
use crate::constants::markers::{SOURCE_EXTENSIONS, TEST_SUFFIXES};
use crate::detect::SourceScanner;
use crate::fs::{WriteOptions, write_atomic};
use crate::plugins::{Hook, PluginContext, PluginLoader};
use crate::templates::TestGenerator;
use crate::types::{Result, ScaffoldError};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub files: Vec<PathBuf>,
    pub template: Option<String>,
    pub dry_run: bool,
    pub force: bool,
}

pub async fn run(ctx: &CommandContext, options: GenerateOptions) -> Result<()> {
    let config = ctx.config();
    let sources = collect_sources(&ctx.project_root, &options.files)?;
    if sources.is_empty() {
        ctx.output.warning("No source files to generate tests for");
        return Ok(());
    }

    let generator = TestGenerator::new(&ctx.project_root, config).with_project_templates()?;
    let write_options = if options.force {
        WriteOptions::default().with_backup()
    } else {
        WriteOptions::default()
    }
    .dry_run(options.dry_run);

    let mut generated = Vec::new();
    let mut skipped = 0usize;
    for source in &sources {
        let planned = generator.plan(source, options.template.as_deref())?;
        let target = ctx.project_root.join(&planned.path);

        if target.exists() && !options.force {
            ctx.output.warning(&format!(
                "{} exists, skipping (use --force to overwrite)",
                planned.path.display()
            ));
            skipped += 1;
            continue;
        }

        write_atomic(&target, &planned.content, &write_options)?;
        if options.dry_run {
            ctx.output.info(&format!(
                "Would create {} ({})",
                planned.path.display(),
                planned.template
            ));
        } else {
            ctx.output
                .success(&format!("Created {}", planned.path.display()));
        }
        generated.push(planned.path);
    }

    let registry = PluginLoader::with_builtins(&ctx.project_root).load_all(&config.plugins)?;
    let hook_ctx = PluginContext::new(Hook::Generate, &ctx.project_root, config.clone())
        .with_generated_files(generated.clone())
        .dry_run(options.dry_run);
    registry.run_hook(Hook::Generate, &hook_ctx).await?;

    debug!("{} generated, {} skipped", generated.len(), skipped);
    if !options.dry_run {
        ctx.output
            .info(&format!("{} test file(s) generated", generated.len()));
    }
    Ok(())
}

/// Resolve inputs against the root and expand directories
fn collect_sources(root: &Path, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for input in inputs {
        let path = if input.is_absolute() {
            input.clone()
        } else {
            root.join(input)
        };

        if path.is_dir() {
            let found = SourceScanner::new(&path)
                .with_extensions(SOURCE_EXTENSIONS)
                .scan()?;
            sources.extend(found.into_iter().filter(|p| !is_test_file(p)));
        } else if path.is_file() {
            sources.push(path);
        } else {
            return Err(ScaffoldError::file_system(
                format!("Source not found: {}", input.display()),
                Some(&path),
            ));
        }
    }
    sources.sort();
    sources.dedup();
    Ok(sources)
}

fn is_test_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| TEST_SUFFIXES.iter().any(|suffix| stem.ends_with(suffix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_sources_expands_directories() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("lib")).unwrap();
        std::fs::write(src.join("a.ts"), "").unwrap();
        std::fs::write(src.join("a.test.ts"), "").unwrap();
        std::fs::write(src.join("lib/b.js"), "").unwrap();
        std::fs::write(src.join("notes.md"), "").unwrap();

        let sources = collect_sources(temp.path(), &[PathBuf::from("src")]).unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("src/a.ts"), PathBuf::from("src/lib/b.js")]
        );
    }

    #[test]
    fn test_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = collect_sources(temp.path(), &[PathBuf::from("nope.ts")]).unwrap_err();
        assert_eq!(err.kind(), crate::types::ErrorKind::FileSystem);
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file(Path::new("x/a.test.ts")));
        assert!(is_test_file(Path::new("a.spec.jsx")));
        assert!(!is_test_file(Path::new("src/testing.ts")));
    }
}
