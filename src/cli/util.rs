//! CLI Common Utilities
//!
//! Shared context for command handlers: the resolved project root and the
//! configuration loaded from it.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ui::Output;
use crate::config::{ConfigLoadResult, ConfigLoader, ConfigV1};
use crate::types::{Result, ScaffoldError};

/// Command execution context
pub struct CommandContext {
    /// Project root (`--cwd` or the current directory)
    pub project_root: PathBuf,
    /// Configuration as loaded, with its source
    pub loaded: ConfigLoadResult,
    pub output: Output,
}

impl CommandContext {
    /// Resolve the root and load its configuration
    pub fn load(cwd: Option<PathBuf>, quiet: bool) -> Result<Self> {
        let project_root = resolve_root(cwd)?;
        debug!("Project root: {}", project_root.display());
        let loaded = ConfigLoader::new(&project_root).load()?;

        Ok(Self {
            project_root,
            loaded,
            output: Output::new(quiet),
        })
    }

    /// Like `load`, but an unusable config falls back to defaults.
    ///
    /// Used by `init --force`, which replaces the file anyway.
    pub fn load_or_defaults(cwd: Option<PathBuf>, quiet: bool) -> Result<Self> {
        let project_root = resolve_root(cwd)?;
        let loaded = match ConfigLoader::new(&project_root).load() {
            Ok(loaded) => loaded,
            Err(e @ ScaffoldError::Config { .. }) => {
                warn!("Ignoring existing configuration: {}", e);
                ConfigLoadResult::defaults()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            project_root,
            loaded,
            output: Output::new(quiet),
        })
    }

    pub fn config(&self) -> &ConfigV1 {
        &self.loaded.config
    }

    /// Where `init` writes the project configuration
    pub fn config_target(&self) -> PathBuf {
        ConfigLoader::config_path_for(&self.project_root)
    }

    /// Path relative to the project root, for display
    pub fn display_path<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .to_string_lossy()
    }
}

fn resolve_root(cwd: Option<PathBuf>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let root = match cwd {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => current.join(dir),
        None => current,
    };

    if !root.is_dir() {
        return Err(ScaffoldError::file_system(
            format!("{} is not a directory", root.display()),
            Some(&root),
        ));
    }
    Ok(root.canonicalize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::TempDir;

    #[test]
    fn test_load_with_explicit_root() {
        let temp = TempDir::new().unwrap();
        let ctx = CommandContext::load(Some(temp.path().to_path_buf()), true).unwrap();
        assert_eq!(ctx.project_root, temp.path().canonicalize().unwrap());
        assert_eq!(ctx.loaded.source, ConfigSource::Default);
        assert!(ctx.config_target().ends_with(".testweaverc.json"));
    }

    #[test]
    fn test_load_or_defaults_tolerates_invalid_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".testweaverc.json"),
            r#"{"version": "2.0.0"}"#,
        )
        .unwrap();

        assert!(CommandContext::load(Some(temp.path().to_path_buf()), true).is_err());
        let ctx = CommandContext::load_or_defaults(Some(temp.path().to_path_buf()), true).unwrap();
        assert_eq!(ctx.loaded.source, ConfigSource::Default);
    }

    #[test]
    fn test_missing_root_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = CommandContext::load(Some(temp.path().join("absent")), true)
            .err()
            .unwrap();
        assert_eq!(err.kind(), crate::types::ErrorKind::FileSystem);
    }
}
