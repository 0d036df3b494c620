//! Init Command
//!
//! Detect the project, confirm the choices, and write `.testweaverc.json`.

use inquire::{Confirm, Select};
use serde_json::json;
use tracing::{debug, info};

use crate::cli::CommandContext;
use crate::config::{ConfigSource, merge_config};
use crate::detect::{ProjectDetector, suggested_plugins};
use crate::fs::{WriteOptions, write_atomic};
use crate::plugins::{Hook, PluginContext, PluginLoader};
use crate::types::{Framework, Result, ScaffoldError};

use super::detect::print_report;

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub force: bool,
    /// Accept detected values without prompting
    pub yes: bool,
    pub framework: Option<Framework>,
    pub dry_run: bool,
}

pub async fn run(ctx: &CommandContext, options: InitOptions) -> Result<()> {
    let target = ctx.config_target();
    if target.exists() && !options.force && !options.dry_run {
        return Err(ScaffoldError::file_system(
            format!(
                "{} already exists. Use --force to overwrite.",
                target.display()
            ),
            Some(&target),
        ));
    }

    let report = ProjectDetector::new(&ctx.project_root)
        .generate_report()
        .await?;
    print_report(ctx, &report);

    let interactive = !options.yes && console::user_attended();
    if !options.yes && !interactive {
        debug!("stdout is not a terminal, accepting detected values");
    }

    let detected = report.project.framework;
    let framework = match options.framework {
        Some(framework) => framework,
        None if interactive => prompt_framework(detected)?,
        None if detected.is_known() => detected,
        None => ctx.config().framework,
    };

    let mut plugins = suggested_plugins(framework, report.project.typescript);
    if interactive && !plugins.is_empty() && !confirm_plugins(&plugins)? {
        plugins.clear();
    }

    let overrides = json!({
        "framework": framework.as_str(),
        "plugins": plugins,
    });
    // Re-running init refines an existing file rather than resetting it
    let base = match ctx.loaded.source {
        ConfigSource::Default => None,
        _ => Some(&ctx.loaded.config),
    };
    let config = merge_config(base, &overrides)?;

    let mut content = serde_json::to_string_pretty(&config)?;
    content.push('\n');

    let write_options = if options.force {
        WriteOptions::default().with_backup()
    } else {
        WriteOptions::default()
    }
    .dry_run(options.dry_run);
    let result = write_atomic(&target, &content, &write_options)?;

    let registry = PluginLoader::with_builtins(&ctx.project_root).load_all(&config.plugins)?;
    let hook_ctx = PluginContext::new(Hook::Init, &ctx.project_root, config)
        .with_project(report.project)
        .dry_run(options.dry_run);
    registry.run_hook(Hook::Init, &hook_ctx).await?;

    if options.dry_run {
        ctx.output
            .info(&format!("Dry run: would write {}", target.display()));
        ctx.output.raw(content.trim_end());
        return Ok(());
    }

    info!("Wrote {} bytes to {}", result.bytes, target.display());
    ctx.output.success(&format!(
        "Initialized {} ({} plugin(s))",
        ctx.display_path(&target),
        registry.len()
    ));
    if let Some(backup) = &result.backup_path {
        ctx.output
            .info(&format!("Previous config saved to {}", backup.display()));
    }
    Ok(())
}

fn prompt_framework(detected: Framework) -> Result<Framework> {
    let options = Framework::SUPPORTED.to_vec();
    let cursor = options.iter().position(|f| *f == detected).unwrap_or(0);
    Select::new("Test framework:", options)
        .with_starting_cursor(cursor)
        .prompt()
        .map_err(prompt_error)
}

fn confirm_plugins(plugins: &[String]) -> Result<bool> {
    Confirm::new(&format!("Enable plugins {}?", plugins.join(", ")))
        .with_default(true)
        .prompt()
        .map_err(prompt_error)
}

fn prompt_error(e: inquire::InquireError) -> ScaffoldError {
    ScaffoldError::config(format!("Initialization aborted: {}", e))
}
