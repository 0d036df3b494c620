//! Config Command
//!
//! Inspect the effective configuration.
//!
//! Usage:
//!   testweave config show [--format text|json]
//!   testweave config path

use crate::cli::CommandContext;
use crate::config::ConfigSource;
use crate::types::Result;

/// Show the effective configuration and where it came from
pub fn show(ctx: &CommandContext, format: &str) -> Result<()> {
    let loaded = &ctx.loaded;

    if format == "json" {
        ctx.output.raw(&serde_json::to_string_pretty(loaded)?);
        return Ok(());
    }

    let out = &ctx.output;
    let config = &loaded.config;
    let generation = config.generation_or_default();

    out.section("Configuration");
    out.field("Source", loaded.source);
    if let Some(path) = &loaded.path {
        out.field("Path", path.display());
    }
    out.field("Version", &config.version);
    out.field("Framework", config.framework);
    out.field("Test dir", &config.test_dir);
    out.field("Test pattern", &config.test_pattern);
    out.field(
        "Plugins",
        if config.plugins.is_empty() {
            "none".to_string()
        } else {
            config.plugins.join(", ")
        },
    );
    out.field("Colocate", generation.colocate);
    out.field("Naming", generation.naming);
    Ok(())
}

/// Show the configuration file in effect, or where `init` would write one
pub fn path(ctx: &CommandContext) -> Result<()> {
    match (&ctx.loaded.source, &ctx.loaded.path) {
        (ConfigSource::Default, _) | (_, None) => {
            ctx.output.info("No configuration file found, using defaults");
            ctx.output
                .field("init writes", ctx.config_target().display());
        }
        (_, Some(path)) => ctx.output.raw(&path.display().to_string()),
    }
    Ok(())
}
