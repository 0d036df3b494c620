//! Plugins Command
//!
//! Usage:
//!   testweave plugins list

use crate::cli::CommandContext;
use crate::constants::plugins::LOCAL_PLUGIN_DIR;
use crate::plugins::PluginLoader;
use crate::types::Result;

/// List compiled-in plugins, local manifests, and the configured set
pub fn list(ctx: &CommandContext) -> Result<()> {
    let out = &ctx.output;
    let loader = PluginLoader::with_builtins(&ctx.project_root);
    let enabled = &ctx.config().plugins;

    out.section("Built-in plugins");
    for name in loader.package_names() {
        let marker = if enabled.iter().any(|p| p == name) {
            "enabled"
        } else {
            "available"
        };
        match loader.load(name) {
            Ok(plugin) => out.field(
                name,
                format!(
                    "{} {} ({})",
                    plugin.metadata().version,
                    plugin.metadata().description,
                    marker
                ),
            ),
            Err(e) => out.error(&e.to_string()),
        }
    }

    let local_dir = ctx.project_root.join(LOCAL_PLUGIN_DIR);
    if local_dir.is_dir() {
        let mut ids: Vec<String> = std::fs::read_dir(&local_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(String::from))
            .collect();
        ids.sort();

        out.section("Local plugins");
        for id in ids {
            match loader.load(&id) {
                Ok(plugin) => {
                    let hooks: Vec<_> = plugin.hooks().iter().map(|h| h.to_string()).collect();
                    out.field(
                        &id,
                        format!("{} [{}]", plugin.metadata().version, hooks.join(", ")),
                    );
                }
                Err(e) => out.warning(&format!("{}: {}", id, e)),
            }
        }
    }

    out.section("Configured");
    if enabled.is_empty() {
        out.bullet("none");
    }
    for id in enabled {
        match loader.load(id) {
            Ok(_) => out.success(id),
            Err(e) => out.error(&e.to_string()),
        }
    }
    Ok(())
}
