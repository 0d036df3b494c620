//! Built-in plugins
//!
//! Framework plugins write a minimal framework config on init when the
//! project has none. The TypeScript plugin checks for a tsconfig.

use async_trait::async_trait;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{Hook, Plugin, PluginContext, PluginMetadata};
use crate::constants::markers::{JEST_CONFIGS, MOCHA_CONFIGS, TSCONFIG, VITEST_CONFIGS};
use crate::constants::plugins::PREFIX;
use crate::fs::{WriteOptions, write_atomic};
use crate::types::{Framework, Result};

use super::loader::PluginFactory;

/// Plugin API version implemented by the compiled-in plugins
const BUILTIN_VERSION: &str = "1.0.0";

pub struct FrameworkPlugin {
    framework: Framework,
    metadata: PluginMetadata,
}

impl FrameworkPlugin {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            metadata: PluginMetadata::new(
                format!("{}{}", PREFIX, framework),
                BUILTIN_VERSION,
                format!("{} configuration and conventions", framework),
            ),
        }
    }

    fn config_candidates(&self) -> &'static [&'static str] {
        match self.framework {
            Framework::Vitest => VITEST_CONFIGS,
            Framework::Jest => JEST_CONFIGS,
            Framework::Mocha => MOCHA_CONFIGS,
            Framework::Unknown => &[],
        }
    }

    /// File name and content of the minimal config for this framework
    fn starter_config(&self, ctx: &PluginContext) -> Option<(&'static str, String)> {
        let typescript = ctx.project.as_ref().is_some_and(|p| p.typescript);
        let pattern = &ctx.config.test_pattern;
        match self.framework {
            Framework::Vitest => Some((
                if typescript {
                    "vitest.config.ts"
                } else {
                    "vitest.config.js"
                },
                format!(
                    "import {{ defineConfig }} from 'vitest/config';\n\nexport default defineConfig({{\n  test: {{\n    include: ['{}'],\n  }},\n}});\n",
                    pattern
                ),
            )),
            Framework::Jest => Some((
                "jest.config.js",
                format!(
                    "/** @type {{import('jest').Config}} */\nmodule.exports = {{\n  testMatch: ['**/{}'],\n}};\n",
                    pattern.trim_start_matches("**/")
                ),
            )),
            Framework::Mocha => Some((
                ".mocharc.json",
                format!("{{\n  \"spec\": [\"{}\"]\n}}\n", pattern),
            )),
            Framework::Unknown => None,
        }
    }
}

#[async_trait]
impl Plugin for FrameworkPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn hooks(&self) -> Vec<Hook> {
        vec![Hook::Init, Hook::Generate]
    }

    async fn on_init(&self, ctx: &PluginContext) -> Result<()> {
        let existing = self
            .config_candidates()
            .iter()
            .map(|name| ctx.project_root.join(name))
            .find(|path| path.exists());
        if let Some(path) = existing {
            debug!("{} config present: {}", self.framework, path.display());
            return Ok(());
        }

        let Some((name, content)) = self.starter_config(ctx) else {
            return Ok(());
        };
        let path = ctx.project_root.join(name);
        let options = WriteOptions::default().dry_run(ctx.dry_run);
        let result = write_atomic(&path, &content, &options)?;
        if result.written {
            info!("Created {}", path.display());
        }
        Ok(())
    }

    async fn on_generate(&self, ctx: &PluginContext) -> Result<()> {
        debug!(
            "{} plugin: {} test file(s) generated",
            self.framework,
            ctx.generated_files.len()
        );
        Ok(())
    }
}

pub struct TypeScriptPlugin {
    metadata: PluginMetadata,
}

impl TypeScriptPlugin {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                format!("{}typescript", PREFIX),
                BUILTIN_VERSION,
                "TypeScript test support",
            ),
        }
    }
}

impl Default for TypeScriptPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for TypeScriptPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn hooks(&self) -> Vec<Hook> {
        vec![Hook::Init, Hook::Generate]
    }

    async fn on_init(&self, ctx: &PluginContext) -> Result<()> {
        if !ctx.project_root.join(TSCONFIG).exists() {
            warn!("TypeScript plugin enabled but no {} found", TSCONFIG);
        }
        Ok(())
    }

    async fn on_generate(&self, ctx: &PluginContext) -> Result<()> {
        let plain_js = ctx
            .generated_files
            .iter()
            .filter(|p| p.extension().is_some_and(|e| e == "js" || e == "jsx"))
            .count();
        if plain_js > 0 {
            warn!("{} generated test(s) are plain JavaScript", plain_js);
        }
        Ok(())
    }
}

/// Factories for every compiled-in plugin, keyed by package name
pub fn builtin_factories() -> Vec<(String, PluginFactory)> {
    let mut factories: Vec<(String, PluginFactory)> = Framework::SUPPORTED
        .into_iter()
        .map(|framework| {
            let factory: PluginFactory = Arc::new(move || -> Arc<dyn Plugin> {
                Arc::new(FrameworkPlugin::new(framework))
            });
            (format!("{}{}", PREFIX, framework), factory)
        })
        .collect();

    let typescript: PluginFactory =
        Arc::new(|| -> Arc<dyn Plugin> { Arc::new(TypeScriptPlugin::new()) });
    factories.push((format!("{}typescript", PREFIX), typescript));
    factories
}
