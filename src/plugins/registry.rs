//! Plugin registry and hook dispatch

use std::sync::Arc;

use tracing::debug;

use super::{Hook, Plugin, PluginContext};
use crate::types::{Result, ScaffoldError};

/// Registered plugins in registration order
#[derive(Default, Clone)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin; names must be unique
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let name = &plugin.metadata().name;
        if self.get(name).is_some() {
            return Err(ScaffoldError::plugin(
                format!("Plugin '{}' is already registered", name),
                Some(name.as_str()),
            ));
        }
        debug!("Registered plugin {} {}", name, plugin.metadata().version);
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.iter().find(|p| p.metadata().name == name)
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run `hook` on every plugin in order; the first failure aborts
    pub async fn run_hook(&self, hook: Hook, ctx: &PluginContext) -> Result<()> {
        for plugin in &self.plugins {
            let name = &plugin.metadata().name;
            debug!("Dispatching {} to {}", hook, name);

            let result = match hook {
                Hook::Init => plugin.on_init(ctx).await,
                Hook::Generate => plugin.on_generate(ctx).await,
            };

            result.map_err(|e| match e {
                ScaffoldError::Plugin { .. } => e,
                other => ScaffoldError::plugin(
                    format!("Plugin '{}' failed in {}: {}", name, hook, other),
                    Some(name.as_str()),
                ),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::plugins::PluginMetadata;
    use crate::types::ErrorKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        metadata: PluginMetadata,
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Recorder {
        fn new(name: &str, calls: Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<dyn Plugin> {
            Arc::new(Self {
                metadata: PluginMetadata::new(name, "1.0.0", "records calls"),
                calls,
                fail,
            })
        }
    }

    #[async_trait]
    impl Plugin for Recorder {
        fn metadata(&self) -> &PluginMetadata {
            &self.metadata
        }

        async fn on_generate(&self, _ctx: &PluginContext) -> Result<()> {
            self.calls.lock().unwrap().push(self.metadata.name.clone());
            if self.fail {
                return Err(ScaffoldError::config("boom"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_duplicate_registration() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry.register(Recorder::new("a", calls.clone(), false)).unwrap();

        let err = registry.register(Recorder::new("a", calls, false)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Plugin);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_run_hook_in_order_and_stop_on_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry.register(Recorder::new("first", calls.clone(), false)).unwrap();
        registry.register(Recorder::new("second", calls.clone(), true)).unwrap();
        registry.register(Recorder::new("third", calls.clone(), false)).unwrap();

        let ctx = PluginContext::new(Hook::Generate, "/work", default_config());
        let err = registry.run_hook(Hook::Generate, &ctx).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Plugin);
        assert_eq!(err.details()["plugin"], "second");
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_default_hooks_are_noops() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = PluginRegistry::new();
        registry.register(Recorder::new("a", calls.clone(), true)).unwrap();

        let ctx = PluginContext::new(Hook::Init, "/work", default_config());
        registry.run_hook(Hook::Init, &ctx).await.unwrap();
        assert!(calls.lock().unwrap().is_empty());
    }
}
