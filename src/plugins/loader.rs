//! Plugin resolution
//!
//! A plugin id is tried in three locations, first hit wins:
//! 1. a compiled-in package of that name
//! 2. `<root>/.testweave/plugins/<id>.json`
//! 3. `<root>/<id>` (a manifest file, or a directory holding `plugin.json`)

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{ManifestPlugin, Plugin, PluginRegistry, builtin_factories};
use crate::constants::plugins::LOCAL_PLUGIN_DIR;
use crate::types::{Result, ScaffoldError};

/// Constructor for a compiled-in plugin
pub type PluginFactory = Arc<dyn Fn() -> Arc<dyn Plugin> + Send + Sync>;

const DIRECTORY_MANIFEST: &str = "plugin.json";

pub struct PluginLoader {
    root: PathBuf,
    factories: BTreeMap<String, PluginFactory>,
}

impl PluginLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            factories: BTreeMap::new(),
        }
    }

    /// Loader with every compiled-in plugin registered
    pub fn with_builtins(root: impl Into<PathBuf>) -> Self {
        let mut loader = Self::new(root);
        for (name, factory) in builtin_factories() {
            loader.register_factory(name, factory);
        }
        loader
    }

    pub fn register_factory(&mut self, name: impl Into<String>, factory: PluginFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Resolve one plugin id
    pub fn load(&self, id: &str) -> Result<Arc<dyn Plugin>> {
        let mut attempted = Vec::new();
        let mut last_error = String::from("not found");

        attempted.push(format!("package:{}", id));
        if let Some(factory) = self.factories.get(id) {
            let plugin = factory();
            let failures = plugin.metadata().validate();
            if failures.is_empty() {
                debug!("Loaded plugin {} from package", id);
                return Ok(plugin);
            }
            last_error = failures.join("; ");
        }

        for path in self.manifest_candidates(id) {
            attempted.push(path.display().to_string());
            if !path.is_file() {
                continue;
            }
            match ManifestPlugin::from_file(&path) {
                Ok(plugin) => {
                    debug!("Loaded plugin {} from {}", id, path.display());
                    return Ok(Arc::new(plugin));
                }
                Err(e) => last_error = e,
            }
        }

        Err(ScaffoldError::Plugin {
            message: format!("Failed to load plugin {}: {}", id, last_error),
            plugin: Some(id.to_string()),
            attempted,
        })
    }

    /// Resolve every id into a registry, preserving order.
    ///
    /// A repeated id is loaded once. Distinct ids resolving to the same
    /// plugin name fail registration.
    pub fn load_all<S: AsRef<str>>(&self, ids: &[S]) -> Result<PluginRegistry> {
        let mut registry = PluginRegistry::new();
        let mut seen = BTreeSet::new();
        for id in ids {
            let id = id.as_ref();
            if !seen.insert(id) {
                warn!("Plugin {} listed twice, loading once", id);
                continue;
            }
            registry.register(self.load(id)?)?;
        }
        Ok(registry)
    }

    fn manifest_candidates(&self, id: &str) -> Vec<PathBuf> {
        let local = self.root.join(LOCAL_PLUGIN_DIR).join(format!("{}.json", id));
        let direct = self.root.join(id);
        let direct = if direct.is_dir() {
            direct.join(DIRECTORY_MANIFEST)
        } else {
            direct
        };
        vec![local, direct]
    }
}
