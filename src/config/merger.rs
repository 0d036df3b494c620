//! Configuration Merger (Figment-based)
//!
//! Layers configuration with fixed precedence:
//! 1. Built-in defaults
//! 2. Discovered file configuration (full shallow overlay)
//! 3. Caller overrides (guarded field-by-field)
//!
//! Each layer is a `ConfigLayer` whose absent fields are skipped during
//! serialization, so a later layer never erases a value it does not carry.

use figment::{Figment, providers::Serialized};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::types::{ConfigV1, Naming, default_config};
use crate::types::{Framework, Result, ScaffoldError};

/// A partial configuration: only the fields a layer actually provides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colocate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming: Option<Naming>,
}

impl From<&ConfigV1> for ConfigLayer {
    fn from(config: &ConfigV1) -> Self {
        Self {
            version: Some(config.version.clone()),
            framework: Some(config.framework),
            test_dir: Some(config.test_dir.clone()),
            test_pattern: Some(config.test_pattern.clone()),
            plugins: Some(config.plugins.clone()),
            generation: config.generation.as_ref().map(|g| GenerationLayer {
                colocate: Some(g.colocate),
                naming: Some(g.naming),
            }),
        }
    }
}

impl ConfigLayer {
    /// Build an override layer from untyped caller input.
    ///
    /// A field is taken only when present with the expected shape; anything
    /// else is dropped without error. `version` is never overridable.
    pub fn from_overrides(value: &Value) -> Self {
        let mut layer = Self::default();
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                debug!("Ignoring non-object config overrides: {}", value);
            }
            return layer;
        };

        if let Some(v) = obj.get("framework") {
            match v.as_str().map(str::parse::<Framework>) {
                Some(Ok(framework)) => layer.framework = Some(framework),
                _ => debug!("Ignoring framework override: {}", v),
            }
        }

        if let Some(v) = obj.get("testDir") {
            layer.test_dir = non_empty_string(v);
            if layer.test_dir.is_none() {
                debug!("Ignoring testDir override: {}", v);
            }
        }

        if let Some(v) = obj.get("testPattern") {
            layer.test_pattern = non_empty_string(v);
            if layer.test_pattern.is_none() {
                debug!("Ignoring testPattern override: {}", v);
            }
        }

        if let Some(v) = obj.get("plugins") {
            let plugins = v.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()
            });
            if plugins.is_none() {
                debug!("Ignoring plugins override: {}", v);
            }
            layer.plugins = plugins;
        }

        if let Some(generation) = obj.get("generation").and_then(Value::as_object) {
            let colocate = generation.get("colocate").and_then(Value::as_bool);
            let naming = generation
                .get("naming")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Naming>().ok());
            if colocate.is_some() || naming.is_some() {
                layer.generation = Some(GenerationLayer { colocate, naming });
            }
        }

        layer
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

/// Overlay layers on top of the defaults, later layers winning per field
pub fn merge_layers(layers: &[ConfigLayer]) -> Result<ConfigV1> {
    let mut figment = Figment::new().merge(Serialized::defaults(default_config()));
    for layer in layers {
        figment = figment.merge(Serialized::defaults(layer));
    }

    let mut config: ConfigV1 = figment
        .extract()
        .map_err(|e| ScaffoldError::config(format!("Configuration merge failed: {}", e)))?;

    // The schema admits exactly one version
    config.version = default_config().version;
    Ok(config)
}

/// Three-way merge: defaults, then the file config, then caller overrides
pub fn merge_config(file: Option<&ConfigV1>, overrides: &Value) -> Result<ConfigV1> {
    let mut layers = Vec::with_capacity(2);
    if let Some(file) = file {
        layers.push(ConfigLayer::from(file));
    }
    layers.push(ConfigLayer::from_overrides(overrides));
    merge_layers(&layers)
}

// =============================================================================
// Tests
// =============================================================================
