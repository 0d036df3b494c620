//! Plugin System
//!
//! Plugins implement the `Plugin` capability trait. Two kinds exist:
//! - **Built-in**: compiled in and registered by package name
//! - **Manifest**: a JSON manifest whose hooks run as subprocesses
//!
//! ## Modules
//!
//! - `builtin`: framework and TypeScript plugins shipped with the binary
//! - `manifest`: subprocess-backed plugins described by JSON
//! - `registry`: ordered registration and hook dispatch
//! - `loader`: three-location resolution with version validation

mod builtin;
mod loader;
mod manifest;
mod registry;

pub use builtin::{FrameworkPlugin, TypeScriptPlugin, builtin_factories};
pub use loader::{PluginFactory, PluginLoader};
pub use manifest::{ManifestHooks, ManifestPlugin, PluginManifest};
pub use registry::PluginRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigV1;
use crate::constants::plugins::API_MAJOR;
use crate::types::{ProjectInfo, Result};

// =============================================================================
// Plugin Contract
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl PluginMetadata {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            author: None,
        }
    }

    /// Structural and version checks; returns the failures found
    pub fn validate(&self) -> Vec<String> {
        let mut failures = Vec::new();
        if self.name.trim().is_empty() {
            failures.push("metadata.name must be a non-empty string".to_string());
        }
        if self.description.trim().is_empty() {
            failures.push("metadata.description must be a non-empty string".to_string());
        }
        if !is_compatible(&self.version) {
            failures.push(format!(
                "version {} is incompatible (requires {}.x)",
                self.version, API_MAJOR
            ));
        }
        failures
    }
}

/// Plugin API compatibility: major version 1
pub fn is_compatible(version: &str) -> bool {
    match semver::Version::parse(version) {
        Ok(v) => v.major == API_MAJOR,
        Err(_) => version.starts_with(&format!("{}.", API_MAJOR)),
    }
}

/// Lifecycle point at which plugins are invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hook {
    #[serde(rename = "onInit")]
    Init,
    #[serde(rename = "onGenerate")]
    Generate,
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hook::Init => write!(f, "onInit"),
            Hook::Generate => write!(f, "onGenerate"),
        }
    }
}

/// State handed to every hook
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginContext {
    pub hook: Hook,
    pub project_root: PathBuf,
    pub config: ConfigV1,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,
    /// Test files produced by `generate` (relative to the project root)
    pub generated_files: Vec<PathBuf>,
    pub dry_run: bool,
}

impl PluginContext {
    pub fn new(hook: Hook, project_root: impl Into<PathBuf>, config: ConfigV1) -> Self {
        Self {
            hook,
            project_root: project_root.into(),
            config,
            project: None,
            generated_files: Vec::new(),
            dry_run: false,
        }
    }

    pub fn with_project(mut self, project: ProjectInfo) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_generated_files(mut self, files: Vec<PathBuf>) -> Self {
        self.generated_files = files;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[async_trait]
pub trait Plugin: Send + Sync {
    fn metadata(&self) -> &PluginMetadata;

    /// Hooks this plugin actually implements
    fn hooks(&self) -> Vec<Hook> {
        Vec::new()
    }

    async fn on_init(&self, _ctx: &PluginContext) -> Result<()> {
        Ok(())
    }

    async fn on_generate(&self, _ctx: &PluginContext) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_compatible() {
        assert!(is_compatible("1.0.0"));
        assert!(is_compatible("1.4.2-beta.1"));
        assert!(is_compatible("1.2"));
        assert!(!is_compatible("2.0.0"));
        assert!(!is_compatible("0.9.0"));
        assert!(!is_compatible("10.0.0"));
        assert!(!is_compatible(""));
    }

    #[test]
    fn test_metadata_validate() {
        assert!(PluginMetadata::new("p", "1.0.0", "desc").validate().is_empty());
        assert_eq!(PluginMetadata::new("", "2.0.0", "").validate().len(), 3);
    }

    #[test]
    fn test_context_serializes_hook_name() {
        let ctx = PluginContext::new(Hook::Generate, "/work", ConfigV1::default());
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["hook"], "onGenerate");
        assert_eq!(value["config"]["testDir"], "tests");
        assert!(value.get("project").is_none());
    }
}
