//! Dependency Reader
//!
//! Parses the dependency maps of `package.json`.

use serde::Deserialize;
use std::collections::BTreeMap;

use tracing::debug;

use super::probe::FsProbe;
use crate::constants::markers::PACKAGE_JSON;

/// The subset of `package.json` detection cares about
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageManifest {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn parse(content: &str) -> Option<Self> {
        match serde_json::from_str(content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                debug!("Unparsable {}: {}", PACKAGE_JSON, e);
                None
            }
        }
    }

    /// Listed in either `dependencies` or `devDependencies`
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Read and parse the project manifest; `None` if missing or unreadable
pub async fn read_manifest(probe: &FsProbe) -> Option<PackageManifest> {
    let content = probe.read(PACKAGE_JSON).await?;
    PackageManifest::parse(&content)
}
