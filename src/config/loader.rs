//! Configuration Loader
//!
//! Locates a configuration source by walking upward from a starting
//! directory. In each directory the candidates are checked in order:
//! 1. `package.json` field `"testweave"`
//! 2. `.testweaverc` (JSON)
//! 3. `.testweaverc.json`
//! 4. `.testweaverc.js`
//! 5. `testweave.config.js`
//! 6. `testweave.config.ts`
//!
//! The first match wins. Script variants are not evaluated: their exported
//! object literal must be plain JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::merger::{ConfigLayer, merge_layers};
use super::types::{ConfigLoadResult, ConfigSource, ConfigV1};
use super::validate::validate_config;
use crate::constants::config::{DEFAULT_CONFIG_FILE, PACKAGE_JSON_FIELD, SEARCH_FILES};
use crate::constants::markers::PACKAGE_JSON;
use crate::types::{Result, ScaffoldError};

/// A located configuration source, before parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCandidate {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Configuration loader rooted at a starting directory
pub struct ConfigLoader {
    root: PathBuf,
}

impl ConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file written by `init` for a project root
    pub fn config_path_for(root: &Path) -> PathBuf {
        root.join(DEFAULT_CONFIG_FILE)
    }

    /// Search, parse and validate. Falls back to defaults when nothing is found.
    pub fn load(&self) -> Result<ConfigLoadResult> {
        let found = self
            .search()
            .map_err(|e| ScaffoldError::config_load(&self.root, e))?;
        let Some(candidate) = found else {
            debug!(
                "No configuration found above {}, using defaults",
                self.root.display()
            );
            return Ok(ConfigLoadResult::defaults());
        };

        info!(
            "Loading configuration from {} ({})",
            candidate.path.display(),
            candidate.source
        );
        let value = read_candidate(&candidate)
            .map_err(|e| ScaffoldError::config_load(&self.root, e))?;
        let config = parse_validated(&candidate.path, &value)?;

        Ok(ConfigLoadResult {
            config,
            source: candidate.source,
            path: Some(candidate.path),
            errors: Vec::new(),
        })
    }

    /// Load one explicit file, bypassing the search
    pub fn load_from_path(path: &Path) -> Result<ConfigLoadResult> {
        let source = if path.file_name().is_some_and(|n| n == PACKAGE_JSON) {
            ConfigSource::PackageJson
        } else {
            ConfigSource::File
        };
        let candidate = ConfigCandidate {
            path: path.to_path_buf(),
            source,
        };

        let value = read_candidate(&candidate).map_err(|e| ScaffoldError::config_load(path, e))?;
        let config = parse_validated(path, &value)?;

        Ok(ConfigLoadResult {
            config,
            source,
            path: Some(path.to_path_buf()),
            errors: Vec::new(),
        })
    }

    /// Find the first configuration source from `root` upward
    pub fn search(&self) -> Result<Option<ConfigCandidate>> {
        for dir in self.root.ancestors() {
            let manifest = dir.join(PACKAGE_JSON);
            if manifest.is_file() && package_json_has_field(&manifest)? {
                return Ok(Some(ConfigCandidate {
                    path: manifest,
                    source: ConfigSource::PackageJson,
                }));
            }

            for name in SEARCH_FILES {
                let path = dir.join(name);
                if path.is_file() {
                    return Ok(Some(ConfigCandidate {
                        path,
                        source: ConfigSource::File,
                    }));
                }
            }
        }
        Ok(None)
    }
}

/// Whether a package.json embeds a configuration field.
/// A manifest that cannot be parsed is skipped rather than failing the search.
fn package_json_has_field(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content) {
        Ok(value) => Ok(value.get(PACKAGE_JSON_FIELD).is_some()),
        Err(e) => {
            debug!("Skipping unparsable {}: {}", path.display(), e);
            Ok(false)
        }
    }
}

fn read_candidate(candidate: &ConfigCandidate) -> std::result::Result<Value, String> {
    let content = fs::read_to_string(&candidate.path)
        .map_err(|e| format!("cannot read {}: {}", candidate.path.display(), e))?;

    match candidate.source {
        ConfigSource::PackageJson => {
            let manifest: Value = serde_json::from_str(&content)
                .map_err(|e| format!("invalid JSON in {}: {}", candidate.path.display(), e))?;
            manifest.get(PACKAGE_JSON_FIELD).cloned().ok_or_else(|| {
                format!(
                    "no \"{}\" field in {}",
                    PACKAGE_JSON_FIELD,
                    candidate.path.display()
                )
            })
        }
        ConfigSource::File if is_script(&candidate.path) => parse_script_config(&content)
            .map_err(|e| format!("{}: {}", candidate.path.display(), e)),
        _ => serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in {}: {}", candidate.path.display(), e)),
    }
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext, "js" | "ts" | "mjs" | "cjs"))
}

/// Extract the exported object literal of a script config.
///
/// Accepts `export default {...}`, `module.exports = {...}` and wrapped
/// forms such as `export default defineConfig({...})`.
pub fn parse_script_config(content: &str) -> std::result::Result<Value, String> {
    let export_at = content
        .find("export default")
        .or_else(|| content.find("module.exports"))
        .ok_or("no `export default` or `module.exports` found")?;

    let body = &content[export_at..];
    let start = body.find('{').ok_or("exported value is not an object literal")?;
    let end = body.rfind('}').ok_or("unterminated object literal")?;
    if end < start {
        return Err("unterminated object literal".to_string());
    }

    serde_json::from_str(&body[start..=end])
        .map_err(|e| format!("exported object is not plain JSON: {}", e))
}

fn parse_validated(path: &Path, value: &Value) -> Result<ConfigV1> {
    let failures = validate_config(value);
    if !failures.is_empty() {
        return Err(ScaffoldError::config_invalid(path, failures));
    }

    let layer: ConfigLayer =
        serde_json::from_value(value.clone()).map_err(|e| ScaffoldError::config_load(path, e))?;
    merge_layers(&[layer])
}

// =============================================================================
// Tests
// =============================================================================
