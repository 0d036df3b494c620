//! Configuration Types
//!
//! The on-disk configuration schema (version 1.0.0) and the loader result.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::config::{CONFIG_VERSION, DEFAULT_TEST_DIR, DEFAULT_TEST_PATTERN};
use crate::types::Framework;

/// Root configuration structure, persisted as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigV1 {
    /// Always the literal "1.0.0"
    pub version: String,

    pub framework: Framework,

    /// Directory receiving generated tests
    pub test_dir: String,

    /// Glob matching test files
    pub test_pattern: String,

    /// Plugin identifiers, loaded in order
    pub plugins: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        default_config()
    }
}

/// Hard-coded defaults. Pure; nothing mutates these at runtime.
pub fn default_config() -> ConfigV1 {
    ConfigV1 {
        version: CONFIG_VERSION.to_string(),
        framework: Framework::Vitest,
        test_dir: DEFAULT_TEST_DIR.to_string(),
        test_pattern: DEFAULT_TEST_PATTERN.to_string(),
        plugins: Vec::new(),
        generation: None,
    }
}

impl ConfigV1 {
    /// Generation settings, falling back to `GenerationConfig::default()`
    pub fn generation_or_default(&self) -> GenerationConfig {
        self.generation.clone().unwrap_or_default()
    }
}

// =============================================================================
// Generation Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Place tests next to their source files instead of under testDir
    pub colocate: bool,
    pub naming: Naming,
}

/// Test file naming strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// Mirror the source tree below testDir
    #[default]
    Mirror,
    /// Like mirror, with kebab-cased file stems
    Kebab,
    /// All tests directly in testDir, directories joined with '-'
    Flat,
}

impl std::fmt::Display for Naming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Naming::Mirror => write!(f, "mirror"),
            Naming::Kebab => write!(f, "kebab"),
            Naming::Flat => write!(f, "flat"),
        }
    }
}

impl std::str::FromStr for Naming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mirror" => Ok(Naming::Mirror),
            "kebab" => Ok(Naming::Kebab),
            "flat" => Ok(Naming::Flat),
            _ => Err(format!(
                "Unknown naming strategy: {}. Valid values: mirror, kebab, flat",
                s
            )),
        }
    }
}

// =============================================================================
// Load Result
// =============================================================================

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfigSource {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "package.json")]
    PackageJson,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::PackageJson => write!(f, "package.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigLoadResult {
    pub config: ConfigV1,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub errors: Vec<String>,
}

impl ConfigLoadResult {
    pub fn defaults() -> Self {
        Self {
            config: default_config(),
            source: ConfigSource::Default,
            path: None,
            errors: Vec::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
