//! Project-level type definitions
//!
//! Contains types used for project detection and classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Source language classification of a project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    TypeScript,
    JavaScript,
    #[default]
    Unknown,
}

impl ProjectType {
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::JavaScript => write!(f, "javascript"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Test framework classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Vitest,
    Jest,
    Mocha,
    #[default]
    Unknown,
}

impl Framework {
    /// Frameworks in detection priority order
    pub const SUPPORTED: [Framework; 3] = [Framework::Vitest, Framework::Jest, Framework::Mocha];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vitest => "vitest",
            Self::Jest => "jest",
            Self::Mocha => "mocha",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Framework {
    type Err = String;

    /// Exact lowercase names only, matching the serialized form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vitest" => Ok(Framework::Vitest),
            "jest" => Ok(Framework::Jest),
            "mocha" => Ok(Framework::Mocha),
            _ => Err(format!(
                "Unknown framework: {}. Valid values: vitest, jest, mocha",
                s
            )),
        }
    }
}

/// Bundler or compiler driving the build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    Vite,
    Webpack,
    Esbuild,
    Tsc,
    Other,
}

impl std::fmt::Display for BuildTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vite => write!(f, "vite"),
            Self::Webpack => write!(f, "webpack"),
            Self::Esbuild => write!(f, "esbuild"),
            Self::Tsc => write!(f, "tsc"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Npm => write!(f, "npm"),
            Self::Pnpm => write!(f, "pnpm"),
            Self::Yarn => write!(f, "yarn"),
            Self::Bun => write!(f, "bun"),
        }
    }
}

/// Detection result, produced once per invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub framework: Framework,
    pub typescript: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_tool: Option<BuildTool>,
    pub package_manager: PackageManager,
    pub node_version: String,
    pub confidence: f64,
    /// Open extension map; consumers treat unknown keys as opaque
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default)]
    pub suggested_plugins: Vec<String>,
}

/// Full detection output with located marker files and guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub project: ProjectInfo,
    pub detected_files: BTreeMap<String, Option<PathBuf>>,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_parse() {
        assert_eq!("vitest".parse::<Framework>().unwrap(), Framework::Vitest);
        assert_eq!("jest".parse::<Framework>().unwrap(), Framework::Jest);
        assert!("JEST".parse::<Framework>().is_err());
        assert!("unknown".parse::<Framework>().is_err());
        assert!("ava".parse::<Framework>().is_err());
    }

    #[test]
    fn test_project_info_serializes_camel_case() {
        let info = ProjectInfo {
            project_type: ProjectType::TypeScript,
            framework: Framework::Vitest,
            typescript: true,
            build_tool: Some(BuildTool::Vite),
            package_manager: PackageManager::Pnpm,
            node_version: "20.11.0".to_string(),
            confidence: 1.0,
            metadata: BTreeMap::new(),
            suggested_plugins: vec![],
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["type"], "typescript");
        assert_eq!(value["buildTool"], "vite");
        assert_eq!(value["packageManager"], "pnpm");
        assert_eq!(value["nodeVersion"], "20.11.0");
    }
}
