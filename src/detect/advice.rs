//! Recommendation / Warning Generator
//!
//! Pure functions over a `ProjectInfo`. Every matching message is emitted,
//! always in the same order.

use crate::constants::confidence::{LOW_CONFIDENCE_THRESHOLD, MIN_NODE_MAJOR};
use crate::types::{Framework, ProjectInfo};

pub const NO_FRAMEWORK: &str =
    "No test framework detected. Consider adopting a modern framework such as Vitest.";
pub const NO_TYPESCRIPT: &str =
    "TypeScript not detected. Consider adopting TypeScript for type-safe tests.";

pub fn recommendations(info: &ProjectInfo) -> Vec<String> {
    let mut out = Vec::new();

    if info.framework == Framework::Unknown {
        out.push(NO_FRAMEWORK.to_string());
    }

    if !info.typescript {
        out.push(NO_TYPESCRIPT.to_string());
    }

    if let Some(major) = node_major(&info.node_version)
        && major < MIN_NODE_MAJOR
    {
        out.push(format!(
            "Node.js {} is outdated. Upgrade to Node.js {} or newer.",
            info.node_version, MIN_NODE_MAJOR
        ));
    }

    out
}

pub fn warnings(info: &ProjectInfo) -> Vec<String> {
    let mut out = Vec::new();
    if info.confidence < LOW_CONFIDENCE_THRESHOLD {
        out.push(format!(
            "Low detection confidence ({:.0}%). Review the detected settings before continuing.",
            info.confidence * 100.0
        ));
    }
    out
}

/// Leading numeric component of a version string ("20.11.0" -> 20)
pub fn node_major(version: &str) -> Option<u64> {
    let version = version.trim().trim_start_matches('v');
    let digits: String = version.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PackageManager, ProjectType};
    use std::collections::BTreeMap;

    fn info(framework: Framework, typescript: bool, node: &str, confidence: f64) -> ProjectInfo {
        ProjectInfo {
            project_type: ProjectType::JavaScript,
            framework,
            typescript,
            build_tool: None,
            package_manager: PackageManager::Npm,
            node_version: node.to_string(),
            confidence,
            metadata: BTreeMap::new(),
            suggested_plugins: vec![],
        }
    }

    #[test]
    fn test_all_recommendations_in_order() {
        let recs = recommendations(&info(Framework::Unknown, false, "16.20.0", 0.3));
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], NO_FRAMEWORK);
        assert_eq!(recs[1], NO_TYPESCRIPT);
        assert!(recs[2].contains("16.20.0"));
    }

    #[test]
    fn test_no_recommendations() {
        let recs = recommendations(&info(Framework::Vitest, true, "20.11.1", 1.0));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_unparsable_node_version_is_silent() {
        let recs = recommendations(&info(Framework::Jest, true, "unknown", 1.0));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_low_confidence_warning() {
        assert_eq!(warnings(&info(Framework::Unknown, false, "20.0.0", 0.3)).len(), 1);
        assert!(warnings(&info(Framework::Jest, false, "20.0.0", 0.7)).is_empty());
    }

    #[test]
    fn test_node_major() {
        assert_eq!(node_major("18.0.0"), Some(18));
        assert_eq!(node_major("v16.3.1"), Some(16));
        assert_eq!(node_major("unknown"), None);
        assert_eq!(node_major(""), None);
    }
}
