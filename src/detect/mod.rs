//! Project Detection
//!
//! Fans out the independent signal detectors, scores the combined result and
//! assembles the detection report.
//!
//! ## Pipeline
//!
//! 1. **Signals**: project type, framework, TypeScript, build tool, package
//!    manager and Node version, all run concurrently
//! 2. **Confidence**: weighted score of type/framework/TypeScript
//! 3. **Advice**: recommendations and warnings derived from the result
//! 4. **Report**: the above plus located marker/config files

pub mod advice;
pub mod confidence;
pub mod manifest;
pub mod probe;
pub mod scanner;
pub mod signals;

use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::constants::markers::{
    JEST_CONFIGS, MOCHA_CONFIGS, PACKAGE_JSON, TSCONFIG, VITEST_CONFIGS,
};
use crate::constants::plugins::PREFIX;
use crate::types::{DetectionReport, Framework, ProjectInfo, Result};

pub use probe::FsProbe;
pub use scanner::SourceScanner;

/// Node version reported when no runtime could be probed
pub const UNKNOWN_NODE_VERSION: &str = "unknown";

/// Detects project characteristics below one root directory
pub struct ProjectDetector {
    probe: FsProbe,
    node_version: Option<String>,
}

impl ProjectDetector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            probe: FsProbe::new(root),
            node_version: None,
        }
    }

    /// Use a fixed Node version instead of probing the runtime
    pub fn with_node_version(mut self, version: impl Into<String>) -> Self {
        self.node_version = Some(version.into());
        self
    }

    pub async fn detect(&self) -> Result<ProjectInfo> {
        let probe = &self.probe;
        debug!("Detecting project in {}", probe.root().display());

        let (project_type, framework, typescript, build_tool, package_manager, node_version) = tokio::join!(
            signals::detect_project_type(probe),
            signals::detect_framework(probe),
            signals::detect_typescript(probe),
            signals::detect_build_tool(probe),
            signals::detect_package_manager(probe),
            self.node_version(),
        );
        let project_type = project_type?;

        let confidence = confidence::score(project_type, framework, typescript);

        let mut metadata = BTreeMap::new();
        metadata.insert(
            "root".to_string(),
            json!(probe.root().display().to_string()),
        );

        info!(
            "Detected {} project, framework {}, confidence {:.2}",
            project_type, framework, confidence
        );

        Ok(ProjectInfo {
            project_type,
            framework,
            typescript,
            build_tool,
            package_manager,
            node_version,
            confidence,
            metadata,
            suggested_plugins: suggested_plugins(framework, typescript),
        })
    }

    pub async fn generate_report(&self) -> Result<DetectionReport> {
        let (project, detected_files) = tokio::join!(self.detect(), self.detected_files());
        let project = project?;

        Ok(DetectionReport {
            recommendations: advice::recommendations(&project),
            warnings: advice::warnings(&project),
            detected_files,
            project,
        })
    }

    /// Locate the manifest, tsconfig and each framework's own config file
    pub async fn detected_files(&self) -> BTreeMap<String, Option<PathBuf>> {
        let probe = &self.probe;
        let (package_json, tsconfig, vitest, jest, mocha) = tokio::join!(
            probe.find_first(&[PACKAGE_JSON]),
            probe.find_first(&[TSCONFIG]),
            probe.find_first(VITEST_CONFIGS),
            probe.find_first(JEST_CONFIGS),
            probe.find_first(MOCHA_CONFIGS),
        );

        BTreeMap::from([
            ("packageJson".to_string(), package_json),
            ("tsconfig".to_string(), tsconfig),
            ("vitestConfig".to_string(), vitest),
            ("jestConfig".to_string(), jest),
            ("mochaConfig".to_string(), mocha),
        ])
    }

    async fn node_version(&self) -> String {
        if let Some(version) = &self.node_version {
            return version.clone();
        }
        signals::detect_node_version()
            .await
            .unwrap_or_else(|| UNKNOWN_NODE_VERSION.to_string())
    }
}

/// Plugins matching the detected stack, framework first
pub fn suggested_plugins(framework: Framework, typescript: bool) -> Vec<String> {
    let mut plugins = Vec::new();
    if framework.is_known() {
        plugins.push(format!("{}{}", PREFIX, framework));
    }
    if typescript {
        plugins.push(format!("{}typescript", PREFIX));
    }
    plugins
}

// =============================================================================
// Tests
// =============================================================================
