//! testweave - Test Scaffolding for JavaScript/TypeScript Projects
//!
//! Detects a project's language, test framework and tooling from files on
//! disk, resolves a layered configuration, and scaffolds test files.
//!
//! ## Quick Start
//!
//! ```ignore
//! use testweave::{ConfigLoader, ProjectDetector};
//!
//! let report = ProjectDetector::new(&root).generate_report().await?;
//! let loaded = ConfigLoader::new(&root).load()?;
//! println!("{} ({:.2})", report.project.framework, report.project.confidence);
//! ```
//!
//! ## Modules
//!
//! - [`detect`]: signal detectors, confidence scoring, report assembly
//! - [`config`]: config discovery, validation and merging
//! - [`templates`]: test path planning and template rendering
//! - [`plugins`]: plugin contract, loader and registry
//! - [`fs`]: atomic file writes with backup

pub mod cli;
pub mod config;
pub mod constants;
pub mod detect;
pub mod fs;
pub mod plugins;
pub mod templates;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{ConfigLoadResult, ConfigLoader, ConfigSource, ConfigV1, merge_config};

// Error Types
pub use types::error::{ErrorKind, Result, ScaffoldError};

// Detection
pub use detect::ProjectDetector;
pub use types::{DetectionReport, Framework, ProjectInfo, ProjectType};

// =============================================================================
// Scaffolding Re-exports
// =============================================================================

pub use fs::{WriteOptions, WriteResult, write_atomic};
pub use plugins::{Hook, Plugin, PluginContext, PluginLoader, PluginMetadata, PluginRegistry};
pub use templates::{PlannedTest, TestGenerator};
