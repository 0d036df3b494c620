//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Every error carries a machine-readable kind plus a details map so the
//! command boundary can report what failed without re-running the step.
//!
//! ## Error Kinds
//!
//! - **Config**: invalid/unparsable config file, or failure during search/load
//! - **Detection**: unexpected failure while inspecting the project
//! - **FileSystem**: atomic write failure or unknown template name
//! - **Plugin**: duplicate registration, missing plugin, bad shape/version,
//!   exhausted resolution locations, or a failing hook
//!
//! Ordinary "file absent" conditions during detection never become errors;
//! the affected signal degrades instead.

use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// Error Kinds
// =============================================================================

/// Machine-readable error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Detection,
    FileSystem,
    Plugin,
    Io,
    Json,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "CONFIG_ERROR"),
            Self::Detection => write!(f, "DETECTION_ERROR"),
            Self::FileSystem => write!(f, "FILESYSTEM_ERROR"),
            Self::Plugin => write!(f, "PLUGIN_ERROR"),
            Self::Io => write!(f, "IO_ERROR"),
            Self::Json => write!(f, "JSON_ERROR"),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ScaffoldError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    /// Configuration could not be located, parsed or validated
    #[error("Config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
        /// Individual schema validation failures (empty for parse/IO failures)
        failures: Vec<String>,
    },

    /// Project inspection failed unexpectedly
    #[error("Detection failed in {}: {message}", cwd.display())]
    Detection { message: String, cwd: PathBuf },

    #[error("Filesystem error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Plugin error: {message}")]
    Plugin {
        message: String,
        plugin: Option<String>,
        /// Resolution locations tried, in order
        attempted: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl ScaffoldError {
    /// Create a config error from a plain message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
            failures: Vec::new(),
        }
    }

    /// Create a config error for a file that failed schema validation
    pub fn config_invalid(path: impl AsRef<Path>, failures: Vec<String>) -> Self {
        let path = path.as_ref();
        Self::Config {
            message: format!(
                "Invalid configuration in {}: {}",
                path.display(),
                failures.join("; ")
            ),
            path: Some(path.to_path_buf()),
            failures,
        }
    }

    /// Wrap an unexpected failure during config search/load
    pub fn config_load(root: impl AsRef<Path>, cause: impl std::fmt::Display) -> Self {
        let root = root.as_ref();
        Self::Config {
            message: format!("Failed to load configuration from {}: {}", root.display(), cause),
            path: Some(root.to_path_buf()),
            failures: Vec::new(),
        }
    }

    pub fn detection(cwd: impl AsRef<Path>, cause: impl std::fmt::Display) -> Self {
        Self::Detection {
            message: cause.to_string(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn file_system(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn plugin(message: impl Into<String>, plugin: Option<&str>) -> Self {
        Self::Plugin {
            message: message.into(),
            plugin: plugin.map(String::from),
            attempted: Vec::new(),
        }
    }

    /// Machine-readable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Json,
            Self::Config { .. } => ErrorKind::Config,
            Self::Detection { .. } => ErrorKind::Detection,
            Self::FileSystem { .. } => ErrorKind::FileSystem,
            Self::Plugin { .. } => ErrorKind::Plugin,
        }
    }

    /// Structured context for reporting
    pub fn details(&self) -> Map<String, Value> {
        let mut details = Map::new();
        match self {
            Self::Io(e) => {
                details.insert("io_kind".into(), json!(format!("{:?}", e.kind())));
            }
            Self::Json(e) => {
                details.insert("line".into(), json!(e.line()));
                details.insert("column".into(), json!(e.column()));
            }
            Self::Config { path, failures, .. } => {
                if let Some(path) = path {
                    details.insert("path".into(), json!(path.display().to_string()));
                }
                if !failures.is_empty() {
                    details.insert("errors".into(), json!(failures));
                }
            }
            Self::Detection { cwd, .. } => {
                details.insert("cwd".into(), json!(cwd.display().to_string()));
            }
            Self::FileSystem { path, .. } => {
                if let Some(path) = path {
                    details.insert("path".into(), json!(path.display().to_string()));
                }
            }
            Self::Plugin {
                plugin, attempted, ..
            } => {
                if let Some(plugin) = plugin {
                    details.insert("plugin".into(), json!(plugin));
                }
                if !attempted.is_empty() {
                    details.insert("attempted".into(), json!(attempted));
                }
            }
        }
        details
    }
}

// =============================================================================
// Tests
// =============================================================================
