//! Configuration Management
//!
//! Configuration resolution with fixed precedence:
//! 1. Built-in defaults
//! 2. Discovered config source (package.json field, rc file, config script)
//! 3. Caller overrides (CLI flags, prompt answers)

mod loader;
mod merger;
mod types;
mod validate;

pub use loader::{ConfigCandidate, ConfigLoader, parse_script_config};
pub use merger::{ConfigLayer, GenerationLayer, merge_config, merge_layers};
pub use types::*;
pub use validate::validate_config;
