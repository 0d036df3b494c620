//! Filesystem output helpers

pub mod writer;

pub use writer::{WriteOptions, WriteResult, default_backup_path, write_atomic};
