pub mod error;
pub mod project;

pub use error::{ErrorKind, Result, ScaffoldError};
pub use project::*;
