//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (environment variable names, defaults)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, ColumnsArgs, Command, ExportArgs, LogFormat, LogLevel};
