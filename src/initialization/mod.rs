//! Application initialization.
//!
//! This module provides functions to set up process-wide state before an
//! export runs:
//! - Logger
//! - Environment (`.env` file)

mod logger;

use std::path::{Path, PathBuf};

use crate::config::DOTENV_FILE;

// Re-export public API
pub use logger::init_logger_with;

/// Loads environment variables from a `.env` file, if one exists.
///
/// Looks in the current directory first, then next to the executable.
/// A missing or unreadable file is not an error. Runs before the logger is
/// installed, so the loaded path is returned for the caller to log.
pub fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }
    let exe_path = std::env::current_exe().ok()?;
    let env_path = exe_path.parent()?.join(DOTENV_FILE);
    load_dotenv_from(&env_path)
}

fn load_dotenv_from(env_path: &Path) -> Option<PathBuf> {
    if !env_path.is_file() {
        return None;
    }
    dotenvy::from_path(env_path).ok()?;
    Some(env_path.to_path_buf())
}
