//! Configuration constants.
//!
//! Names and defaults shared by the CLI and the library.

/// Environment variable consulted when `--db` is not given on the command line.
pub const DB_PATH_ENV: &str = "COLUMN_EXPORT_DB";

/// Name of the dotenv file loaded at startup.
pub const DOTENV_FILE: &str = ".env";

/// Log target used by this crate (module-level filtering in `RUST_LOG`).
pub const LOG_TARGET: &str = "column_export";
