//! Database connection pool management.
//!
//! The exporter only reads from the store, so the pool is opened:
//! - in read-only mode
//! - without creating the file when it is missing
//! - with a single connection (one export owns one connection)

use std::path::Path;

use log::{debug, error};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Opens a single-connection, read-only pool on an existing database file.
///
/// The connection is established eagerly so that an unreachable store is
/// reported here rather than on first use.
///
/// # Errors
///
/// Returns `DatabaseError::MissingDatabase` if the file does not exist, or
/// `DatabaseError::SqlError` if SQLite rejects the connection.
pub async fn open_read_only_pool(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    if !db_path.is_file() {
        error!("Database file not found: {}", db_path.display());
        return Err(DatabaseError::MissingDatabase(db_path.to_path_buf()));
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    debug!("Opened read-only pool on {}", db_path.display());
    Ok(pool)
}
