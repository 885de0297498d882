// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a file-backed database at `db_path` with a `t (id, v)` table holding `values`.
///
/// The pool used for seeding is closed before returning so the exporter
/// sees a quiescent file.
pub async fn create_test_db(db_path: &Path, values: &[&str]) {
    let pool = create_writable_pool(db_path).await;
    sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT, tag TEXT)")
        .execute(&pool)
        .await
        .expect("Failed to create table");
    for (i, value) in values.iter().enumerate() {
        sqlx::query("INSERT INTO t (id, v, tag) VALUES (?, ?, ?)")
            .bind(i as i64 + 1)
            .bind(*value)
            .bind(if i % 2 == 0 { "even" } else { "odd" })
            .execute(&pool)
            .await
            .expect("Failed to insert row");
    }
    pool.close().await;
}

/// Opens (creating if needed) a writable pool for test data setup.
pub async fn create_writable_pool(db_path: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    SqlitePool::connect_with(options)
        .await
        .expect("Failed to create test database")
}

/// Creates a temp directory holding `test.db` seeded with `values`.
/// Returns the directory (keep it alive) and the database path.
#[allow(dead_code)] // Used by other test files
pub async fn create_temp_db(values: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    create_test_db(&db_path, values).await;
    (temp_dir, db_path)
}

/// The three-row table used by the `id<=2` → "ab" scenario.
#[allow(dead_code)] // Used by other test files
pub const ABC: &[&str] = &["a", "b", "c"];
