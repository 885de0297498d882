//! Schema introspection and identifier handling.
//!
//! Table and column names cannot be bound as parameters, so they are checked
//! against the live schema and then quoted before being placed in SQL text.

use sqlx::{Row, SqliteConnection};

/// Returns true if a table or view named `table` exists (case-insensitive).
pub async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type IN ('table', 'view') AND name = ? COLLATE NOCASE",
    )
    .bind(table)
    .fetch_one(&mut *conn)
    .await?;
    Ok(count > 0)
}

/// Lists column names of `table` in declaration order.
///
/// Returns an empty list when the table does not exist.
pub async fn list_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query("SELECT name FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.iter().map(|r| r.get::<String, _>("name")).collect())
}

/// Quotes an identifier for use in SQL text, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
