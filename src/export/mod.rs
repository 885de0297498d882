//! Export of one column's content to a file.
//!
//! The pipeline is linear: validate → connect → check schema → prepare →
//! open destination → fetch rows → flush. Everything up to and including
//! preparation happens before the destination is touched, so configuration,
//! connection and query errors never leave a file behind.

mod condition;
mod content;
mod fetch;
mod sink;
mod types;

use std::path::Path;

use log::{debug, info};
use sqlx::{Either, Executor, SqliteConnection, SqlitePool, Statement};

use crate::error_handling::{DatabaseError, ExportError, QueryError};
use crate::storage::{list_columns, open_read_only_pool, quote_identifier, table_exists};

use sink::ContentSink;

pub use types::{BatchSize, ConditionParam, ExportRequest};

/// Exports `request.content_column` of every matching row to `request.destination`.
///
/// Opens a read-only pool on `request.source_location`, runs the export, and
/// closes the pool whether or not the export succeeded.
///
/// # Returns
///
/// The number of rows written. A condition matching nothing yields `Ok(0)`
/// and an empty destination file.
///
/// # Errors
///
/// - `InvalidConfiguration` before any resource is opened
/// - `ConnectionError` if the database cannot be opened
/// - `QueryError` for unknown identifiers, a malformed or multi-statement condition,
///   or a failure while reading rows
/// - `WriteError` if the destination cannot be created or written
///
/// # Example
///
/// ```no_run
/// use column_export::export::{export, ExportRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = ExportRequest::new("my_db.sqlite", "my_table", "variable4", "sqlite_out.txt")
///     .with_condition("variable1 = 1 AND variable2 <= 5");
/// let rows = export(&request).await?;
/// println!("{rows} rows written");
/// # Ok(())
/// # }
/// ```
pub async fn export(request: &ExportRequest) -> Result<usize, ExportError> {
    request.validate()?;

    let pool = open_read_only_pool(&request.source_location).await?;
    let result = export_with_pool(&pool, request).await;
    pool.close().await;
    result
}

/// Runs an export on a caller-supplied pool.
///
/// Exactly one connection is acquired and it is handed back to the pool on
/// every exit path. The pool itself is left open.
pub async fn export_with_pool(
    pool: &SqlitePool,
    request: &ExportRequest,
) -> Result<usize, ExportError> {
    request.validate()?;

    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| ExportError::ConnectionError(DatabaseError::SqlError(e)))?;

    info!(
        "Exporting {}.{} from {} to {}",
        request.table_name,
        request.content_column,
        request.source_location.display(),
        request.destination.display()
    );

    let count = export_on_connection(&mut conn, request).await?;

    info!(
        "Wrote {} row{} to {}",
        count,
        if count == 1 { "" } else { "s" },
        request.destination.display()
    );
    Ok(count)
}

/// Lists the column names of `table` in declaration order.
///
/// # Errors
///
/// Returns `ConnectionError` if the database cannot be opened, or
/// `QueryError::UnknownTable` if the table does not exist.
pub async fn column_names(db_path: &Path, table: &str) -> Result<Vec<String>, ExportError> {
    let pool = open_read_only_pool(db_path).await?;
    let result = columns_on_pool(&pool, table).await;
    pool.close().await;
    result
}

async fn columns_on_pool(pool: &SqlitePool, table: &str) -> Result<Vec<String>, ExportError> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| ExportError::ConnectionError(DatabaseError::SqlError(e)))?;
    if !table_exists(&mut conn, table).await? {
        return Err(QueryError::UnknownTable(table.to_string()).into());
    }
    Ok(list_columns(&mut conn, table).await?)
}

async fn export_on_connection(
    conn: &mut SqliteConnection,
    request: &ExportRequest,
) -> Result<usize, ExportError> {
    let sql = build_select(conn, request).await?;
    debug!("Export query: {sql}");

    let statement = (&mut *conn).prepare(&sql).await.map_err(QueryError::from)?;
    if let Some(Either::Right(expected)) = statement.parameters() {
        let given = request.condition_params.len();
        if expected != given {
            return Err(QueryError::ParameterCount { expected, given }.into());
        }
    }

    let mut query = sqlx::query(&sql);
    for param in &request.condition_params {
        query = match param {
            ConditionParam::Integer(v) => query.bind(*v),
            ConditionParam::Real(v) => query.bind(*v),
            ConditionParam::Text(v) => query.bind(v.as_str()),
        };
    }

    let mut sink = ContentSink::create(&request.destination, request.separator.clone())?;
    let mut rows = query.fetch(&mut *conn);
    fetch::drain_rows(&mut rows, request.batch_size, &mut sink).await?;
    sink.finish()
}

/// Validates identifiers against the schema and builds the SELECT statement.
///
/// The condition is parenthesized and closed on its own line so a trailing
/// `--` comment cannot swallow the parenthesis.
async fn build_select(
    conn: &mut SqliteConnection,
    request: &ExportRequest,
) -> Result<String, ExportError> {
    condition::check_single_expression(&request.condition)?;

    let table = request.table_name.as_str();
    if !table_exists(conn, table).await? {
        return Err(QueryError::UnknownTable(table.to_string()).into());
    }

    let column = list_columns(conn, table)
        .await?
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(&request.content_column))
        .ok_or_else(|| QueryError::UnknownColumn {
            table: table.to_string(),
            column: request.content_column.clone(),
        })?;

    Ok(format!(
        "SELECT {} FROM {} WHERE ({}\n)",
        quote_identifier(&column),
        quote_identifier(table),
        request.condition
    ))
}
