//! Error type definitions.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for opening the source database.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database file does not exist. It is never created implicitly.
    #[error("Database file not found: {}", .0.display())]
    MissingDatabase(PathBuf),

    /// SQL connection error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error types for the query phase of an export.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The table (or view) is not present in the schema.
    #[error("Table not found: {0}")]
    UnknownTable(String),

    /// The column is not present in the table.
    #[error("Column {column} not found in table {table}")]
    UnknownColumn {
        /// Table that was inspected
        table: String,
        /// Column that was requested
        column: String,
    },

    /// The condition does not stay within a single WHERE clause: it ends the
    /// statement with `;` or closes a parenthesis it did not open.
    #[error("Condition must be a single expression: {0}")]
    UnboundedCondition(String),

    /// The condition's placeholder count does not match the bound values.
    #[error("Condition expects {expected} parameter(s), {given} given")]
    ParameterCount {
        /// Placeholders in the prepared statement
        expected: usize,
        /// Values supplied with the request
        given: usize,
    },

    /// Statement preparation or row stepping failed.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error types for an export run.
///
/// Variants are ordered by the phase in which they occur. Everything before
/// `WriteError` fails before the destination is touched.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum ExportError {
    /// The request is malformed (e.g. non-positive batch size). No resource was opened.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The store is unreachable or rejected the connection.
    #[error("Connection error: {0}")]
    ConnectionError(#[from] DatabaseError),

    /// Unknown table/column, malformed condition, or a failure while reading rows.
    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),

    /// The destination could not be created, written, or flushed.
    #[error("Write error on {}: {source}", path.display())]
    WriteError {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ExportError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl From<sqlx::Error> for ExportError {
    fn from(e: sqlx::Error) -> Self {
        ExportError::QueryError(QueryError::SqlError(e))
    }
}
