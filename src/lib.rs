//! column_export library: stream one SQLite column into a file
//!
//! Given a database, a table, a filter condition and a content column, the
//! exporter writes the column's value for every matching row to an output
//! file, in the order SQLite returns them. Rows are fetched either one at a
//! time or in fixed-size batches; both produce identical bytes.
//!
//! # Example
//!
//! ```no_run
//! use column_export::export::{export, ExportRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ExportRequest::new("my_db.sqlite", "my_table", "variable4", "sqlite_out.txt")
//!     .with_condition("variable1 = ? AND variable2 <= ?")
//!     .with_param(1)
//!     .with_param(5)
//!     .with_batch_size(1000)?;
//!
//! let rows = export(&request).await?;
//! println!("Wrote {} rows", rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. A current-thread runtime is enough:
//! an export never spawns tasks.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod export;
pub mod initialization;
mod storage;

// Re-export public API
pub use config::{LogFormat, LogLevel};
pub use error_handling::{DatabaseError, ExportError, InitializationError, QueryError};
pub use export::{column_names, export, export_with_pool, BatchSize, ConditionParam, ExportRequest};
