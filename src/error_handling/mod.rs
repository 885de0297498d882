//! Error handling.
//!
//! This module provides the error types surfaced by the library:
//! - **Export errors**: the four failure classes of an export run
//! - **Query errors**: schema validation and SQL failures
//! - **Database errors**: failures opening the read-only pool
//! - **Initialization errors**: logger setup
//!
//! Nothing is retried automatically. An export is idempotent (the destination
//! is truncated), so callers may simply run it again.

mod types;

// Re-export public API
pub use types::{DatabaseError, ExportError, InitializationError, QueryError};
