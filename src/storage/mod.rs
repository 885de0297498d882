// storage/mod.rs
// Read-only access to the source database

pub mod pool;
pub mod schema;

// Re-export commonly used items
pub use pool::open_read_only_pool;
pub use schema::{list_columns, quote_identifier, table_exists};
