//! Row retrieval strategies.
//!
//! Both strategies drain the same row stream in store order; they differ only
//! in how many rows are pulled per fetch.

use futures::{Stream, TryStreamExt};
use log::debug;
use sqlx::sqlite::SqliteRow;
use std::io::Write;

use super::content::content_bytes;
use super::sink::ContentSink;
use super::types::BatchSize;
use crate::error_handling::ExportError;

/// Upper bound on rows preallocated per batch; larger batches grow on demand.
const MAX_PREALLOCATED_ROWS: usize = 4096;

/// Pulls up to `limit` rows. An empty batch means the stream is exhausted.
pub(crate) async fn next_batch<S>(rows: &mut S, limit: usize) -> Result<Vec<SqliteRow>, sqlx::Error>
where
    S: Stream<Item = Result<SqliteRow, sqlx::Error>> + Unpin,
{
    let mut batch = Vec::with_capacity(limit.min(MAX_PREALLOCATED_ROWS));
    while batch.len() < limit {
        match rows.try_next().await? {
            Some(row) => batch.push(row),
            None => break,
        }
    }
    Ok(batch)
}

/// Writes every row of `rows` into `sink`, one row or one batch at a time.
pub(crate) async fn drain_rows<S, W>(
    rows: &mut S,
    batch_size: Option<BatchSize>,
    sink: &mut ContentSink<W>,
) -> Result<(), ExportError>
where
    S: Stream<Item = Result<SqliteRow, sqlx::Error>> + Unpin,
    W: Write,
{
    match batch_size {
        None => {
            while let Some(row) = rows.try_next().await? {
                sink.write_value(content_bytes(&row)?.as_deref())?;
            }
        }
        Some(size) => loop {
            let batch = next_batch(rows, size.get()).await?;
            if batch.is_empty() {
                break;
            }
            debug!(
                "Fetched batch of {} row(s), {} written so far",
                batch.len(),
                sink.written()
            );
            for row in &batch {
                sink.write_value(content_bytes(row)?.as_deref())?;
            }
        },
    }
    Ok(())
}
