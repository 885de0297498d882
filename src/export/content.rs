//! Conversion of a content-column value into output bytes.
//!
//! TEXT and BLOB values are written byte-for-byte (TEXT is not re-validated
//! as UTF-8). INTEGER and REAL values are written as decimal text. NULL
//! produces no bytes.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

/// Extracts the first column of `row` as bytes, or `None` for SQL NULL.
pub(crate) fn content_bytes(row: &SqliteRow) -> Result<Option<Vec<u8>>, sqlx::Error> {
    let raw = row.try_get_raw(0)?;
    if raw.is_null() {
        return Ok(None);
    }

    // Storage class of the value itself, not the declared column type
    let storage_class = raw.type_info();
    let bytes = match storage_class.name() {
        "INTEGER" => row.try_get_unchecked::<i64, _>(0)?.to_string().into_bytes(),
        "REAL" => format_real(row.try_get_unchecked::<f64, _>(0)?).into_bytes(),
        _ => row.try_get_unchecked::<Vec<u8>, _>(0)?,
    };
    Ok(Some(bytes))
}

/// Formats a REAL as the shortest decimal that round-trips to the same `f64`.
///
/// Integral values below 1e15 keep a ".0" suffix; everything else is Rust's
/// `Display` output, which is not SQLite's 15-digit `CAST(x AS TEXT)` form
/// (`0.1 + 0.2` gives `0.30000000000000004`, not `0.3`).
fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
