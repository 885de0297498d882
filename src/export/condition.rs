//! Lexical guard for the WHERE condition.
//!
//! The condition is opaque SQL, but it is spliced into `WHERE (<condition>)`,
//! so it must not end that statement or close the surrounding parenthesis.
//! Quoted literals, quoted identifiers and comments are skipped.

use crate::error_handling::QueryError;

/// Rejects a condition that would escape its `WHERE (...)` clause.
pub(crate) fn check_single_expression(condition: &str) -> Result<(), QueryError> {
    let bytes = condition.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => i = skip_quoted(bytes, i + 1, quote),
            b'[' => i = skip_past(bytes, i + 1, b"]"),
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_past(bytes, i + 2, b"\n"),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_past(bytes, i + 2, b"*/"),
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    QueryError::UnboundedCondition(format!("unmatched ')' at offset {i}"))
                })?;
                i += 1;
            }
            b';' => {
                return Err(QueryError::UnboundedCondition(format!(
                    "statement separator ';' at offset {i}"
                )));
            }
            _ => i += 1,
        }
    }
    Ok(())
}

/// Returns the index after the closing `quote`; a doubled quote is an escape.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    i
}

/// Returns the index after the next `end`, or the input length if there is none.
fn skip_past(bytes: &[u8], from: usize, end: &[u8]) -> usize {
    bytes[from.min(bytes.len())..]
        .windows(end.len())
        .position(|w| w == end)
        .map_or(bytes.len(), |pos| from + pos + end.len())
}
