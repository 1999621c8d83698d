//! Read-side normalization of column values.
//!
//! Older files may hold dates as numbers or hours as text, depending on how
//! the column was written. Readers go through these helpers so callers
//! always see text-or-`None` for dates and `f64`-or-`None` for hours.

use rusqlite::types::Value;
use rusqlite::Row;

/// Any non-null value as text.
pub(crate) fn text(row: &Row, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Null => None,
        Value::Text(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(r) => Some(r.to_string()),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    })
}

/// Like [`text`], with `None` mapped to an empty string.
pub(crate) fn required_text(row: &Row, idx: usize) -> rusqlite::Result<String> {
    Ok(text(row, idx)?.unwrap_or_default())
}

/// A number, or `None` for null and for text that does not parse.
pub(crate) fn real(row: &Row, idx: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Integer(i) => Some(i as f64),
        Value::Real(r) => Some(r),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Null | Value::Blob(_) => None,
    })
}

/// Integer flags and "true"/"1" text are true; everything else is false.
pub(crate) fn flag(row: &Row, idx: usize) -> rusqlite::Result<bool> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Integer(i) => i != 0,
        Value::Real(r) => r != 0.0,
        Value::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        Value::Null | Value::Blob(_) => false,
    })
}
