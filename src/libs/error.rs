//! Error types for the persistence layer.
//!
//! Storage failures never escape a CRUD operation: each operation logs the
//! `StoreError` and hands back its documented "no result" value. The only
//! place a `StoreError` reaches the caller is `Store::open`, where a database
//! that cannot be opened or prepared is fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Failure raised while reading, writing or preparing the task database.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    /// The database holds tables whose shape does not match the current
    /// schema and the caller asked not to rebuild it.
    #[error("database schema at {} does not match the expected layout", path.display())]
    SchemaMismatch { path: PathBuf },

    #[error(transparent)]
    InvalidValue(#[from] ParseLabelError),
}

/// A stored or typed-in label that does not name a known status or priority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
