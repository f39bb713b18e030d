//! Error types for the tracker.
//!
//! A rejected form is an expected outcome and carries its own
//! [`ValidationError`]; callers usually show it and carry on. Every other
//! variant means the store or the filesystem failed.

use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord { id: i64, reason: String },

    #[error("Unsupported schema version {found} (this build understands up to {supported})")]
    SchemaVersion { found: i32, supported: i32 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
