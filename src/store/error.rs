//! Expense store error types

use thiserror::Error;

/// Errors that can occur in the expense store
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite statement or connection failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be converted back into an entry
    #[error("Corrupt row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),

    /// IO error while preparing the database location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
