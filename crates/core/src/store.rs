//! Storage boundary error shared by the store trait seams.
//!
//! Store traits live next to the domain types they persist; the error type
//! they all share lives here so the implementations (in-memory, Postgres)
//! and the domain flows agree on one boundary.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure at the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A storage-level constraint rejected the write (e.g. a unique index).
    /// The domain checks these invariants first; this variant is the
    /// cross-request backstop.
    #[error("storage conflict: {0}")]
    Conflict(String),

    /// The backend itself failed (connection, query, serialization).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
