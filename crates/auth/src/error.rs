//! Auth flow error.

use thiserror::Error;

use pokeworld_core::{DomainError, StoreError};

/// Anything a registration or session flow can fail with: a deterministic
/// domain rejection, or a storage fault.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// The domain rejection, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AuthError::Domain(e) => Some(e),
            AuthError::Store(_) => None,
        }
    }
}
