//! Creature flow error.

use thiserror::Error;

use pokeworld_catalog::CatalogError;
use pokeworld_core::{DomainError, StoreError};

/// Anything a creature flow can fail with.
///
/// A catalog miss on the creature lookup is translated to
/// [`DomainError::CatalogLookupFailed`] inside the resolver; the `Catalog`
/// variant therefore only ever carries transport/decoding failures.
#[derive(Debug, Error)]
pub enum CreatureError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl CreatureError {
    /// The domain rejection, if this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            CreatureError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
