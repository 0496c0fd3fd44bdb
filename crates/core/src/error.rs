//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// conflicts, policy denials). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An account with the submitted email already exists.
    #[error("an account with that email already exists")]
    DuplicateIdentity,

    /// The two submitted passwords differ.
    #[error("passwords do not match")]
    SecretMismatch,

    /// Login failed. Unknown email and wrong password both map here so the
    /// response never reveals which one it was.
    #[error("credentials do not match")]
    InvalidCredentials,

    /// A creature of the same resource type already has that name.
    #[error("a creature with that name already exists")]
    DuplicateName,

    /// The name is not in the catalog's known-name list.
    #[error("that name does not match any known creature")]
    UnknownCatalogName,

    /// The catalog has no creature under that name.
    #[error("that name does not match any creature in the catalog")]
    CatalogLookupFailed,

    /// Ownership policy denial. Distinct from `Unauthenticated`: logging in
    /// as an arbitrary account would not make the request allowed.
    #[error("the weight field may only be changed by the record's creator")]
    Forbidden,

    /// No authenticated requester where one is required.
    #[error("authentication required")]
    Unauthenticated,

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
