//! Ownership gate for protected-field updates.

use pokeworld_core::{AccountId, DomainError};

/// Decide whether an update touching the protected field may proceed.
///
/// The one rule, shared by every creature type:
/// the protected field (`weight`) may only be changed by the record's
/// creator. Everything else is open to any caller, authenticated or not.
///
/// Denials are [`DomainError::Forbidden`] for anonymous and
/// wrong-account callers alike — not `Unauthenticated`, which would imply
/// that logging in as just any account were enough.
///
/// - No IO
/// - No panics
/// - No business logic beyond the policy itself
pub fn authorize_protected_update(
    protected_in_request: bool,
    owner: Option<AccountId>,
    requester: Option<AccountId>,
) -> Result<(), DomainError> {
    if !protected_in_request {
        return Ok(());
    }

    match (owner, requester) {
        (Some(owner), Some(requester)) if owner == requester => Ok(()),
        // Anonymous never equals an owner, and an orphaned record
        // (creator cleared) has no owner anyone could match.
        _ => Err(DomainError::Forbidden),
    }
}
