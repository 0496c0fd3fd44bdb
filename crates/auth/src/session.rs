//! Session login/logout.

use serde::{Deserialize, Serialize};

use pokeworld_core::DomainError;

use crate::account::Account;
use crate::error::AuthError;
use crate::store::{AccountStore, SessionStore};

/// Opaque server-side session token.
///
/// The value carries no claims; it is only a key into the session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh random token (32 hex chars).
    pub fn generate() -> Self {
        let raw: u128 = rand::random();
        Self(format!("{raw:032x}"))
    }

    /// Rebuild from a value presented by a client (e.g. a cookie). No
    /// validation happens here; an unknown token simply resolves to no
    /// session.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authenticate and bind a new session.
///
/// Unknown email and wrong password fail identically with
/// [`DomainError::InvalidCredentials`] so responses cannot be used to
/// enumerate registered emails.
pub async fn login(
    accounts: &dyn AccountStore,
    sessions: &dyn SessionStore,
    email: &str,
    password: &str,
) -> Result<(SessionToken, Account), AuthError> {
    let Some(account) = accounts.find_by_email(email).await? else {
        return Err(DomainError::InvalidCredentials.into());
    };

    if !account.password_hash.verify(password) {
        return Err(DomainError::InvalidCredentials.into());
    }

    let token = SessionToken::generate();
    sessions.insert(&token, account.id).await?;

    tracing::info!(account_id = %account.id, "session opened");
    Ok((token, account))
}

/// Clear a session binding.
///
/// Idempotent: succeeds with no token, an unknown token, or a token whose
/// binding is already gone.
pub async fn logout(
    sessions: &dyn SessionStore,
    token: Option<&SessionToken>,
) -> Result<(), AuthError> {
    if let Some(token) = token {
        sessions.remove(token).await?;
    }
    Ok(())
}
