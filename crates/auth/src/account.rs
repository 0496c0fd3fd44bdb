//! Account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pokeworld_core::{AccountId, Entity};

use crate::password::PasswordHash;

/// A registered account.
///
/// # Invariants
/// - `email` is unique across accounts and doubles as the login name.
/// - `password_hash` never holds the clear-text secret.
/// - Nothing in this crate mutates an account after creation; removal is an
///   external administrative action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: impl Into<String>, password_hash: PasswordHash) -> Self {
        Self {
            id: AccountId::new(),
            email: email.into(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
