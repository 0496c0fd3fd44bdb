//! Store traits the auth flows depend on.
//!
//! Implementations live in `pokeworld-infra` (in-memory and Postgres).

use async_trait::async_trait;

use pokeworld_core::{AccountId, StoreResult};

use crate::account::Account;
use crate::session::SessionToken;

/// Persistence for accounts. Email uniqueness is also enforced here (unique
/// index or equivalent) as the cross-request backstop.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn insert(&self, account: &Account) -> StoreResult<()>;
}

/// Server-side session bindings: opaque token -> account.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: &SessionToken, account_id: AccountId) -> StoreResult<()>;

    async fn get(&self, token: &SessionToken) -> StoreResult<Option<AccountId>>;

    /// Remove the binding if present; removing an unknown token is not an
    /// error.
    async fn remove(&self, token: &SessionToken) -> StoreResult<()>;
}

#[cfg(test)]
pub(crate) mod tests {
    //! Minimal map-backed stores for exercising the flows in this crate.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryAccounts {
        by_email: Mutex<HashMap<String, Account>>,
    }

    #[async_trait]
    impl AccountStore for MemoryAccounts {
        async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
            Ok(self.by_email.lock().unwrap().get(email).cloned())
        }

        async fn insert(&self, account: &Account) -> StoreResult<()> {
            self.by_email
                .lock()
                .unwrap()
                .insert(account.email.clone(), account.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemorySessions {
        bindings: Mutex<HashMap<SessionToken, AccountId>>,
    }

    #[async_trait]
    impl SessionStore for MemorySessions {
        async fn insert(&self, token: &SessionToken, account_id: AccountId) -> StoreResult<()> {
            self.bindings
                .lock()
                .unwrap()
                .insert(token.clone(), account_id);
            Ok(())
        }

        async fn get(&self, token: &SessionToken) -> StoreResult<Option<AccountId>> {
            Ok(self.bindings.lock().unwrap().get(token).copied())
        }

        async fn remove(&self, token: &SessionToken) -> StoreResult<()> {
            self.bindings.lock().unwrap().remove(token);
            Ok(())
        }
    }
}
