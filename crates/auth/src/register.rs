//! Registration.

use pokeworld_core::DomainError;

use crate::account::Account;
use crate::error::AuthError;
use crate::password::PasswordHash;
use crate::store::AccountStore;

/// Register a new account.
///
/// Fails with [`DomainError::DuplicateIdentity`] when the email is taken and
/// [`DomainError::SecretMismatch`] when the two passwords differ (exact
/// string equality). On success the account is persisted with the password
/// stored only in hashed form.
pub async fn register(
    accounts: &dyn AccountStore,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Account, AuthError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format").into());
    }

    if password != confirm_password {
        return Err(DomainError::SecretMismatch.into());
    }

    if accounts.find_by_email(email).await?.is_some() {
        return Err(DomainError::DuplicateIdentity.into());
    }

    let account = Account::new(email, PasswordHash::hash(password));
    accounts.insert(&account).await?;

    tracing::info!(account_id = %account.id, "account registered");
    Ok(account)
}
