use pokeworld_auth::SessionToken;
use pokeworld_core::AccountId;

/// Requester context for a request.
///
/// Always present — the session middleware inserts one on every request,
/// anonymous or not. Handlers that require authentication check
/// [`RequesterContext::account_id`] themselves; routes open to anonymous
/// callers just read whatever is there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequesterContext {
    account_id: Option<AccountId>,
    token: Option<SessionToken>,
}

impl RequesterContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(account_id: AccountId, token: SessionToken) -> Self {
        Self {
            account_id: Some(account_id),
            token: Some(token),
        }
    }

    /// A token was presented but resolved to no session; keep it around so
    /// logout can still clear the cookie idempotently.
    pub fn stale(token: SessionToken) -> Self {
        Self {
            account_id: None,
            token: Some(token),
        }
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }
}
