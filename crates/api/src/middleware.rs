use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use pokeworld_auth::{SessionStore, SessionToken};

use crate::context::RequesterContext;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionid";

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<dyn SessionStore>,
}

/// Resolve the session cookie (if any) into a [`RequesterContext`].
///
/// Never rejects: no cookie, an unknown token, or a session-store failure
/// all degrade to an anonymous context. Authentication *requirements* are
/// the handlers' business.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = match extract_session_cookie(req.headers()) {
        None => RequesterContext::anonymous(),
        Some(raw) => {
            let token = SessionToken::from_raw(raw);
            match state.sessions.get(&token).await {
                Ok(Some(account_id)) => RequesterContext::authenticated(account_id, token),
                Ok(None) => RequesterContext::stale(token),
                Err(e) => {
                    tracing::warn!("session lookup failed: {e}");
                    RequesterContext::stale(token)
                }
            }
        }
    };

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(header::COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            let value = pair
                .trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='));
            if let Some(value) = value {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sessionid=abc123; lang=en"),
        );
        assert_eq!(extract_session_cookie(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn absent_or_empty_cookie_is_none() {
        assert_eq!(extract_session_cookie(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionid="));
        assert_eq!(extract_session_cookie(&headers), None);
    }
}
