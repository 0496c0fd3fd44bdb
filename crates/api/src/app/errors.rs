use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pokeworld_auth::AuthError;
use pokeworld_core::{DomainError, StoreError};
use pokeworld_creatures::CreatureError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::DuplicateIdentity => {
            json_error(StatusCode::BAD_REQUEST, "duplicate_identity", message)
        }
        DomainError::SecretMismatch => {
            json_error(StatusCode::BAD_REQUEST, "secret_mismatch", message)
        }
        DomainError::InvalidCredentials => {
            json_error(StatusCode::BAD_REQUEST, "invalid_credentials", message)
        }
        DomainError::DuplicateName => json_error(StatusCode::BAD_REQUEST, "duplicate_name", message),
        DomainError::UnknownCatalogName => {
            json_error(StatusCode::BAD_REQUEST, "unknown_name", message)
        }
        DomainError::CatalogLookupFailed => {
            json_error(StatusCode::BAD_REQUEST, "catalog_miss", message)
        }
        DomainError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", message),
        DomainError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "not_authenticated", message)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
    }
}

fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        // The domain checked first; a constraint firing anyway means a
        // concurrent writer won the race.
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Backend(msg) => {
            tracing::error!("storage failure: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage failure")
        }
    }
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Domain(e) => domain_error_to_response(e),
        AuthError::Store(e) => store_error_to_response(e),
    }
}

pub fn creature_error_to_response(err: CreatureError) -> axum::response::Response {
    match err {
        CreatureError::Domain(e) => domain_error_to_response(e),
        CreatureError::Store(e) => store_error_to_response(e),
        CreatureError::Catalog(e) => {
            tracing::error!("catalog failure: {e}");
            json_error(StatusCode::BAD_GATEWAY, "catalog_error", "catalog unavailable")
        }
    }
}
