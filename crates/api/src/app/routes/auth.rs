use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::RequesterContext;
use crate::middleware::SESSION_COOKIE;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let body: dto::RegisterRequest = match dto::parse_body(body) {
        Ok(body) => body,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let account = match pokeworld_auth::register(
        services.accounts.as_ref(),
        &body.email,
        &body.password,
        &body.confirm_password,
    )
    .await
    {
        Ok(account) => account,
        Err(e) => return errors::auth_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::account_to_json(&account))).into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let body: dto::LoginRequest = match dto::parse_body(body) {
        Ok(body) => body,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let (token, _account) = match pokeworld_auth::login(
        services.accounts.as_ref(),
        services.sessions.as_ref(),
        &body.email,
        &body.password,
    )
    .await
    {
        Ok(bound) => bound,
        Err(e) => return errors::auth_error_to_response(e),
    };

    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        token.as_str()
    );
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "detail": "Logged in successfully" })),
    )
        .into_response()
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
) -> axum::response::Response {
    if let Err(e) = pokeworld_auth::logout(services.sessions.as_ref(), requester.token()).await {
        return errors::auth_error_to_response(e);
    }

    // Expire the cookie regardless of whether a binding existed.
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "detail": "Logged out successfully" })),
    )
        .into_response()
}
