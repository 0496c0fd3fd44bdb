use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use pokeworld_core::{DigimonId, DomainError};
use pokeworld_creatures::{create_digimon, update_digimon, DigimonPatch};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::RequesterContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(retrieve).patch(update))
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let Some(account_id) = requester.account_id() else {
        return errors::domain_error_to_response(DomainError::Unauthenticated);
    };
    let body: dto::CreateCreatureRequest = match dto::parse_body(body) {
        Ok(body) => body,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match create_digimon(services.digimons.as_ref(), body.into(), account_id).await {
        Ok(digimon) => {
            (StatusCode::CREATED, Json(dto::digimon_to_json(&digimon))).into_response()
        }
        Err(e) => errors::creature_error_to_response(e),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> axum::response::Response {
    let id: DigimonId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let patch: DigimonPatch = match dto::parse_body(patch) {
        Ok(patch) => patch,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match update_digimon(services.digimons.as_ref(), id, patch, requester.account_id()).await {
        Ok(digimon) => (StatusCode::OK, Json(dto::digimon_to_json(&digimon))).into_response(),
        Err(e) => errors::creature_error_to_response(e),
    }
}

pub async fn retrieve(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DigimonId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.digimons.get(id).await {
        Ok(Some(digimon)) => (StatusCode::OK, Json(dto::digimon_to_json(&digimon))).into_response(),
        Ok(None) => errors::domain_error_to_response(DomainError::NotFound),
        Err(e) => errors::creature_error_to_response(e.into()),
    }
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.digimons.list().await {
        Ok(digimons) => {
            let items: Vec<_> = digimons.iter().map(dto::digimon_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::creature_error_to_response(e.into()),
    }
}
