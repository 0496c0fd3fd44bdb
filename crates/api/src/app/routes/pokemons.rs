use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use pokeworld_core::{DomainError, PokemonId, StoreResult};
use pokeworld_creatures::{create_pokemon, update_pokemon, Pokemon, PokemonPatch};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::RequesterContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(retrieve).patch(update))
}

async fn to_response(
    services: &AppServices,
    pokemon: &Pokemon,
) -> StoreResult<dto::PokemonResponse> {
    let abilities = services.abilities.get_many(&pokemon.abilities).await?;
    Ok(dto::pokemon_to_json(pokemon, abilities))
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

    let pokemon = match create_pokemon(
        services.pokemons.as_ref(),
        services.abilities.as_ref(),
        services.catalog.as_ref(),
        &services.known_names,
        body.into(),
        account_id,
    )
    .await
    {
        Ok(pokemon) => pokemon,
        Err(e) => return errors::creature_error_to_response(e),
    };

    match to_response(&services, &pokemon).await {
        Ok(json) => (StatusCode::CREATED, Json(json)).into_response(),
        Err(e) => errors::creature_error_to_response(e.into()),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(requester): Extension<RequesterContext>,
    Path(id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> axum::response::Response {
    let id: PokemonId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let patch: PokemonPatch = match dto::parse_body(patch) {
        Ok(patch) => patch,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let pokemon = match update_pokemon(
        services.pokemons.as_ref(),
        services.abilities.as_ref(),
        id,
        patch,
        requester.account_id(),
    )
    .await
    {
        Ok(pokemon) => pokemon,
        Err(e) => return errors::creature_error_to_response(e),
    };

    match to_response(&services, &pokemon).await {
        Ok(json) => (StatusCode::OK, Json(json)).into_response(),
        Err(e) => errors::creature_error_to_response(e.into()),
    }
}

pub async fn retrieve(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PokemonId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let pokemon = match services.pokemons.get(id).await {
        Ok(Some(pokemon)) => pokemon,
        Ok(None) => return errors::domain_error_to_response(DomainError::NotFound),
        Err(e) => return errors::creature_error_to_response(e.into()),
    };

    match to_response(&services, &pokemon).await {
        Ok(json) => (StatusCode::OK, Json(json)).into_response(),
        Err(e) => errors::creature_error_to_response(e.into()),
    }
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let pokemons = match services.pokemons.list().await {
        Ok(pokemons) => pokemons,
        Err(e) => return errors::creature_error_to_response(e.into()),
    };

    let mut items = Vec::with_capacity(pokemons.len());
    for pokemon in &pokemons {
        match to_response(&services, pokemon).await {
            Ok(json) => items.push(json),
            Err(e) => return errors::creature_error_to_response(e.into()),
        }
    }
    (StatusCode::OK, Json(items)).into_response()
}
