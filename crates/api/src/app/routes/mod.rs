use axum::Router;

pub mod auth;
pub mod digimons;
pub mod pokemons;
pub mod system;

/// Router for all domain endpoints. Authentication requirements are decided
/// per handler; the session middleware only annotates requests.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/pokemons", pokemons::router())
        .nest("/digimons", digimons::router())
}
