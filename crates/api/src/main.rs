use std::sync::Arc;

use anyhow::Context;

use pokeworld_api::app::{build_app, services};
use pokeworld_catalog::{CatalogClient, KnownNames, PokeApiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pokeworld_observability::init();

    let catalog: Arc<dyn CatalogClient> = match std::env::var("POKEAPI_BASE_URL") {
        Ok(base_url) => Arc::new(PokeApiClient::with_base_url(base_url)),
        Err(_) => Arc::new(PokeApiClient::new()),
    };

    // The allow-list is a startup dependency: without it no creation request
    // can be validated, so failing here fails the process.
    let known_names = KnownNames::fetch(catalog.as_ref())
        .await
        .context("failed to fetch the catalog name list")?;
    tracing::info!(count = known_names.len(), "catalog name list loaded");

    let services = Arc::new(services::build_services(catalog, known_names).await?);
    let app = build_app(services);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
