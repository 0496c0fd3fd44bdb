use std::sync::Arc;

use pokeworld_auth::{AccountStore, SessionStore};
use pokeworld_catalog::{CatalogClient, KnownNames};
use pokeworld_creatures::{AbilityStore, DigimonStore, PokemonStore};
use pokeworld_infra::{
    InMemoryAbilityStore, InMemoryAccountStore, InMemoryDigimonStore, InMemoryPokemonStore,
    InMemorySessionStore, PgStores,
};

/// Everything the handlers need, behind the store/catalog seams.
pub struct AppServices {
    pub accounts: Arc<dyn AccountStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub abilities: Arc<dyn AbilityStore>,
    pub pokemons: Arc<dyn PokemonStore>,
    pub digimons: Arc<dyn DigimonStore>,
    pub catalog: Arc<dyn CatalogClient>,
    pub known_names: KnownNames,
}

/// Wire services against the configured backend.
///
/// `USE_PERSISTENT_STORES=true` selects Postgres (requires `DATABASE_URL`);
/// anything else runs on in-memory stores for dev/test.
pub async fn build_services(
    catalog: Arc<dyn CatalogClient>,
    known_names: KnownNames,
) -> anyhow::Result<AppServices> {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true"))?;
        let stores = PgStores::connect(&database_url).await?;
        tracing::info!("using Postgres stores");
        return Ok(AppServices {
            accounts: stores.accounts,
            sessions: stores.sessions,
            abilities: stores.abilities,
            pokemons: stores.pokemons,
            digimons: stores.digimons,
            catalog,
            known_names,
        });
    }

    tracing::info!("using in-memory stores (dev/test)");
    Ok(in_memory_services(catalog, known_names))
}

/// In-memory wiring, also used directly by the black-box tests.
pub fn in_memory_services(catalog: Arc<dyn CatalogClient>, known_names: KnownNames) -> AppServices {
    AppServices {
        accounts: Arc::new(InMemoryAccountStore::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
        abilities: Arc::new(InMemoryAbilityStore::new()),
        pokemons: Arc::new(InMemoryPokemonStore::new()),
        digimons: Arc::new(InMemoryDigimonStore::new()),
        catalog,
        known_names,
    }
}
