//! Store traits the creature flows depend on.
//!
//! Implementations live in `pokeworld-infra` (in-memory and Postgres).

use async_trait::async_trait;

use pokeworld_core::{DigimonId, PokemonId, StoreResult};

use crate::ability::Ability;
use crate::digimon::Digimon;
use crate::pokemon::Pokemon;

/// Persistence for Pokemon. Name uniqueness is also enforced here (unique
/// index or equivalent) as the cross-request backstop.
#[async_trait]
pub trait PokemonStore: Send + Sync {
    async fn get(&self, id: PokemonId) -> StoreResult<Option<Pokemon>>;

    /// Case-sensitive exact-name lookup.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Pokemon>>;

    async fn list(&self) -> StoreResult<Vec<Pokemon>>;

    async fn insert(&self, pokemon: &Pokemon) -> StoreResult<()>;

    async fn update(&self, pokemon: &Pokemon) -> StoreResult<()>;
}

/// Persistence for Digimon; same contract as [`PokemonStore`].
#[async_trait]
pub trait DigimonStore: Send + Sync {
    async fn get(&self, id: DigimonId) -> StoreResult<Option<Digimon>>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Digimon>>;

    async fn list(&self) -> StoreResult<Vec<Digimon>>;

    async fn insert(&self, digimon: &Digimon) -> StoreResult<()>;

    async fn update(&self, digimon: &Digimon) -> StoreResult<()>;
}

/// Persistence for abilities, keyed by the catalog's own id.
#[async_trait]
pub trait AbilityStore: Send + Sync {
    async fn get(&self, api_obj_id: i64) -> StoreResult<Option<Ability>>;

    /// Resolve ids to rows, preserving input order. Unknown ids are skipped.
    async fn get_many(&self, ids: &[i64]) -> StoreResult<Vec<Ability>>;

    async fn insert(&self, ability: &Ability) -> StoreResult<()>;
}
