//! `pokeworld-infra` — storage implementations.
//!
//! Every store trait from `pokeworld-auth` and `pokeworld-creatures` comes in
//! two flavours: an in-memory map for dev/test and a Postgres-backed one for
//! real deployments. Which one a process uses is decided in the API crate's
//! service wiring.

pub mod memory;
pub mod postgres;

pub use memory::{
    InMemoryAbilityStore, InMemoryAccountStore, InMemoryDigimonStore, InMemoryPokemonStore,
    InMemorySessionStore,
};
pub use postgres::PgStores;
