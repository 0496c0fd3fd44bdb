//! `pokeworld-catalog` — client for the external creature catalog.
//!
//! The rest of the system talks to the catalog through the [`CatalogClient`]
//! trait; the PokeAPI-backed implementation lives in [`pokeapi`] and tests
//! substitute their own.

pub mod client;
pub mod names;
pub mod pokeapi;

pub use client::{
    AbilityDetail, AbilityRef, CatalogClient, CatalogError, CreaturePayload, EffectEntry,
    NamedResource,
};
pub use names::KnownNames;
pub use pokeapi::PokeApiClient;
