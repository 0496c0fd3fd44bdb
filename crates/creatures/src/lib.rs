//! `pokeworld-creatures` — creature records and the rules around them.
//!
//! Holds the Pokemon/Digimon/Ability models, the ability resolver with its
//! local dedup cache, the shared ownership predicate for protected-field
//! updates, and the creation/update flows. Storage and the catalog are
//! reached only through traits, so every rule here is testable without a
//! database or network.

pub mod ability;
pub mod create;
pub mod digimon;
pub mod error;
pub mod ownership;
pub mod pokemon;
pub mod resolver;
pub mod store;
pub mod update;
pub mod weight;

pub use ability::Ability;
pub use create::{create_digimon, create_pokemon, NewCreature};
pub use digimon::Digimon;
pub use error::CreatureError;
pub use ownership::authorize_protected_update;
pub use pokemon::Pokemon;
pub use resolver::{resolve_abilities, ResolvedAbilities};
pub use store::{AbilityStore, DigimonStore, PokemonStore};
pub use update::{update_digimon, update_pokemon, DigimonPatch, PokemonPatch};
pub use weight::Weight;
