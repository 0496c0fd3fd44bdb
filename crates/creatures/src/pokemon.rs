//! Pokemon records.

use serde::{Deserialize, Serialize};

use pokeworld_core::{AccountId, Entity, PokemonId};

use crate::weight::Weight;

/// A user-submitted Pokemon.
///
/// # Invariants
/// - `name` is unique among Pokemon (checked before persistence, backed by
///   a storage constraint).
/// - `creator` is set once at creation from the requester identity and never
///   reassigned; it becomes `None` if the account is later removed.
/// - `abilities` holds catalog ability ids in association order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    pub creator: Option<AccountId>,
    pub name: String,
    pub description: String,
    pub weight: Weight,
    pub abilities: Vec<i64>,
}

impl Entity for Pokemon {
    type Id = PokemonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
