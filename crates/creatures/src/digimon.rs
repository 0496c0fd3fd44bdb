//! Digimon records.

use serde::{Deserialize, Serialize};

use pokeworld_core::{AccountId, DigimonId, Entity};

use crate::weight::Weight;

/// A user-submitted Digimon.
///
/// Same shape and rules as [`crate::Pokemon`] except that Digimon have no
/// catalog behind them, so there is no ability association and creation
/// never performs a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digimon {
    pub id: DigimonId,
    pub creator: Option<AccountId>,
    pub name: String,
    pub description: String,
    pub weight: Weight,
}

impl Entity for Digimon {
    type Id = DigimonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
