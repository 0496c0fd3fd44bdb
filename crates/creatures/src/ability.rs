//! Ability records imported from the catalog.

use serde::{Deserialize, Serialize};

use pokeworld_core::Entity;

/// A creature ability.
///
/// `api_obj_id` is the ability's id in the external catalog and doubles as
/// the primary key here, which is what prevents importing the same ability
/// twice. Rows are written once, the first time any creature references the
/// catalog ability, and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub api_obj_id: i64,
    pub name: String,
    pub effect: String,
    pub short_effect: String,
}

impl Entity for Ability {
    type Id = i64;

    fn id(&self) -> &Self::Id {
        &self.api_obj_id
    }
}

impl core::fmt::Display for Ability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.name, self.short_effect)
    }
}
