//! Ability resolution with a local dedup cache.

use pokeworld_catalog::{AbilityDetail, CatalogClient, CatalogError};
use pokeworld_core::DomainError;

use crate::ability::Ability;
use crate::error::CreatureError;
use crate::store::{AbilityStore, PokemonStore};

/// How a Pokemon's abilities were obtained.
///
/// The two paths are kept distinct in the result so callers (and tests) can
/// tell a cache hit from a round trip to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAbilities {
    /// A Pokemon of the same name already existed locally; these are its
    /// stored rows, in association order.
    LocalHit(Vec<Ability>),
    /// The catalog was consulted; rows are in the payload's reference
    /// order, one per reference.
    Fetched(Vec<Ability>),
}

impl ResolvedAbilities {
    pub fn into_abilities(self) -> Vec<Ability> {
        match self {
            ResolvedAbilities::LocalHit(rows) | ResolvedAbilities::Fetched(rows) => rows,
        }
    }

    pub fn abilities(&self) -> &[Ability] {
        match self {
            ResolvedAbilities::LocalHit(rows) | ResolvedAbilities::Fetched(rows) => rows,
        }
    }
}

/// Resolve the ability set for a creature name.
///
/// Prefers the associations of an already-stored Pokemon with the same name
/// (case-sensitive); otherwise asks the catalog and persists any ability not
/// seen locally before, keyed by the catalog's own id so a second sighting
/// reuses the stored row verbatim — even when the freshly fetched text
/// differs.
///
/// A catalog miss on the creature lookup becomes
/// [`DomainError::CatalogLookupFailed`] and leaves storage untouched. The
/// per-ability detail fetches have no such translation; the catalog is
/// expected to answer for references it handed out itself.
pub async fn resolve_abilities(
    pokemons: &dyn PokemonStore,
    abilities: &dyn AbilityStore,
    catalog: &dyn CatalogClient,
    name: &str,
) -> Result<ResolvedAbilities, CreatureError> {
    if let Some(existing) = pokemons.find_by_name(name).await? {
        let rows = abilities.get_many(&existing.abilities).await?;
        return Ok(ResolvedAbilities::LocalHit(rows));
    }

    let payload = match catalog.creature_detail(name).await {
        Ok(payload) => payload,
        Err(CatalogError::NotFound) => return Err(DomainError::CatalogLookupFailed.into()),
        Err(other) => return Err(other.into()),
    };

    let mut rows = Vec::with_capacity(payload.abilities.len());
    for entry in &payload.abilities {
        let detail = catalog.ability_detail(&entry.ability.url).await?;
        let row = match abilities.get(detail.id).await? {
            // Reuse the stored row untouched; imported text is immutable.
            Some(existing) => existing,
            None => {
                let row = ability_from_detail(detail)?;
                abilities.insert(&row).await?;
                row
            }
        };
        rows.push(row);
    }

    Ok(ResolvedAbilities::Fetched(rows))
}

fn ability_from_detail(detail: AbilityDetail) -> Result<Ability, CreatureError> {
    let entry = detail.effect_entries.into_iter().next().ok_or_else(|| {
        CatalogError::Malformed(format!("ability {} has no effect entries", detail.id))
    })?;

    Ok(Ability {
        api_obj_id: detail.id,
        name: detail.name,
        effect: entry.effect,
        short_effect: entry.short_effect,
    })
}
