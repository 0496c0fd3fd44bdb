//! Creature creation flows.

use serde::Deserialize;

use pokeworld_catalog::{CatalogClient, KnownNames};
use pokeworld_core::{AccountId, DigimonId, DomainError, DomainResult, PokemonId};

use crate::digimon::Digimon;
use crate::error::CreatureError;
use crate::pokemon::Pokemon;
use crate::resolver::resolve_abilities;
use crate::store::{AbilityStore, DigimonStore, PokemonStore};
use crate::weight::Weight;

const NAME_MAX: usize = 75;
const DESCRIPTION_MAX: usize = 250;

/// Creation input, shared by both creature types.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCreature {
    pub name: String,
    pub description: String,
    pub weight: Weight,
}

pub(crate) fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    if name.chars().count() > NAME_MAX {
        return Err(DomainError::validation(format!(
            "name must be at most {NAME_MAX} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> DomainResult<()> {
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(DomainError::validation(format!(
            "description must be at most {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(())
}

/// Create a Pokemon for an authenticated requester.
///
/// Rejects duplicate names, then names the catalog has never heard of (the
/// allow-list check — no network call happens for those), then resolves the
/// ability set and persists with `creator = requester`.
pub async fn create_pokemon(
    pokemons: &dyn PokemonStore,
    abilities: &dyn AbilityStore,
    catalog: &dyn CatalogClient,
    known_names: &KnownNames,
    input: NewCreature,
    requester: AccountId,
) -> Result<Pokemon, CreatureError> {
    validate_name(&input.name)?;
    validate_description(&input.description)?;

    if pokemons.find_by_name(&input.name).await?.is_some() {
        return Err(DomainError::DuplicateName.into());
    }

    if !known_names.contains(&input.name) {
        return Err(DomainError::UnknownCatalogName.into());
    }

    let resolved = resolve_abilities(pokemons, abilities, catalog, &input.name).await?;

    let pokemon = Pokemon {
        id: PokemonId::new(),
        creator: Some(requester),
        name: input.name,
        description: input.description,
        weight: input.weight,
        abilities: resolved
            .abilities()
            .iter()
            .map(|a| a.api_obj_id)
            .collect(),
    };
    pokemons.insert(&pokemon).await?;

    tracing::info!(pokemon_id = %pokemon.id, name = %pokemon.name, "pokemon created");
    Ok(pokemon)
}

/// Create a Digimon for an authenticated requester.
///
/// No catalog is involved: only the duplicate-name rule applies, and the
/// record has no ability association.
pub async fn create_digimon(
    digimons: &dyn DigimonStore,
    input: NewCreature,
    requester: AccountId,
) -> Result<Digimon, CreatureError> {
    validate_name(&input.name)?;
    validate_description(&input.description)?;

    if digimons.find_by_name(&input.name).await?.is_some() {
        return Err(DomainError::DuplicateName.into());
    }

    let digimon = Digimon {
        id: DigimonId::new(),
        creator: Some(requester),
        name: input.name,
        description: input.description,
        weight: input.weight,
    };
    digimons.insert(&digimon).await?;

    tracing::info!(digimon_id = %digimon.id, name = %digimon.name, "digimon created");
    Ok(digimon)
}
