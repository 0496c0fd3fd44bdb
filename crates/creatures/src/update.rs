//! Partial updates.

use serde::Deserialize;

use pokeworld_core::{AccountId, DigimonId, DomainError, PokemonId};

use crate::create::{validate_description, validate_name};
use crate::digimon::Digimon;
use crate::error::CreatureError;
use crate::ownership::authorize_protected_update;
use crate::pokemon::Pokemon;
use crate::store::{AbilityStore, DigimonStore, PokemonStore};
use crate::weight::Weight;

/// Partial update for a Pokemon. Absent fields stay untouched; a present
/// `abilities` list replaces the whole association.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PokemonPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<Weight>,
    pub abilities: Option<Vec<i64>>,
}

/// Partial update for a Digimon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DigimonPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<Weight>,
}

/// Apply a partial update to a Pokemon.
///
/// The ownership gate runs first: a body containing `weight` requires the
/// requester to be the record's creator. Every other field is open to any
/// caller, anonymous included.
pub async fn update_pokemon(
    pokemons: &dyn PokemonStore,
    abilities: &dyn AbilityStore,
    id: PokemonId,
    patch: PokemonPatch,
    requester: Option<AccountId>,
) -> Result<Pokemon, CreatureError> {
    let mut record = pokemons.get(id).await?.ok_or(DomainError::NotFound)?;

    authorize_protected_update(patch.weight.is_some(), record.creator, requester)?;

    if let Some(name) = patch.name {
        validate_name(&name)?;
        if name != record.name {
            if pokemons.find_by_name(&name).await?.is_some() {
                return Err(DomainError::DuplicateName.into());
            }
            record.name = name;
        }
    }
    if let Some(description) = patch.description {
        validate_description(&description)?;
        record.description = description;
    }
    if let Some(weight) = patch.weight {
        record.weight = weight;
    }
    if let Some(ability_ids) = patch.abilities {
        for ability_id in &ability_ids {
            if abilities.get(*ability_id).await?.is_none() {
                return Err(DomainError::validation(format!(
                    "unknown ability id {ability_id}"
                ))
                .into());
            }
        }
        record.abilities = ability_ids;
    }

    pokemons.update(&record).await?;
    Ok(record)
}

/// Apply a partial update to a Digimon. Same gate, no ability association.
pub async fn update_digimon(
    digimons: &dyn DigimonStore,
    id: DigimonId,
    patch: DigimonPatch,
    requester: Option<AccountId>,
) -> Result<Digimon, CreatureError> {
    let mut record = digimons.get(id).await?.ok_or(DomainError::NotFound)?;

    authorize_protected_update(patch.weight.is_some(), record.creator, requester)?;

    if let Some(name) = patch.name {
        validate_name(&name)?;
        if name != record.name {
            if digimons.find_by_name(&name).await?.is_some() {
                return Err(DomainError::DuplicateName.into());
            }
            record.name = name;
        }
    }
    if let Some(description) = patch.description {
        validate_description(&description)?;
        record.description = description;
    }
    if let Some(weight) = patch.weight {
        record.weight = weight;
    }

    digimons.update(&record).await?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Ability;
    use crate::store::tests::{MemoryAbilities, MemoryDigimons, MemoryPokemons};

    fn weight(value: f64) -> Weight {
        Weight::parse(value).unwrap()
    }

    async fn seed_digimon(digimons: &MemoryDigimons, creator: Option<AccountId>) -> Digimon {
        let digimon = Digimon {
            id: DigimonId::new(),
            creator,
            name: "Agumon".to_string(),
            description: "Rookie".to_string(),
            weight: weight(20.0),
        };
        digimons.insert(&digimon).await.unwrap();
        digimon
    }

    async fn seed_pokemon(pokemons: &MemoryPokemons, creator: Option<AccountId>) -> Pokemon {
        let pokemon = Pokemon {
            id: PokemonId::new(),
            creator,
            name: "bulbasaur".to_string(),
            description: "Seed".to_string(),
            weight: weight(6.9),
            abilities: vec![65],
        };
        pokemons.insert(&pokemon).await.unwrap();
        pokemon
    }

    #[tokio::test]
    async fn anyone_may_update_unprotected_fields() {
        let digimons = MemoryDigimons::default();
        let seeded = seed_digimon(&digimons, Some(AccountId::new())).await;

        let patch = DigimonPatch {
            description: Some("Some new description".to_string()),
            ..Default::default()
        };
        let updated = update_digimon(&digimons, seeded.id, patch, None)
            .await
            .unwrap();

        assert_eq!(updated.description, "Some new description");
        assert_eq!(updated.weight, seeded.weight, "other fields untouched");
    }

    #[tokio::test]
    async fn weight_update_by_non_owner_is_forbidden() {
        let digimons = MemoryDigimons::default();
        let seeded = seed_digimon(&digimons, Some(AccountId::new())).await;

        let patch = DigimonPatch {
            weight: Some(weight(54.0)),
            ..Default::default()
        };
        let err = update_digimon(&digimons, seeded.id, patch, Some(AccountId::new()))
            .await
            .unwrap_err();

        assert!(matches!(err.as_domain(), Some(DomainError::Forbidden)));
        let stored = digimons.get(seeded.id).await.unwrap().unwrap();
        assert_eq!(stored.weight, seeded.weight, "denied update writes nothing");
    }

    #[tokio::test]
    async fn weight_update_by_anonymous_is_forbidden() {
        let digimons = MemoryDigimons::default();
        let seeded = seed_digimon(&digimons, Some(AccountId::new())).await;

        let patch = DigimonPatch {
            weight: Some(weight(54.0)),
            ..Default::default()
        };
        let err = update_digimon(&digimons, seeded.id, patch, None)
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Forbidden)));
    }

    #[tokio::test]
    async fn creator_may_update_weight() {
        let digimons = MemoryDigimons::default();
        let creator = AccountId::new();
        let seeded = seed_digimon(&digimons, Some(creator)).await;

        let patch = DigimonPatch {
            weight: Some(weight(54.0)),
            ..Default::default()
        };
        let updated = update_digimon(&digimons, seeded.id, patch, Some(creator))
            .await
            .unwrap();
        assert_eq!(updated.weight, weight(54.0));
    }

    #[tokio::test]
    async fn pokemon_shares_the_same_gate() {
        let pokemons = MemoryPokemons::default();
        let abilities = MemoryAbilities::default();
        let creator = AccountId::new();
        let seeded = seed_pokemon(&pokemons, Some(creator)).await;

        let patch = PokemonPatch {
            weight: Some(weight(54.0)),
            ..Default::default()
        };
        let err = update_pokemon(&pokemons, &abilities, seeded.id, patch.clone(), None)
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Forbidden)));

        let updated = update_pokemon(&pokemons, &abilities, seeded.id, patch, Some(creator))
            .await
            .unwrap();
        assert_eq!(updated.weight, weight(54.0));
    }

    #[tokio::test]
    async fn abilities_are_replaced_wholesale() {
        let pokemons = MemoryPokemons::default();
        let abilities = MemoryAbilities::default();
        abilities
            .insert(&Ability {
                api_obj_id: 34,
                name: "chlorophyll".to_string(),
                effect: "sun speed".to_string(),
                short_effect: "sun speed".to_string(),
            })
            .await
            .unwrap();
        let seeded = seed_pokemon(&pokemons, None).await;

        let patch = PokemonPatch {
            abilities: Some(vec![34]),
            ..Default::default()
        };
        let updated = update_pokemon(&pokemons, &abilities, seeded.id, patch, None)
            .await
            .unwrap();

        assert_eq!(updated.abilities, vec![34], "old association is gone");
    }

    #[tokio::test]
    async fn unknown_ability_id_is_rejected() {
        let pokemons = MemoryPokemons::default();
        let abilities = MemoryAbilities::default();
        let seeded = seed_pokemon(&pokemons, None).await;

        let patch = PokemonPatch {
            abilities: Some(vec![999]),
            ..Default::default()
        };
        let err = update_pokemon(&pokemons, &abilities, seeded.id, patch, None)
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let digimons = MemoryDigimons::default();
        let err = update_digimon(&digimons, DigimonId::new(), DigimonPatch::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn renaming_to_an_existing_name_is_rejected() {
        let digimons = MemoryDigimons::default();
        let first = seed_digimon(&digimons, None).await;
        let second = Digimon {
            id: DigimonId::new(),
            creator: None,
            name: "Gabumon".to_string(),
            description: "Rookie".to_string(),
            weight: weight(25.0),
        };
        digimons.insert(&second).await.unwrap();

        let patch = DigimonPatch {
            name: Some(first.name.clone()),
            ..Default::default()
        };
        let err = update_digimon(&digimons, second.id, patch, None)
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::DuplicateName)));
    }
}
