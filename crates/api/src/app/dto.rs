use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use pokeworld_auth::Account;
use pokeworld_core::{DomainError, DomainResult};
use pokeworld_creatures::{Ability, Digimon, NewCreature, Pokemon, Weight};

/// Decode a request body that already parsed as JSON.
///
/// Field-level failures (missing field, malformed weight) come back as
/// domain validation errors so the HTTP layer answers with the structured
/// 400 shape instead of a bare rejection.
pub fn parse_body<T: DeserializeOwned>(value: serde_json::Value) -> DomainResult<T> {
    serde_json::from_value(value).map_err(|e| DomainError::validation(e.to_string()))
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCreatureRequest {
    pub name: String,
    pub description: String,
    pub weight: Weight,
}

impl From<CreateCreatureRequest> for NewCreature {
    fn from(req: CreateCreatureRequest) -> Self {
        NewCreature {
            name: req.name,
            description: req.description,
            weight: req.weight,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub email: String,
}

pub fn account_to_json(account: &Account) -> AccountSummary {
    AccountSummary {
        id: account.id.to_string(),
        email: account.email.clone(),
    }
}

#[derive(Debug, Serialize)]
pub struct AbilityResponse {
    pub api_obj_id: i64,
    pub name: String,
    pub effect: String,
    pub short_effect: String,
}

#[derive(Debug, Serialize)]
pub struct PokemonResponse {
    pub id: String,
    pub creator: Option<String>,
    pub name: String,
    pub description: String,
    pub weight: Weight,
    pub abilities: Vec<AbilityResponse>,
}

/// Abilities arrive pre-fetched; handlers resolve the id association through
/// the ability store before mapping.
pub fn pokemon_to_json(pokemon: &Pokemon, abilities: Vec<Ability>) -> PokemonResponse {
    PokemonResponse {
        id: pokemon.id.to_string(),
        creator: pokemon.creator.map(|c| c.to_string()),
        name: pokemon.name.clone(),
        description: pokemon.description.clone(),
        weight: pokemon.weight,
        abilities: abilities
            .into_iter()
            .map(|a| AbilityResponse {
                api_obj_id: a.api_obj_id,
                name: a.name,
                effect: a.effect,
                short_effect: a.short_effect,
            })
            .collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct DigimonResponse {
    pub id: String,
    pub creator: Option<String>,
    pub name: String,
    pub description: String,
    pub weight: Weight,
}

pub fn digimon_to_json(digimon: &Digimon) -> DigimonResponse {
    DigimonResponse {
        id: digimon.id.to_string(),
        creator: digimon.creator.map(|c| c.to_string()),
        name: digimon.name.clone(),
        description: digimon.description.clone(),
        weight: digimon.weight,
    }
}
