//! In-memory store implementations (dev/test).
//!
//! Plain maps behind a `Mutex`. The same uniqueness rules the Postgres
//! schema enforces with indexes are enforced here on insert, so the two
//! backends reject the same writes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use pokeworld_auth::{Account, AccountStore, SessionStore, SessionToken};
use pokeworld_core::{AccountId, DigimonId, PokemonId, StoreError, StoreResult};
use pokeworld_creatures::{Ability, AbilityStore, Digimon, DigimonStore, Pokemon, PokemonStore};

#[derive(Default)]
pub struct InMemoryAccountStore {
    rows: Mutex<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn insert(&self, account: &Account) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|a| a.email == account.email) {
            return Err(StoreError::conflict("accounts.email"));
        }
        rows.insert(account.id, account.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    bindings: Mutex<HashMap<SessionToken, AccountId>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: &SessionToken, account_id: AccountId) -> StoreResult<()> {
        self.bindings
            .lock()
            .unwrap()
            .insert(token.clone(), account_id);
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> StoreResult<Option<AccountId>> {
        Ok(self.bindings.lock().unwrap().get(token).copied())
    }

    async fn remove(&self, token: &SessionToken) -> StoreResult<()> {
        self.bindings.lock().unwrap().remove(token);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAbilityStore {
    rows: Mutex<HashMap<i64, Ability>>,
}

impl InMemoryAbilityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AbilityStore for InMemoryAbilityStore {
    async fn get(&self, api_obj_id: i64) -> StoreResult<Option<Ability>> {
        Ok(self.rows.lock().unwrap().get(&api_obj_id).cloned())
    }

    async fn get_many(&self, ids: &[i64]) -> StoreResult<Vec<Ability>> {
        let rows = self.rows.lock().unwrap();
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn insert(&self, ability: &Ability) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&ability.api_obj_id) {
            return Err(StoreError::conflict("abilities.api_obj_id"));
        }
        rows.insert(ability.api_obj_id, ability.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPokemonStore {
    rows: Mutex<HashMap<PokemonId, Pokemon>>,
}

impl InMemoryPokemonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PokemonStore for InMemoryPokemonStore {
    async fn get(&self, id: PokemonId) -> StoreResult<Option<Pokemon>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Pokemon>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Pokemon>> {
        let mut rows: Vec<Pokemon> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        Ok(rows)
    }

    async fn insert(&self, pokemon: &Pokemon) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|p| p.name == pokemon.name) {
            return Err(StoreError::conflict("pokemons.name"));
        }
        rows.insert(pokemon.id, pokemon.clone());
        Ok(())
    }

    async fn update(&self, pokemon: &Pokemon) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|p| p.name == pokemon.name && p.id != pokemon.id)
        {
            return Err(StoreError::conflict("pokemons.name"));
        }
        rows.insert(pokemon.id, pokemon.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDigimonStore {
    rows: Mutex<HashMap<DigimonId, Digimon>>,
}

impl InMemoryDigimonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DigimonStore for InMemoryDigimonStore {
    async fn get(&self, id: DigimonId) -> StoreResult<Option<Digimon>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Digimon>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Digimon>> {
        let mut rows: Vec<Digimon> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        Ok(rows)
    }

    async fn insert(&self, digimon: &Digimon) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|d| d.name == digimon.name) {
            return Err(StoreError::conflict("digimons.name"));
        }
        rows.insert(digimon.id, digimon.clone());
        Ok(())
    }

    async fn update(&self, digimon: &Digimon) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|d| d.name == digimon.name && d.id != digimon.id)
        {
            return Err(StoreError::conflict("digimons.name"));
        }
        rows.insert(digimon.id, digimon.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pokeworld_auth::PasswordHash;
    use pokeworld_creatures::Weight;

    use super::*;

    #[tokio::test]
    async fn duplicate_email_insert_conflicts() {
        let store = InMemoryAccountStore::new();
        store
            .insert(&Account::new("a@x.com", PasswordHash::hash("p")))
            .await
            .unwrap();

        let err = store
            .insert(&Account::new("a@x.com", PasswordHash::hash("q")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_pokemon_name_insert_conflicts() {
        let store = InMemoryPokemonStore::new();
        let pokemon = Pokemon {
            id: PokemonId::new(),
            creator: None,
            name: "bulbasaur".to_string(),
            description: String::new(),
            weight: Weight::parse(6.9).unwrap(),
            abilities: vec![],
        };
        store.insert(&pokemon).await.unwrap();

        let clash = Pokemon {
            id: PokemonId::new(),
            ..pokemon.clone()
        };
        let err = store.insert(&clash).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Updating the original row itself is fine.
        store.update(&pokemon).await.unwrap();
    }

    #[tokio::test]
    async fn get_many_preserves_request_order() {
        let store = InMemoryAbilityStore::new();
        for (id, name) in [(65, "overgrow"), (34, "chlorophyll")] {
            store
                .insert(&Ability {
                    api_obj_id: id,
                    name: name.to_string(),
                    effect: String::new(),
                    short_effect: String::new(),
                })
                .await
                .unwrap();
        }

        let rows = store.get_many(&[34, 65]).await.unwrap();
        assert_eq!(
            rows.iter().map(|a| a.api_obj_id).collect::<Vec<_>>(),
            vec![34, 65]
        );
    }
}
