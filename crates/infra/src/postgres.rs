//! Postgres store implementations (sqlx).
//!
//! Uniqueness lives in the schema (unique indexes on `accounts.email`,
//! `pokemons.name`, `digimons.name`, and the `abilities` primary key); a
//! violated index surfaces as [`StoreError::Conflict`] so races the domain
//! checks cannot see are still rejected.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use pokeworld_auth::{Account, AccountStore, PasswordHash, SessionStore, SessionToken};
use pokeworld_core::{AccountId, DigimonId, PokemonId, StoreError, StoreResult};
use pokeworld_creatures::{
    Ability, AbilityStore, Digimon, DigimonStore, Pokemon, PokemonStore, Weight,
};

const SCHEMA: &str = include_str!("schema.sql");

fn map_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::conflict(db.constraint().unwrap_or("unique constraint"))
        }
        _ => StoreError::backend(err.to_string()),
    }
}

fn weight_from_row(tenths: i32) -> StoreResult<Weight> {
    Weight::from_tenths(tenths)
        .map_err(|_| StoreError::backend(format!("stored weight out of range: {tenths}")))
}

/// The full set of Postgres-backed stores over one connection pool.
pub struct PgStores {
    pub accounts: Arc<PgAccountStore>,
    pub sessions: Arc<PgSessionStore>,
    pub abilities: Arc<PgAbilityStore>,
    pub pokemons: Arc<PgPokemonStore>,
    pub digimons: Arc<PgDigimonStore>,
}

impl PgStores {
    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Self {
            accounts: Arc::new(PgAccountStore { pool: pool.clone() }),
            sessions: Arc::new(PgSessionStore { pool: pool.clone() }),
            abilities: Arc::new(PgAbilityStore { pool: pool.clone() }),
            pokemons: Arc::new(PgPokemonStore { pool: pool.clone() }),
            digimons: Arc::new(PgDigimonStore { pool }),
        })
    }
}

pub struct PgAccountStore {
    pool: PgPool,
}

fn account_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Account> {
    Ok(Account {
        id: AccountId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_err)?),
        email: row.try_get("email").map_err(map_err)?,
        password_hash: PasswordHash::from_storage(
            row.try_get::<String, _>("password_hash").map_err(map_err)?,
        ),
        created_at: row.try_get("created_at").map_err(map_err)?,
    })
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn insert(&self, account: &Account) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(account.password_hash.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }
}

pub struct PgSessionStore {
    pool: PgPool,
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert(&self, token: &SessionToken, account_id: AccountId) -> StoreResult<()> {
        sqlx::query("INSERT INTO sessions (token, account_id) VALUES ($1, $2)")
            .bind(token.as_str())
            .bind(account_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> StoreResult<Option<AccountId>> {
        let row = sqlx::query("SELECT account_id FROM sessions WHERE token = $1")
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)?;

        row.map(|row| {
            row.try_get::<Uuid, _>("account_id")
                .map(AccountId::from_uuid)
                .map_err(map_err)
        })
        .transpose()
    }

    async fn remove(&self, token: &SessionToken) -> StoreResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }
}

pub struct PgAbilityStore {
    pool: PgPool,
}

fn ability_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Ability> {
    Ok(Ability {
        api_obj_id: row.try_get("api_obj_id").map_err(map_err)?,
        name: row.try_get("name").map_err(map_err)?,
        effect: row.try_get("effect").map_err(map_err)?,
        short_effect: row.try_get("short_effect").map_err(map_err)?,
    })
}

#[async_trait]
impl AbilityStore for PgAbilityStore {
    async fn get(&self, api_obj_id: i64) -> StoreResult<Option<Ability>> {
        let row = sqlx::query(
            "SELECT api_obj_id, name, effect, short_effect FROM abilities WHERE api_obj_id = $1",
        )
        .bind(api_obj_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        row.as_ref().map(ability_from_row).transpose()
    }

    async fn get_many(&self, ids: &[i64]) -> StoreResult<Vec<Ability>> {
        let rows = sqlx::query(
            "SELECT api_obj_id, name, effect, short_effect FROM abilities WHERE api_obj_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;

        let mut by_id = HashMap::with_capacity(rows.len());
        for row in &rows {
            let ability = ability_from_row(row)?;
            by_id.insert(ability.api_obj_id, ability);
        }
        // Re-impose the caller's order; ANY() gives no ordering guarantee.
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn insert(&self, ability: &Ability) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO abilities (api_obj_id, name, effect, short_effect) VALUES ($1, $2, $3, $4)",
        )
        .bind(ability.api_obj_id)
        .bind(&ability.name)
        .bind(&ability.effect)
        .bind(&ability.short_effect)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }
}

pub struct PgPokemonStore {
    pool: PgPool,
}

impl PgPokemonStore {
    async fn ability_ids(&self, id: PokemonId) -> StoreResult<Vec<i64>> {
        let rows = sqlx::query(
            "SELECT ability_id FROM pokemon_abilities WHERE pokemon_id = $1 ORDER BY position",
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;

        rows.iter()
            .map(|row| row.try_get("ability_id").map_err(map_err))
            .collect()
    }

    async fn hydrate(&self, row: &sqlx::postgres::PgRow) -> StoreResult<Pokemon> {
        let id = PokemonId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_err)?);
        Ok(Pokemon {
            id,
            creator: row
                .try_get::<Option<Uuid>, _>("creator")
                .map_err(map_err)?
                .map(AccountId::from_uuid),
            name: row.try_get("name").map_err(map_err)?,
            description: row.try_get("description").map_err(map_err)?,
            weight: weight_from_row(row.try_get("weight_tenths").map_err(map_err)?)?,
            abilities: self.ability_ids(id).await?,
        })
    }
}

#[async_trait]
impl PokemonStore for PgPokemonStore {
    async fn get(&self, id: PokemonId) -> StoreResult<Option<Pokemon>> {
        let row = sqlx::query(
            "SELECT id, creator, name, description, weight_tenths FROM pokemons WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Pokemon>> {
        let row = sqlx::query(
            "SELECT id, creator, name, description, weight_tenths FROM pokemons WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Pokemon>> {
        let rows = sqlx::query(
            "SELECT id, creator, name, description, weight_tenths FROM pokemons ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(self.hydrate(row).await?);
        }
        Ok(out)
    }

    async fn insert(&self, pokemon: &Pokemon) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        sqlx::query(
            "INSERT INTO pokemons (id, creator, name, description, weight_tenths) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(pokemon.id.as_uuid())
        .bind(pokemon.creator.map(|c| *c.as_uuid()))
        .bind(&pokemon.name)
        .bind(&pokemon.description)
        .bind(pokemon.weight.tenths())
        .execute(&mut *tx)
        .await
        .map_err(map_err)?;

        for (position, ability_id) in pokemon.abilities.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pokemon_abilities (pokemon_id, ability_id, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(pokemon.id.as_uuid())
            .bind(ability_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;
        }

        tx.commit().await.map_err(map_err)
    }

    async fn update(&self, pokemon: &Pokemon) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        sqlx::query(
            "UPDATE pokemons SET name = $2, description = $3, weight_tenths = $4 WHERE id = $1",
        )
        .bind(pokemon.id.as_uuid())
        .bind(&pokemon.name)
        .bind(&pokemon.description)
        .bind(pokemon.weight.tenths())
        .execute(&mut *tx)
        .await
        .map_err(map_err)?;

        // The association is replaced wholesale.
        sqlx::query("DELETE FROM pokemon_abilities WHERE pokemon_id = $1")
            .bind(pokemon.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;
        for (position, ability_id) in pokemon.abilities.iter().enumerate() {
            sqlx::query(
                "INSERT INTO pokemon_abilities (pokemon_id, ability_id, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(pokemon.id.as_uuid())
            .bind(ability_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;
        }

        tx.commit().await.map_err(map_err)
    }
}

pub struct PgDigimonStore {
    pool: PgPool,
}

fn digimon_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Digimon> {
    Ok(Digimon {
        id: DigimonId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_err)?),
        creator: row
            .try_get::<Option<Uuid>, _>("creator")
            .map_err(map_err)?
            .map(AccountId::from_uuid),
        name: row.try_get("name").map_err(map_err)?,
        description: row.try_get("description").map_err(map_err)?,
        weight: weight_from_row(row.try_get("weight_tenths").map_err(map_err)?)?,
    })
}

#[async_trait]
impl DigimonStore for PgDigimonStore {
    async fn get(&self, id: DigimonId) -> StoreResult<Option<Digimon>> {
        let row = sqlx::query(
            "SELECT id, creator, name, description, weight_tenths FROM digimons WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        row.as_ref().map(digimon_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Digimon>> {
        let row = sqlx::query(
            "SELECT id, creator, name, description, weight_tenths FROM digimons WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        row.as_ref().map(digimon_from_row).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<Digimon>> {
        let rows = sqlx::query(
            "SELECT id, creator, name, description, weight_tenths FROM digimons ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;

        rows.iter().map(digimon_from_row).collect()
    }

    async fn insert(&self, digimon: &Digimon) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO digimons (id, creator, name, description, weight_tenths) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(digimon.id.as_uuid())
        .bind(digimon.creator.map(|c| *c.as_uuid()))
        .bind(&digimon.name)
        .bind(&digimon.description)
        .bind(digimon.weight.tenths())
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, digimon: &Digimon) -> StoreResult<()> {
        sqlx::query(
            "UPDATE digimons SET name = $2, description = $3, weight_tenths = $4 WHERE id = $1",
        )
        .bind(digimon.id.as_uuid())
        .bind(&digimon.name)
        .bind(&digimon.description)
        .bind(digimon.weight.tenths())
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }
}
