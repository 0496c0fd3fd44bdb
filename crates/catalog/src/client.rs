//! Catalog client contract and wire payloads.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no creature under the requested name. Only the
    /// creature lookup produces this; ability detail fetches are expected
    /// to succeed for any reference the catalog itself handed out.
    #[error("creature not found in catalog")]
    NotFound,

    /// Transport-level failure (connect, timeout, non-2xx).
    #[error("catalog request failed: {0}")]
    Request(String),

    /// The catalog answered with a payload we could not decode.
    #[error("catalog returned a malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            CatalogError::Malformed(error.to_string())
        } else {
            CatalogError::Request(error.to_string())
        }
    }
}

/// A `{name, url}` reference as the catalog returns them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One entry of a creature's ability list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityRef {
    pub ability: NamedResource,
}

/// Creature detail payload. Only the ability references matter here; the
/// catalog sends plenty more that we never look at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreaturePayload {
    pub abilities: Vec<AbilityRef>,
}

/// One effect entry of an ability detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectEntry {
    pub effect: String,
    pub short_effect: String,
}

/// Ability detail payload, fetched through the reference's own locator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityDetail {
    pub id: i64,
    pub name: String,
    pub effect_entries: Vec<EffectEntry>,
}

/// Read-only catalog lookups.
///
/// Implementations perform the calls sequentially within the caller's task;
/// there is no retry or timeout policy at this seam.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch a creature's detail by its unique name.
    async fn creature_detail(&self, name: &str) -> Result<CreaturePayload, CatalogError>;

    /// Fetch an ability's detail via the locator a [`CreaturePayload`]
    /// handed out.
    async fn ability_detail(&self, url: &str) -> Result<AbilityDetail, CatalogError>;

    /// List up to `limit` creature names known to the catalog.
    async fn creature_names(&self, limit: usize) -> Result<Vec<String>, CatalogError>;
}
