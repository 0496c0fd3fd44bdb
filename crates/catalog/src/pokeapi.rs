//! PokeAPI-backed catalog client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{AbilityDetail, CatalogClient, CatalogError, CreaturePayload, NamedResource};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// One page of the catalog's creature index.
#[derive(Debug, Deserialize)]
struct NamePage {
    results: Vec<NamedResource>,
}

/// HTTP client for the public PokeAPI.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different base URL (test servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    async fn creature_detail(&self, name: &str) -> Result<CreaturePayload, CatalogError> {
        let url = format!("{}/pokemon/{}/", self.base_url, name);
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        let payload = response.error_for_status()?.json::<CreaturePayload>().await?;
        Ok(payload)
    }

    async fn ability_detail(&self, url: &str) -> Result<AbilityDetail, CatalogError> {
        let detail = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<AbilityDetail>()
            .await?;
        Ok(detail)
    }

    async fn creature_names(&self, limit: usize) -> Result<Vec<String>, CatalogError> {
        let url = format!("{}/pokemon/?limit={}", self.base_url, limit);
        let page = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<NamePage>()
            .await?;
        Ok(page.results.into_iter().map(|entry| entry.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = PokeApiClient::with_base_url("http://localhost:9000/api/");
        assert_eq!(client.base_url(), "http://localhost:9000/api");
    }
}
