use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use pokeworld_api::app::{build_app, services};
use pokeworld_catalog::{
    AbilityDetail, CatalogClient, CatalogError, CreaturePayload, EffectEntry, KnownNames,
};

/// Catalog double serving canned payloads.
#[derive(Default)]
struct StubCatalog {
    creatures: HashMap<String, CreaturePayload>,
    abilities: HashMap<String, AbilityDetail>,
}

impl StubCatalog {
    fn with_creature(mut self, name: &str, refs: &[(&str, &str)]) -> Self {
        let payload: CreaturePayload = serde_json::from_value(json!({
            "abilities": refs
                .iter()
                .map(|(ability_name, url)| json!({"ability": {"name": ability_name, "url": url}}))
                .collect::<Vec<_>>(),
        }))
        .unwrap();
        self.creatures.insert(name.to_string(), payload);
        self
    }

    fn with_ability(mut self, url: &str, id: i64, name: &str, effect: &str) -> Self {
        self.abilities.insert(
            url.to_string(),
            AbilityDetail {
                id,
                name: name.to_string(),
                effect_entries: vec![EffectEntry {
                    effect: effect.to_string(),
                    short_effect: effect.to_string(),
                }],
            },
        );
        self
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn creature_detail(&self, name: &str) -> Result<CreaturePayload, CatalogError> {
        self.creatures
            .get(name)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn ability_detail(&self, url: &str) -> Result<AbilityDetail, CatalogError> {
        self.abilities
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::Request(format!("no stub ability at {url}")))
    }

    async fn creature_names(&self, _limit: usize) -> Result<Vec<String>, CatalogError> {
        Ok(self.creatures.keys().cloned().collect())
    }
}

fn default_catalog() -> StubCatalog {
    StubCatalog::default()
        .with_creature(
            "bulbasaur",
            &[
                ("overgrow", "https://catalog.test/ability/65/"),
                ("chlorophyll", "https://catalog.test/ability/34/"),
            ],
        )
        .with_creature("ivysaur", &[("overgrow", "https://catalog.test/ability/65/")])
        .with_ability("https://catalog.test/ability/65/", 65, "overgrow", "grass boost")
        .with_ability("https://catalog.test/ability/34/", 34, "chlorophyll", "sun speed")
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the real router (in-memory stores + stub catalog) on an
    /// ephemeral port.
    async fn spawn(catalog: StubCatalog, known_names: KnownNames) -> Self {
        let services = Arc::new(services::in_memory_services(Arc::new(catalog), known_names));
        let app = build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(
            default_catalog(),
            KnownNames::from_names(["bulbasaur", "ivysaur", "mew"]),
        )
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A client with its own cookie jar, i.e. its own session.
fn client() -> reqwest::Client {
    reqwest::Client::builder().cookie_store(true).build().unwrap()
}

async fn register_and_login(srv: &TestServer, http: &reqwest::Client, email: &str) {
    let res = http
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": email, "password": "password", "confirm_password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = http
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": email, "password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_login_create_and_ownership_scenario() {
    let srv = TestServer::spawn_default().await;

    let creator = client();
    register_and_login(&srv, &creator, "a@x.com").await;

    // Create while authenticated; creator is the session account.
    let res = creator
        .post(format!("{}/pokemons", srv.base_url))
        .json(&json!({ "name": "bulbasaur", "description": "Mighty Pokemon", "weight": 59 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["creator"].is_string());
    assert_eq!(created["weight"], "59.0");
    assert_eq!(created["abilities"].as_array().unwrap().len(), 2);

    // A different account may not change the weight...
    let other = client();
    register_and_login(&srv, &other, "b@x.com").await;

    let res = other
        .patch(format!("{}/pokemons/{}", srv.base_url, id))
        .json(&json!({ "weight": 54 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // ...but may change anything else.
    let res = other
        .patch(format!("{}/pokemons/{}", srv.base_url, id))
        .json(&json!({ "description": "Some new description" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["description"], "Some new description");
    assert_eq!(updated["weight"], "59.0");

    // The creator may change the weight.
    let res = creator
        .patch(format!("{}/pokemons/{}", srv.base_url, id))
        .json(&json!({ "weight": 54 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["weight"], "54.0");
}

#[tokio::test]
async fn anonymous_weight_update_is_forbidden_not_unauthenticated() {
    let srv = TestServer::spawn_default().await;

    let creator = client();
    register_and_login(&srv, &creator, "a@x.com").await;
    let res = creator
        .post(format!("{}/digimons", srv.base_url))
        .json(&json!({ "name": "Agumon", "description": "Rookie", "weight": 68 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let anonymous = client();
    let res = anonymous
        .patch(format!("{}/digimons/{}", srv.base_url, id))
        .json(&json!({ "weight": 54 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Anonymous description update goes through.
    let res = anonymous
        .patch(format!("{}/digimons/{}", srv.base_url, id))
        .json(&json!({ "description": "Some new description" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn creation_requires_authentication() {
    let srv = TestServer::spawn_default().await;
    let anonymous = client();

    for path in ["pokemons", "digimons"] {
        let res = anonymous
            .post(format!("{}/{}", srv.base_url, path))
            .json(&json!({ "name": "bulbasaur", "description": "x", "weight": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "POST /{path}");
    }
}

#[tokio::test]
async fn lists_are_open_to_anonymous_callers() {
    let srv = TestServer::spawn_default().await;

    let creator = client();
    register_and_login(&srv, &creator, "a@x.com").await;
    let res = creator
        .post(format!("{}/pokemons", srv.base_url))
        .json(&json!({ "name": "bulbasaur", "description": "Mighty", "weight": 59 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let anonymous = client();
    let res = anonymous
        .get(format!("{}/pokemons", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list: serde_json::Value = res.json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let res = anonymous
        .get(format!("{}/digimons", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_names_are_rejected_per_resource_type() {
    let srv = TestServer::spawn_default().await;
    let http = client();
    register_and_login(&srv, &http, "a@x.com").await;

    for (path, name) in [("pokemons", "bulbasaur"), ("digimons", "Agumon")] {
        let body = json!({ "name": name, "description": "x", "weight": 10 });
        let res = http
            .post(format!("{}/{}", srv.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED, "first {path}");

        let res = http
            .post(format!("{}/{}", srv.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "second {path}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "duplicate_name");
    }
}

#[tokio::test]
async fn unknown_names_are_rejected() {
    let srv = TestServer::spawn_default().await;
    let http = client();
    register_and_login(&srv, &http, "a@x.com").await;

    // Not in the allow-list at all.
    let res = http
        .post(format!("{}/pokemons", srv.base_url))
        .json(&json!({ "name": "agumon", "description": "x", "weight": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Allow-listed, but the catalog lookup misses ("mew" has no stub data).
    let res = http
        .post(format!("{}/pokemons", srv.base_url))
        .json(&json!({ "name": "mew", "description": "x", "weight": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shared_abilities_resolve_to_the_same_row() {
    let srv = TestServer::spawn_default().await;
    let http = client();
    register_and_login(&srv, &http, "a@x.com").await;

    let res = http
        .post(format!("{}/pokemons", srv.base_url))
        .json(&json!({ "name": "bulbasaur", "description": "x", "weight": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let first: serde_json::Value = res.json().await.unwrap();

    let res = http
        .post(format!("{}/pokemons", srv.base_url))
        .json(&json!({ "name": "ivysaur", "description": "x", "weight": 20 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let second: serde_json::Value = res.json().await.unwrap();

    // Both reference ability 65, imported exactly once.
    assert_eq!(first["abilities"][0]["api_obj_id"], 65);
    assert_eq!(second["abilities"][0], first["abilities"][0]);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let srv = TestServer::spawn_default().await;
    let http = client();

    let res = http
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "a@x.com", "password": "password", "confirm_password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let wrong_password = http
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "a@x.com", "password": "wrong password" }))
        .send()
        .await
        .unwrap();
    let wrong_status = wrong_password.status();
    let wrong_body = wrong_password.text().await.unwrap();

    let unknown_email = http
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({ "email": "does_not_exist@example.com", "password": "password" }))
        .send()
        .await
        .unwrap();
    let unknown_status = unknown_email.status();
    let unknown_body = unknown_email.text().await.unwrap();

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn registration_validation_failures() {
    let srv = TestServer::spawn_default().await;
    let http = client();

    let res = http
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "a@x.com", "password": "p", "confirm_password": "q" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "secret_mismatch");

    let res = http
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "a@x.com", "password": "p", "confirm_password": "p" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = http
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({ "email": "a@x.com", "password": "p", "confirm_password": "p" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_identity");
}

#[tokio::test]
async fn logout_is_idempotent() {
    let srv = TestServer::spawn_default().await;
    let http = client();

    // No session bound at all.
    let res = http
        .post(format!("{}/auth/logout", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Bound, cleared, cleared again.
    register_and_login(&srv, &http, "a@x.com").await;
    for _ in 0..2 {
        let res = http
            .post(format!("{}/auth/logout", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    // The session no longer authenticates creation.
    let res = http
        .post(format!("{}/digimons", srv.base_url))
        .json(&json!({ "name": "Agumon", "description": "x", "weight": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let srv = TestServer::spawn_default().await;
    let res = client()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
