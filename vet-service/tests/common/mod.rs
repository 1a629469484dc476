#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;
use tower::ServiceExt;
use vet_service::config::{MongoConfig, StoreBackend, StoreConfig, VetConfig};
use vet_service::models::{Vet, VetPayload};
use vet_service::services::{InMemoryVetStore, MongoVetStore, VetStore};
use vet_service::startup::{build_router, AppState, Application};

pub fn test_config(backend: StoreBackend, database: Option<String>) -> VetConfig {
    VetConfig {
        // Random port for testing
        common: CoreConfig { port: 0 },
        store: StoreConfig { backend },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database,
        },
    }
}

/// Router over a fresh in-memory store, driven with `oneshot`.
pub fn memory_router() -> (Router, Arc<dyn VetStore>) {
    let store: Arc<dyn VetStore> = Arc::new(InMemoryVetStore::new());
    (build_router(AppState::new(store.clone())), store)
}

/// Store whose every operation fails, as when the database is unreachable.
pub struct UnavailableVetStore;

fn store_down() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("server selection timeout"))
}

#[async_trait]
impl VetStore for UnavailableVetStore {
    async fn list(&self) -> Result<Vec<Vet>, AppError> {
        Err(store_down())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Vet>, AppError> {
        Err(store_down())
    }

    async fn insert(&self, _payload: VetPayload) -> Result<Vet, AppError> {
        Err(store_down())
    }

    async fn update(&self, _id: &str, _payload: VetPayload) -> Result<Option<Vet>, AppError> {
        Err(store_down())
    }

    async fn delete(&self, _id: &str) -> Result<bool, AppError> {
        Err(store_down())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(store_down())
    }
}

/// Router over a store that is down.
pub fn unavailable_router() -> Router {
    build_router(AppState::new(Arc::new(UnavailableVetStore)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("Failed to build request");

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec();

    TestResponse { status, body }
}

/// A running server on a random port.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mongo: Option<(MongoVetStore, String)>,
}

impl TestApp {
    pub async fn spawn_in_memory() -> Self {
        let app = Application::build(test_config(StoreBackend::Memory, None))
            .await
            .expect("Failed to build test application");

        Self::start(app, None).await
    }

    /// Requires a MongoDB reachable at `TEST_MONGODB_URI`.
    pub async fn spawn_with_mongo() -> Self {
        let db_name = format!("vet_test_{}", uuid::Uuid::new_v4());
        let config = test_config(StoreBackend::Mongodb, Some(db_name.clone()));

        let db = MongoVetStore::connect(&config.mongodb.uri, Some(&db_name))
            .await
            .expect("Failed to configure MongoDB client");
        let app = Application::build_with_store(config, Arc::new(db.clone()))
            .await
            .expect("Failed to build test application");

        Self::start(app, Some((db, db_name))).await
    }

    async fn start(app: Application, mongo: Option<(MongoVetStore, String)>) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mongo,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Drops the per-test database, if any.
    pub async fn cleanup(&self) {
        if let Some((db, db_name)) = &self.mongo {
            let _ = db.client().database(db_name).drop(None).await;
        }
    }
}
