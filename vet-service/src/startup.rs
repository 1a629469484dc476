//! Application startup and lifecycle management.

use crate::config::{StoreBackend, VetConfig};
use crate::handlers;
use crate::services::{InMemoryVetStore, MongoVetStore, VetStore};
use axum::{body::Body, middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. The store is chosen once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn VetStore>) -> Self {
        Self { store }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/vets", get(handlers::list_vets).post(handlers::create_vet))
        .route(
            "/vets/:id",
            get(handlers::get_vet)
                .put(handlers::update_vet)
                .delete(handlers::delete_vet),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Logs whether the store answers, without retrying or blocking startup.
fn spawn_connection_check(store: Arc<dyn VetStore>) {
    tokio::spawn(async move {
        match store.health_check().await {
            Ok(()) => tracing::info!("MongoDB connected"),
            Err(e) => tracing::error!("MongoDB connection error: {}", e),
        }
    });
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: VetConfig) -> Result<Self, AppError> {
        let store: Arc<dyn VetStore> = match config.store.backend {
            StoreBackend::Mongodb => {
                let db = MongoVetStore::connect(
                    &config.mongodb.uri,
                    config.mongodb.database.as_deref(),
                )
                .await?;
                let store: Arc<dyn VetStore> = Arc::new(db);
                spawn_connection_check(store.clone());
                store
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, records are lost on restart");
                Arc::new(InMemoryVetStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        config: VetConfig,
        store: Arc<dyn VetStore>,
    ) -> Result<Self, AppError> {
        // Port 0 picks a random port, used by tests
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Vet service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves, letting in-flight requests finish.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
