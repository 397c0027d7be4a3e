//! # HTTP Server
//!
//! Combines the parcel endpoint, the passthrough layers and the service
//! routes into one router, then binds and serves. The store behind the
//! state is the only shared resource; handlers hold no other state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::store::{CadastreStore, LAYERS};

use super::config::HttpServerConfig;
use super::layer_routes::layer_routes;
use super::parcel_routes::parcel_routes;

/// State shared by every handler
pub struct AppState {
    pub store: Arc<dyn CadastreStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn CadastreStore>, config: AppConfig) -> Self {
        Self { store, config }
    }
}

/// HTTP server for the cadastral API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Server with default configuration
    pub fn new(state: AppState) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    /// Server with custom configuration
    pub fn with_config(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    /// Builds the combined router
    fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        // Permissive CORS when no origins are configured (development),
        // explicit origin list otherwise.
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(service_routes(state.clone()))
            .merge(parcel_routes(state.clone()))
            .merge(layer_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// The configured socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router (for tests)
    pub fn router(self) -> Router {
        self.router
    }

    /// Binds and serves until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        info!(%addr, "starting cadastral API server");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

// ==================
// Service Routes
// ==================

/// Root metadata and health endpoints
fn service_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// GET / — API metadata and endpoint map
async fn root_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut endpoints = serde_json::Map::new();
    endpoints.insert("parcelle".to_string(), json!("/parcelle/"));
    for layer in LAYERS {
        endpoints.insert(layer.path.to_string(), json!(format!("/{}/", layer.path)));
    }
    endpoints.insert("spatial_ref_sys".to_string(), json!("/spatial_ref_sys/"));

    Json(json!({
        "name": "cadastre",
        "version": env!("CARGO_PKG_VERSION"),
        "default_limit": state.config.default_limit,
        "endpoints": endpoints,
    }))
}

/// GET /health — liveness probe
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
