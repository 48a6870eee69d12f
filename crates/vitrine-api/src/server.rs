//! API server implementation.
//!
//! Provides the catalog routes, health and metrics endpoints, and static
//! serving of the resource tree.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderValue, Method, header};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use vitrine_catalog::CatalogService;
use vitrine_catalog::layout::DEFAULT_STATIC_PREFIX;
use vitrine_core::{Error, Result};

use crate::config::{Config, CorsConfig};
use crate::error::{ApiError, NOT_FOUND_MESSAGE};

/// Preflight cache lifetime for CORS responses.
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

// ============================================================================
// Health Response
// ============================================================================

/// Health check response describing the live catalog.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Generation of the live snapshot (1 for the startup build).
    pub generation: u64,
    /// Categories in the live snapshot.
    pub categories: usize,
    /// Products in the live snapshot.
    pub products: usize,
    /// When the live snapshot was built.
    pub built_at: DateTime<Utc>,
}

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// Catalog service holding the live snapshot.
    pub(crate) catalog: Arc<CatalogService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl AppState {
    /// Creates application state around a bootstrapped catalog.
    #[must_use]
    pub fn new(config: Config, catalog: Arc<CatalogService>) -> Self {
        Self { config, catalog }
    }

    /// Returns the catalog service.
    #[must_use]
    pub fn catalog(&self) -> &Arc<CatalogService> {
        &self.catalog
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint handler.
///
/// Reports the generation and size of the live snapshot.
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let published = state.catalog.store().published();
    Json(HealthResponse {
        status: "ok".to_string(),
        generation: published.generation,
        categories: published.snapshot.category_count(),
        products: published.snapshot.product_count(),
        built_at: published.snapshot.built_at(),
    })
}

/// Fallback for unmatched routes.
///
/// Shares its body with the wrong-secret rebuild response, so the two are
/// indistinguishable to clients.
async fn not_found() -> ApiError {
    ApiError::not_found(NOT_FOUND_MESSAGE)
}

// ============================================================================
// Server
// ============================================================================

/// The vitrine API server.
pub struct Server {
    config: Config,
    catalog: Arc<CatalogService>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl Server {
    /// Creates a new server with the given configuration and catalog.
    #[must_use]
    pub fn new(config: Config, catalog: Arc<CatalogService>) -> Self {
        Self { config, catalog }
    }

    /// Creates a new `ServerBuilder` around `catalog`.
    #[must_use]
    pub fn builder(catalog: Arc<CatalogService>) -> ServerBuilder {
        ServerBuilder::new(catalog)
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the router with all routes and middleware.
    fn create_router(&self) -> Router {
        let state = Arc::new(AppState::new(
            self.config.clone(),
            Arc::clone(&self.catalog),
        ));

        let cors = cors_layer(&self.config.cors);
        let metrics_layer = middleware::from_fn(crate::metrics::track_requests);
        let static_files = ServeDir::new(&self.config.resources_dir);

        Router::new()
            .route("/health", get(health))
            .route("/metrics", get(crate::metrics::serve_metrics))
            .merge(crate::routes::catalog_routes())
            .nest_service(DEFAULT_STATIC_PREFIX, static_files)
            .fallback(not_found)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(metrics_layer)
            .with_state(state)
    }

    /// Starts the server and blocks until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the server cannot
    /// bind to the port.
    pub async fn serve(&self) -> Result<()> {
        self.validate_config()?;

        crate::metrics::init_metrics()?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let router = self.create_router();

        tracing::info!(
            port = self.config.port,
            url = ?self.config.url,
            resources_dir = %self.config.resources_dir.display(),
            "Starting vitrine API server"
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::internal(format!("failed to bind to {addr}: {e}")))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::internal(format!("server error: {e}")))?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Creates a test router for the server.
    ///
    /// This is useful for integration tests where you want to test
    /// the routes without actually binding to a port.
    #[doc(hidden)]
    pub fn test_router(&self) -> Router {
        self.create_router()
    }

    fn validate_config(&self) -> Result<()> {
        if self.config.secret.trim().is_empty() {
            return Err(Error::config("secret must not be empty"));
        }

        let origins = &self.config.cors.allowed_origins;
        if origins.iter().any(|origin| origin == "*") {
            if origins.len() > 1 {
                return Err(Error::config(
                    "cors_allowed_origins: '*' must be the only entry",
                ));
            }
            if !self.config.debug {
                return Err(Error::config(
                    "cors_allowed_origins cannot include '*' when debug=false",
                ));
            }
        }
        if let Some(origin) = origins
            .iter()
            .find(|origin| *origin != "*" && HeaderValue::from_str(origin).is_err())
        {
            return Err(Error::config(format!(
                "cors_allowed_origins: invalid origin {origin:?}"
            )));
        }

        Ok(())
    }
}

/// CORS for browser storefronts. No origins configured means no CORS headers.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::RETRY_AFTER])
        .max_age(CORS_MAX_AGE);

    match cors.allowed_origins.as_slice() {
        [] => layer,
        [only] if only == "*" => layer.allow_origin(Any),
        origins => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(allowed))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Builder for constructing a server.
#[derive(Debug)]
pub struct ServerBuilder {
    config: Config,
    catalog: Arc<CatalogService>,
}

impl ServerBuilder {
    /// Creates a new server builder with default configuration.
    #[must_use]
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self {
            config: Config::default(),
            catalog,
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the HTTP port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the rebuild secret.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = secret.into();
        self
    }

    /// Sets the directory served under `/resources`.
    #[must_use]
    pub fn resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.resources_dir = dir.into();
        self
    }

    /// Enables debug mode.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Sets the allowed CORS origins.
    #[must_use]
    pub fn cors_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.config.cors.allowed_origins = origins;
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server {
            config: self.config,
            catalog: self.catalog,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use vitrine_catalog::MemoryCatalogSource;

    fn catalog() -> Result<Arc<CatalogService>> {
        let source = MemoryCatalogSource::new()
            .with_category("fruits")
            .with_category("veggies");
        Ok(Arc::new(
            CatalogService::bootstrap(Arc::new(source)).context("bootstrap")?,
        ))
    }

    #[tokio::test]
    async fn test_health_endpoint() -> Result<()> {
        let server = ServerBuilder::new(catalog()?).secret("s").build();
        let router = server.test_router();

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .context("build request")?;

        let response = router.oneshot(request).await.map_err(|err| match err {})?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .context("read response body")?;
        let health: HealthResponse = serde_json::from_slice(&body).context("parse JSON body")?;
        assert_eq!(health.status, "ok");
        assert_eq!(health.generation, 1);
        assert_eq!(health.categories, 2);
        assert_eq!(health.products, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() -> Result<()> {
        let server = ServerBuilder::new(catalog()?)
            .secret("s")
            .cors_allowed_origins(vec!["http://shop.test".to_string()])
            .build();
        let router = server.test_router();

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/list_categories")
            .header(header::ORIGIN, "http://shop.test")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .context("build request")?;

        let response = router.oneshot(request).await.map_err(|err| match err {})?;
        let allow_origin = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .context("missing allow-origin")?;
        assert_eq!(allow_origin, "http://shop.test");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() -> Result<()> {
        let server = ServerBuilder::new(catalog()?).secret("s").build();
        let router = server.test_router();

        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .context("build request")?;

        let response = router.oneshot(request).await.map_err(|err| match err {})?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[test]
    fn test_wildcard_cors_requires_debug() -> Result<()> {
        let server = ServerBuilder::new(catalog()?)
            .secret("s")
            .cors_allowed_origins(vec!["*".to_string()])
            .build();
        assert!(server.validate_config().is_err());

        let server = ServerBuilder::new(catalog()?)
            .secret("s")
            .debug(true)
            .cors_allowed_origins(vec!["*".to_string()])
            .build();
        assert!(server.validate_config().is_ok());
        Ok(())
    }

    #[test]
    fn test_wildcard_must_stand_alone() -> Result<()> {
        let server = ServerBuilder::new(catalog()?)
            .secret("s")
            .debug(true)
            .cors_allowed_origins(vec!["*".to_string(), "http://shop.test".to_string()])
            .build();
        assert!(server.validate_config().is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_origin_is_rejected() -> Result<()> {
        let server = ServerBuilder::new(catalog()?)
            .secret("s")
            .cors_allowed_origins(vec!["http://bad\norigin".to_string()])
            .build();
        assert!(server.validate_config().is_err());
        Ok(())
    }

    #[test]
    fn test_empty_secret_is_rejected() -> Result<()> {
        let server = ServerBuilder::new(catalog()?).build();
        assert!(server.validate_config().is_err());
        Ok(())
    }
}
