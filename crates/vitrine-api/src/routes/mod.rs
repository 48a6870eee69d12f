//! HTTP route handlers.

pub mod admin;
pub mod catalog;

use std::sync::Arc;

use axum::Router;

use crate::server::AppState;

/// Catalog and administrative routes.
pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(catalog::routes())
        .merge(admin::routes())
}
