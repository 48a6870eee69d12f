//! Catalog read routes.
//!
//! ## Routes
//!
//! - `POST /list_categories` - All categories in display order
//! - `POST /list_products_by?category_id=` - Products of one category
//! - `POST /show_product?product_id=` - A single product
//!
//! Each handler reads the live snapshot once, so a request never mixes data
//! from two catalog generations.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use vitrine_catalog::query;
use vitrine_catalog::{CatalogError, Category, Product};
use vitrine_core::{CategoryId, ProductId};

use crate::error::ApiResult;
use crate::extract::FormParams;
use crate::server::AppState;

/// Creates catalog read routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list_categories", post(list_categories))
        .route("/list_products_by", post(list_products_by))
        .route("/show_product", post(show_product))
}

/// List all categories.
///
/// POST /list_categories
pub(crate) async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    let snapshot = state.catalog.snapshot();
    Json(query::list_categories(&snapshot).to_vec())
}

/// List the products of a category. Unknown categories list nothing.
///
/// POST /list_products_by?category_id=
pub(crate) async fn list_products_by(
    State(state): State<Arc<AppState>>,
    params: FormParams,
) -> ApiResult<Json<Vec<Product>>> {
    let Some(category_id) = params.id::<CategoryId>("category_id")? else {
        return Ok(Json(Vec::new()));
    };

    let snapshot = state.catalog.snapshot();
    Ok(Json(query::list_products(&snapshot, category_id).to_vec()))
}

/// Show one product.
///
/// POST /show_product?product_id=
pub(crate) async fn show_product(
    State(state): State<Arc<AppState>>,
    params: FormParams,
) -> ApiResult<Json<Product>> {
    let Some(product_id) = params.id::<ProductId>("product_id")? else {
        let raw = params.get("product_id").unwrap_or_default();
        return Err(CatalogError::not_found("product", raw).into());
    };

    let snapshot = state.catalog.snapshot();
    let product = query::get_product(&snapshot, product_id)?;
    Ok(Json(product.clone()))
}
