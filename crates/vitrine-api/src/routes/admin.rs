//! Administrative routes.
//!
//! ## Routes
//!
//! - `GET /rebuild_data/:secret_key` - Rebuild the catalog from disk
//!
//! A wrong secret answers exactly like an unknown route (404) so the endpoint
//! does not confirm its own existence.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;

use vitrine_catalog::CatalogError;

use crate::error::{ApiError, ApiResult, NOT_FOUND_MESSAGE};
use crate::metrics::{RebuildOutcome, record_rebuild};
use crate::server::AppState;

/// Creates administrative routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/rebuild_data/:secret_key", get(rebuild_data))
}

/// Rebuild the catalog and publish it if the build succeeds.
///
/// GET /rebuild_data/:secret_key
pub(crate) async fn rebuild_data(
    State(state): State<Arc<AppState>>,
    Path(secret_key): Path<String>,
) -> ApiResult<StatusCode> {
    if !secrets_match(&secret_key, &state.config.secret) {
        record_rebuild(RebuildOutcome::Denied);
        tracing::debug!("Rebuild requested with wrong secret");
        return Err(ApiError::not_found(NOT_FOUND_MESSAGE));
    }

    tracing::info!("Catalog rebuild requested");
    match state.catalog.reload().await {
        Ok(summary) => {
            record_rebuild(RebuildOutcome::Published);
            tracing::info!(
                generation = summary.generation,
                categories = summary.categories,
                products = summary.products,
                "Catalog rebuild complete"
            );
            Ok(StatusCode::OK)
        }
        Err(err @ CatalogError::ReloadInProgress) => {
            record_rebuild(RebuildOutcome::Busy);
            Err(err.into())
        }
        Err(err) => {
            record_rebuild(RebuildOutcome::Failed);
            tracing::error!(error = %err, "Catalog rebuild failed; previous catalog stays live");
            Err(err.into())
        }
    }
}

/// Compares secrets without short-circuiting on the first differing byte.
fn secrets_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    if given.len() != expected.len() || expected.is_empty() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_match_exactly() {
        assert!(secrets_match("s3cret", "s3cret"));
        assert!(!secrets_match("s3cre", "s3cret"));
        assert!(!secrets_match("s3cret!", "s3cret"));
        assert!(!secrets_match("S3cret", "s3cret"));
    }

    #[test]
    fn empty_secret_never_matches() {
        assert!(!secrets_match("", ""));
    }
}
