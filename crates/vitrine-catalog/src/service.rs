//! Catalog service: owns the source, the store and the reload gate.
//!
//! ## Reload policy
//!
//! At most one rebuild runs at a time. A reload requested while another is
//! running is rejected with [`CatalogError::ReloadInProgress`] rather than
//! queued. Builds run on the blocking pool and publish only on success; a
//! failed build leaves the previous snapshot live.
//!
//! The gate permit travels with the build task. A caller that stops waiting
//! does not release the gate, and the build still publishes when it finishes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use vitrine_core::observability::catalog_span;

use crate::builder::CatalogBuilder;
use crate::error::{CatalogError, Result, SourceReadError};
use crate::layout::DEFAULT_STATIC_PREFIX;
use crate::metrics;
use crate::snapshot::CatalogSnapshot;
use crate::source::CatalogSource;
use crate::store::CatalogStore;

/// Outcome of a successful build-and-publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Generation the new snapshot was published as.
    pub generation: u64,
    /// Categories in the new snapshot.
    pub categories: usize,
    /// Products in the new snapshot.
    pub products: usize,
    /// Wall-clock time spent building.
    pub elapsed: Duration,
}

/// Serves catalog snapshots and rebuilds them on request.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    static_prefix: String,
    store: Arc<CatalogStore>,
    reload_gate: Arc<Mutex<()>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("source", &self.source.describe())
            .field("static_prefix", &self.static_prefix)
            .field("generation", &self.store.generation())
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Builds the initial snapshot synchronously and returns a ready service.
    ///
    /// # Errors
    ///
    /// Returns the [`SourceReadError`] that aborted the initial build. The
    /// process has nothing to serve in that case.
    pub fn bootstrap(source: Arc<dyn CatalogSource>) -> std::result::Result<Self, SourceReadError> {
        Self::bootstrap_with_prefix(source, DEFAULT_STATIC_PREFIX)
    }

    /// Like [`CatalogService::bootstrap`] with a custom image URL prefix.
    ///
    /// # Errors
    ///
    /// Returns the [`SourceReadError`] that aborted the initial build.
    pub fn bootstrap_with_prefix(
        source: Arc<dyn CatalogSource>,
        static_prefix: impl Into<String>,
    ) -> std::result::Result<Self, SourceReadError> {
        let static_prefix = static_prefix.into();
        let root = source.describe();
        let _guard = catalog_span("bootstrap", &root).entered();

        let snapshot = timed_build(source.as_ref(), &static_prefix)?;
        metrics::record_live_catalog(snapshot.category_count(), snapshot.product_count());
        tracing::info!(
            categories = snapshot.category_count(),
            products = snapshot.product_count(),
            "Initial catalog snapshot published"
        );

        Ok(Self {
            source,
            static_prefix,
            store: Arc::new(CatalogStore::new(snapshot)),
            reload_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Returns the store backing this service.
    #[must_use]
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.store.current()
    }

    /// Rebuilds the catalog from the source and publishes the result.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ReloadInProgress`] if another reload is running.
    /// - [`CatalogError::Source`] if the build failed; the previous snapshot
    ///   stays published.
    /// - [`CatalogError::Internal`] if the build task panicked.
    pub async fn reload(&self) -> Result<BuildSummary> {
        let Ok(permit) = Arc::clone(&self.reload_gate).try_lock_owned() else {
            metrics::record_reload_rejected("in_progress");
            tracing::info!("Reload rejected; another reload is running");
            return Err(CatalogError::ReloadInProgress);
        };

        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let prefix = self.static_prefix.clone();
        let span = catalog_span("reload", &source.describe());

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let _guard = span.entered();
            build_and_publish(source.as_ref(), &prefix, &store)
        })
        .await
        .map_err(|e| CatalogError::Internal {
            message: format!("catalog build task failed: {e}"),
        })?
    }
}

/// Builds a snapshot and publishes it on success.
fn build_and_publish(
    source: &dyn CatalogSource,
    static_prefix: &str,
    store: &CatalogStore,
) -> Result<BuildSummary> {
    let started = Instant::now();
    let snapshot = timed_build(source, static_prefix)?;

    let categories = snapshot.category_count();
    let products = snapshot.product_count();
    let elapsed = started.elapsed();
    let generation = store.publish(snapshot);
    metrics::record_live_catalog(categories, products);

    tracing::info!(
        generation,
        categories,
        products,
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "Catalog snapshot published"
    );

    Ok(BuildSummary {
        generation,
        categories,
        products,
        elapsed,
    })
}

/// Runs one build and records its metrics.
fn timed_build(
    source: &dyn CatalogSource,
    static_prefix: &str,
) -> std::result::Result<CatalogSnapshot, SourceReadError> {
    let started = Instant::now();
    let result = CatalogBuilder::new(source)
        .with_static_prefix(static_prefix)
        .build();
    let elapsed = started.elapsed().as_secs_f64();

    match &result {
        Ok(_) => metrics::record_build_success(elapsed),
        Err(e) => {
            metrics::record_build_failure(elapsed);
            tracing::error!(error = %e, "Catalog build failed");
        }
    }
    result
}
