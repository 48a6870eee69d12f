//! Catalog metrics.
//!
//! Build outcomes, build duration and the size of the live catalog. These
//! complement the structured logging emitted by the builder and the service.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

// ============================================================================
// Build Metrics
// ============================================================================

/// Catalog build counter, labelled by `outcome` (`success` | `failure`).
pub const CATALOG_BUILDS: &str = "vitrine_catalog_builds_total";

/// Catalog build duration histogram.
pub const CATALOG_BUILD_DURATION: &str = "vitrine_catalog_build_duration_seconds";

/// Number of categories in the live snapshot.
pub const CATALOG_CATEGORIES: &str = "vitrine_catalog_categories";

/// Number of products in the live snapshot.
pub const CATALOG_PRODUCTS: &str = "vitrine_catalog_products";

// ============================================================================
// Reload Metrics
// ============================================================================

/// Reloads that did not start, labelled by `reason`.
pub const RELOADS_REJECTED: &str = "vitrine_catalog_reloads_rejected_total";

// ============================================================================
// Metric Registration
// ============================================================================

/// Registers all catalog metric descriptions.
///
/// Call this once at application startup after initializing the metrics recorder.
pub fn register_metrics() {
    describe_counter!(CATALOG_BUILDS, "Total catalog builds by outcome");
    describe_histogram!(CATALOG_BUILD_DURATION, "Duration of catalog builds in seconds");
    describe_gauge!(CATALOG_CATEGORIES, "Categories in the live catalog snapshot");
    describe_gauge!(CATALOG_PRODUCTS, "Products in the live catalog snapshot");
    describe_counter!(RELOADS_REJECTED, "Total reload requests that did not start a build");
}

// ============================================================================
// Metric Recording
// ============================================================================

/// Records a successful build.
pub fn record_build_success(duration_secs: f64) {
    counter!(CATALOG_BUILDS, "outcome" => "success").increment(1);
    histogram!(CATALOG_BUILD_DURATION, "outcome" => "success").record(duration_secs);
}

/// Records the size of the snapshot that was just published.
#[allow(clippy::cast_precision_loss)]
pub fn record_live_catalog(categories: usize, products: usize) {
    gauge!(CATALOG_CATEGORIES).set(categories as f64);
    gauge!(CATALOG_PRODUCTS).set(products as f64);
}

/// Records a failed build.
pub fn record_build_failure(duration_secs: f64) {
    counter!(CATALOG_BUILDS, "outcome" => "failure").increment(1);
    histogram!(CATALOG_BUILD_DURATION, "outcome" => "failure").record(duration_secs);
}

/// Records a reload that was turned away.
pub fn record_reload_rejected(reason: &'static str) {
    counter!(RELOADS_REJECTED, "reason" => reason).increment(1);
}
