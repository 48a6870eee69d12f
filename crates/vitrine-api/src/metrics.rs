//! Prometheus metrics for the HTTP surface.
//!
//! Requests are labelled by route template, never by raw path, so the
//! rebuild secret does not leak into `/metrics`.

use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use vitrine_core::{Error, Result};

/// Request latency histogram, labelled by `route`, `method` and `status`.
pub const HTTP_REQUEST_DURATION: &str = "vitrine_http_request_duration_seconds";

/// Request counter, labelled by `route`, `method` and `status`.
pub const HTTP_REQUESTS: &str = "vitrine_http_requests_total";

/// Rebuild requests, labelled by `outcome`.
pub const REBUILD_REQUESTS: &str = "vitrine_rebuild_requests_total";

const UNMATCHED_ROUTE: &str = "unmatched";

static RECORDER: OnceLock<std::result::Result<PrometheusHandle, String>> = OnceLock::new();

/// How a rebuild request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// A new snapshot was published.
    Published,
    /// The secret did not match.
    Denied,
    /// Another rebuild was running.
    Busy,
    /// The build failed; the previous snapshot stays live.
    Failed,
}

impl RebuildOutcome {
    /// Label value used on [`REBUILD_REQUESTS`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Denied => "denied",
            Self::Busy => "busy",
            Self::Failed => "failed",
        }
    }
}

/// Installs the Prometheus recorder once and describes every vitrine metric.
///
/// Later calls return the same handle.
///
/// # Errors
///
/// Returns [`Error::Internal`] if another global recorder is already
/// installed.
pub fn init_metrics() -> Result<PrometheusHandle> {
    RECORDER
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| format!("failed to install prometheus recorder: {e}"))?;

            describe_histogram!(HTTP_REQUEST_DURATION, "HTTP request latency in seconds");
            describe_counter!(HTTP_REQUESTS, "HTTP requests served");
            describe_counter!(REBUILD_REQUESTS, "Catalog rebuild requests by outcome");
            vitrine_catalog::metrics::register_metrics();
            Ok(handle)
        })
        .clone()
        .map_err(Error::internal)
}

/// Records one rebuild request.
pub fn record_rebuild(outcome: RebuildOutcome) {
    counter!(REBUILD_REQUESTS, "outcome" => outcome.as_str()).increment(1);
}

fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |path| path.as_str().to_string())
}

fn status_label(status: StatusCode) -> String {
    format!("{}xx", status.as_u16() / 100)
}

/// Records latency and count for every request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let route = route_label(&request);
    let method = request.method().as_str().to_string();

    let response = next.run(request).await;
    let status = status_label(response.status());

    histogram!(
        HTTP_REQUEST_DURATION,
        "route" => route.clone(),
        "method" => method.clone(),
        "status" => status.clone()
    )
    .record(started.elapsed().as_secs_f64());
    counter!(HTTP_REQUESTS, "route" => route, "method" => method, "status" => status)
        .increment(1);

    response
}

/// `GET /metrics`: Prometheus text exposition.
pub async fn serve_metrics() -> Response {
    let content_type = [(header::CONTENT_TYPE, "text/plain; version=0.0.4")];
    match RECORDER.get() {
        Some(Ok(handle)) => (StatusCode::OK, content_type, handle.render()).into_response(),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            content_type,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}
