//! API error types and HTTP response mapping.

use axum::Json;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::HeaderName;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vitrine_catalog::CatalogError;
use vitrine_core::Error as CoreError;

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard JSON error response body.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ApiErrorBody {
    /// Human-readable message (safe for clients).
    pub error: String,
    /// Stable machine-readable error code.
    pub code: String,
}

/// HTTP API error with stable machine-readable code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    retry_after_secs: Option<u64>,
}

impl ApiError {
    /// Returns an error response for invalid input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Returns an error response for missing resources.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Returns an error response for conflicting requests.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    /// Returns an internal error response.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the human-readable error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            retry_after_secs: None,
        }
    }

    /// Attaches a Retry-After header value in seconds.
    #[must_use]
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after_secs = Some(seconds);
        self
    }

    /// Returns a 409 Conflict for a rebuild that is already running, with Retry-After header.
    #[must_use]
    pub fn conflict_in_progress(retry_after_secs: u64) -> Self {
        Self::conflict("Catalog rebuild already in progress").with_retry_after(retry_after_secs)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after_secs = self.retry_after_secs;
        let mut response = (
            self.status,
            Json(ApiErrorBody {
                error: self.message,
                code: self.code.to_string(),
            }),
        )
            .into_response();

        if let Some(secs) = retry_after_secs {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static("retry-after"), value);
            }
        }

        response
    }
}

/// Body message of a generic 404.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Body message of a failed rebuild. Source paths stay in the logs.
pub const REBUILD_FAILED_MESSAGE: &str = "Catalog rebuild failed";

/// Seconds a client should wait before retrying a rejected rebuild.
pub const REBUILD_RETRY_AFTER_SECS: u64 = 1;

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::NotFound { entity, .. } => {
                Self::not_found(format!("{} not found", capitalize(entity)))
            }
            CatalogError::ReloadInProgress => Self::conflict_in_progress(REBUILD_RETRY_AFTER_SECS),
            CatalogError::Source(_) => Self::internal(REBUILD_FAILED_MESSAGE),
            CatalogError::Internal { message } => {
                tracing::error!(error = %message, "Catalog internal error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidId { message } | CoreError::InvalidInput(message) => {
                Self::bad_request(message)
            }
            err @ CoreError::InvalidSegment { .. } => Self::bad_request(err.to_string()),
            CoreError::Config { message } | CoreError::Internal { message } => {
                Self::internal(message)
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
