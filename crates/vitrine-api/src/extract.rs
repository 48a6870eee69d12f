//! Request parameter extraction.
//!
//! Catalog endpoints accept their parameters either in the query string or
//! in an `application/x-www-form-urlencoded` body. When both carry the same
//! key, the body wins.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Form, FromRequest, Query, Request};
use axum::http::{HeaderMap, header};

use crate::error::{ApiError, ApiResult};

/// Form values merged from the query string and a urlencoded body.
#[derive(Debug, Clone, Default)]
pub struct FormParams(HashMap<String, String>);

impl FormParams {
    /// Returns the raw value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parses `name` as an integer id.
    ///
    /// Returns `Ok(None)` for integers that cannot name any entity (negative
    /// values), so callers treat them as unknown ids.
    ///
    /// # Errors
    ///
    /// Returns a 400 error if `name` is missing or not an integer.
    pub fn id<T>(&self, name: &str) -> ApiResult<Option<T>>
    where
        T: TryFrom<i64>,
    {
        let raw = self
            .get(name)
            .ok_or_else(|| ApiError::bad_request(format!("{name} is required")))?;
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request(format!("{name} must be an integer")))?;
        Ok(T::try_from(value).ok())
    }
}

fn is_urlencoded_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut values) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        if is_urlencoded_form(req.headers()) {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            values.extend(body);
        }

        Ok(Self(values))
    }
}
