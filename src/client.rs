//! Configured HTTP client for the analytics backend.
//!
//! One client per [`Dashboard`](crate::Dashboard): fixed base URL, JSON
//! content type, shared transport timeout. Every query operation goes
//! through [`ApiClient::get`], which is also where non-2xx statuses are
//! mapped onto the error taxonomy (404 becomes [`DashboardError::NotFound`]
//! so list views can treat it as "no results").

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DashboardError, Result};

/// Thin wrapper around a configured [`reqwest::Client`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` (a trailing slash is stripped).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `base_url + path`, decoding the JSON body into `T`.
    ///
    /// `params == None` means the request URL carries no query string at
    /// all. That is distinct from `Some(&P::default())`, and callers rely
    /// on the distinction when deriving cache keys.
    pub async fn get<T, P>(&self, path: &str, params: Option<&P>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if let Some(params) = params {
            request = request.query(params);
        }

        tracing::debug!(%url, "GET");
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::NOT_FOUND {
            tracing::debug!(%url, "GET returned 404");
            Err(DashboardError::NotFound(path.to_string()))
        } else {
            tracing::warn!(%url, status = status.as_u16(), "GET returned non-2xx");
            Err(DashboardError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            })
        }
    }
}
