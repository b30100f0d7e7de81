//! HTTP client for expense API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the expense API, unwrapping list envelopes and turning non-2xx
//! responses into typed errors.

use super::error::{detail_from_body, ApiError};
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// Envelope around every list response.
///
#[derive(Deserialize)]
struct ListWrapper<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Makes requests to the expense API and tries to conform response data to
/// the given model.
///
#[derive(Clone)]
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL. Requests that take
    /// longer than `timeout` fail.
    ///
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Return the list of models found under the `data` key of the response.
    ///
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .http_client
            .get(self.url(path))
            .query(params)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            log::warn!("Received empty response from {}, treating as empty list", path);
            return Ok(Vec::new());
        }
        let model: ListWrapper<T> = serde_json::from_slice(&bytes).map_err(|e| {
            log::error!(
                "Failed to deserialize response from {}: {}. Response body: {}",
                path,
                e,
                String::from_utf8_lossy(&bytes)
            );
            e
        })?;
        Ok(model.data)
    }

    /// Make a request with an optional JSON body where only success matters.
    ///
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut request = self.http_client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// Pass 2xx responses through and convert the rest into a status error
    /// carrying the server's `detail` message when one can be read.
    ///
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        log::error!(
            "API request failed with status {}: {}",
            status,
            String::from_utf8_lossy(&body)
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            detail: detail_from_body(&body),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
