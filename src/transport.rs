//! # Transport
//!
//! The single configured HTTP client shared by every domain service. Bodies are JSON except
//! for the image upload, which is a multipart form with one `file` field.
//!
//! Failures are classified by status code and handed back untouched; there are no retries.

use crate::config::Config;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Errors surfaced by the backend or the network.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404: unknown username on login, category without products, missing entity.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409: e.g. the username is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// HTTP client bound to the backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.backend_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments beneath the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response = self.send(Method::GET, segments, |r| r).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, segments, |r| r.json(body)).await?;
        Self::decode(response).await
    }

    pub async fn put_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, segments, |r| r.json(body)).await?;
        Self::decode(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, segments, |r| r.multipart(form)).await?;
        Self::decode(response).await
    }

    /// DELETE whose response body, if any, is ignored.
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.send(Method::DELETE, segments, |r| r).await?;
        Ok(())
    }

    pub async fn get_bytes(&self, segments: &[&str]) -> Result<Vec<u8>, ApiError> {
        let response = self.send(Method::GET, segments, |r| r).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Sending request");
        let response = build(self.http.request(method.clone(), url.clone()))
            .send()
            .await?;
        Self::check(method, url, response).await
    }

    async fn check(method: Method, url: Url, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "Response");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%method, %url, status = status.as_u16(), "Request failed");
        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(body),
            StatusCode::CONFLICT => ApiError::Conflict(body),
            _ => ApiError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&Config::new(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_appends_segments_below_the_base_path() {
        let api = client("http://localhost:8080/shop");
        assert_eq!(api.base_url().as_str(), "http://localhost:8080/shop/");
        let url = api.endpoint(&["api", "products", "category", "camisetas"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/shop/api/products/category/camisetas"
        );
    }

    #[test]
    fn endpoint_encodes_usernames() {
        let api = client("http://localhost:8080/");
        let url = api.endpoint(&["api", "cart", "ana maría/x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/cart/ana%20mar%C3%ADa%2Fx"
        );
    }

    #[test]
    fn not_found_is_recognisable() {
        assert!(ApiError::NotFound(String::new()).is_not_found());
        assert!(!ApiError::Conflict(String::new()).is_not_found());
    }
}
