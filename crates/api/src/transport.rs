//! HTTP transport for the Circonus REST API.
//!
//! [`Transport`] is the seam between the resource operations and the wire:
//! four verbs taking an API path (`/dashboard/1234`, `/dashboard?search=x`)
//! and returning the raw response body. [`HttpTransport`] implements it with
//! [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;

use crate::config::ClientConfig;

/// Header carrying the API token.
pub const AUTH_TOKEN_HEADER: &str = "x-circonus-auth-token";

/// Header carrying the application name bound to the token.
pub const APP_NAME_HEADER: &str = "x-circonus-app-name";

/// Errors from the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Raw request/response exchange with the API.
///
/// Implementations own authentication and connection handling. Each call
/// either returns the full response body or an error; nothing is retried.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError>;

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    async fn delete(&self, path: &str) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        (**self).get(path).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        (**self).put(path, body).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        (**self).post(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        (**self).delete(path).await
    }
}

/// [`reqwest`]-backed transport bound to one API endpoint and token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    ///
    /// The token and app name are installed as default headers on the
    /// underlying client so every request carries them.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        reqwest::Url::parse(&config.url)
            .map_err(|e| TransportError::InvalidConfig(format!("url {:?}: {e}", config.url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTH_TOKEN_HEADER,
            HeaderValue::from_str(&config.token_key)
                .map_err(|e| TransportError::InvalidConfig(format!("token: {e}")))?,
        );
        headers.insert(
            APP_NAME_HEADER,
            HeaderValue::from_str(&config.token_app)
                .map_err(|e| TransportError::InvalidConfig(format!("app name: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, &config.url))
    }

    /// Create a transport reusing an existing [`reqwest::Client`].
    ///
    /// The caller is responsible for any auth headers on `client`.
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base API URL requests are issued against.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Full request URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.url_for(path);
        tracing::debug!(method = %method, path, "Circonus API request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(method = %method, path, status = status.as_u16(), "Circonus API error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        tracing::trace!(method = %method, path, len = bytes.len(), "Circonus API response");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        self.send(Method::GET, path, None).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        self.send(Method::DELETE, path, None).await
    }
}
