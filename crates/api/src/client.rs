//! The [`Api`] façade shared by the resource modules.
//!
//! Resource operations live in [`crate::dashboard`] and
//! [`crate::metric_cluster`] as `impl<T: Transport> Api<T>` blocks; this
//! module holds construction and the JSON encode/decode helpers they share.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpTransport, Transport, TransportError};

/// Typed client for the dashboard and metric cluster APIs.
///
/// Holds no state besides the transport: every call is one request/response
/// exchange and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Api<T> {
    transport: T,
}

impl Api<HttpTransport> {
    /// Build a client talking HTTP to the endpoint in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `path` and decode the body as `R`.
    pub(crate) async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let body = self.transport.get(path).await?;
        decode(&body)
    }

    /// POST `payload` to `path` and decode the response as `R`.
    pub(crate) async fn post_json<B, R>(&self, path: &str, payload: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        let response = self.transport.post(path, body).await?;
        decode(&response)
    }

    /// PUT `payload` to `path` and decode the response as `R`.
    pub(crate) async fn put_json<B, R>(&self, path: &str, payload: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = encode(payload)?;
        let response = self.transport.put(path, body).await?;
        decode(&response)
    }

    /// DELETE `path`. The response body is not inspected.
    pub(crate) async fn delete_path(&self, path: &str) -> ApiResult<bool> {
        self.transport.delete(path).await?;
        Ok(true)
    }
}

fn encode<B: Serialize + ?Sized>(payload: &B) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(payload).map_err(ApiError::Serialization)
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> ApiResult<R> {
    serde_json::from_slice(body).map_err(ApiError::Deserialization)
}
