use circonus_core::error::CoreError;

use crate::transport::TransportError;

/// Error type for every resource operation.
///
/// Each variant is propagated unchanged from where it occurred; nothing is
/// retried or reclassified.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A client-side check failed (absent or malformed CID), before any
    /// request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Encoding a request body failed.
    #[error("Failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response body did not decode into the expected type.
    #[error("Failed to decode response body: {0}")]
    Deserialization(#[source] serde_json::Error),
}

/// Convenience alias for operation results.
pub type ApiResult<T> = Result<T, ApiError>;
