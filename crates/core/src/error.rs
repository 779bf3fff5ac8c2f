use crate::cid::ResourceKind;

/// Errors raised by the client-side checks in `circonus_core`.
///
/// These are the only validations performed locally; everything else about a
/// resource is validated by the remote service.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A CID was absent, empty, or did not have the `/<resource>/<digits>` shape.
    ///
    /// `value` is `None` when the CID was absent or empty, which renders as
    /// `[none]` to distinguish it from a malformed literal.
    #[error("Invalid {} CID [{}]", .resource.label(), .value.as_deref().unwrap_or("none"))]
    InvalidCid {
        resource: ResourceKind,
        value: Option<String>,
    },

    /// The CID pattern itself failed to compile.
    #[error("CID pattern error: {0}")]
    CidPattern(#[from] regex::Error),
}

impl CoreError {
    /// Build an [`CoreError::InvalidCid`] for an absent or empty CID.
    pub fn missing_cid(resource: ResourceKind) -> Self {
        Self::InvalidCid {
            resource,
            value: None,
        }
    }

    /// Build an [`CoreError::InvalidCid`] for a malformed CID literal.
    pub fn malformed_cid(resource: ResourceKind, value: impl Into<String>) -> Self {
        Self::InvalidCid {
            resource,
            value: Some(value.into()),
        }
    }
}
