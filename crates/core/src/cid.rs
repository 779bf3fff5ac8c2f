//! Canonical identifiers (CIDs) for API resources.
//!
//! A CID is a server-assigned path such as `/dashboard/1234`. Its shape is the
//! only thing checked on the client before a CID-addressed request is sent.

use std::fmt;

use regex::Regex;

use crate::error::CoreError;

/// The resource families addressed by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Dashboard,
    MetricCluster,
}

impl ResourceKind {
    /// Collection base path, e.g. `/dashboard`.
    pub fn base_path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::MetricCluster => "/metric_cluster",
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::MetricCluster => "metric cluster",
        }
    }

    /// Anchored pattern a CID of this kind must match.
    pub fn cid_pattern(self) -> String {
        format!("^{}/[0-9]+$", self.base_path())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Check whether `cid` has the `/<base>/<digits>` shape for `kind`.
///
/// A pattern compilation failure is returned as an error rather than `false`;
/// it indicates a programming error, not a bad identifier.
pub fn cid_matches(kind: ResourceKind, cid: &str) -> Result<bool, regex::Error> {
    let pattern = Regex::new(&kind.cid_pattern())?;
    Ok(pattern.is_match(cid))
}

/// Validate an optional CID, returning the borrowed path on success.
///
/// - `None` or `""` fails with `Invalid <kind> CID [none]`.
/// - A present but malformed value fails with `Invalid <kind> CID [<value>]`.
///
/// # Examples
///
/// ```
/// use circonus_core::cid::{validate_cid, ResourceKind};
///
/// assert_eq!(
///     validate_cid(ResourceKind::Dashboard, Some("/dashboard/1234")).unwrap(),
///     "/dashboard/1234"
/// );
/// assert!(validate_cid(ResourceKind::Dashboard, Some("/metric_cluster/1")).is_err());
/// assert!(validate_cid(ResourceKind::Dashboard, None).is_err());
/// ```
pub fn validate_cid(kind: ResourceKind, cid: Option<&str>) -> Result<&str, CoreError> {
    let cid = match cid {
        Some(c) if !c.is_empty() => c,
        _ => return Err(CoreError::missing_cid(kind)),
    };

    if !cid_matches(kind, cid)? {
        return Err(CoreError::malformed_cid(kind, cid));
    }

    Ok(cid)
}
