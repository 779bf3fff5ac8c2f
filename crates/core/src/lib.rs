//! Data model and client-side checks for the Circonus dashboard and metric
//! cluster APIs.
//!
//! This crate performs no I/O. It defines the resource types, the CID shape
//! validation run before CID-addressed requests, and search query-string
//! construction. `circonus_api` builds the request layer on top of it.

pub mod cid;
pub mod dashboard;
mod de;
pub mod error;
pub mod metric_cluster;
pub mod search;
