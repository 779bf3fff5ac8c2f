//! Typed client for the Circonus dashboard and metric cluster APIs.
//!
//! [`Api`] wraps a [`Transport`] and exposes fetch, create, update, delete
//! and search operations that translate between the JSON wire format and the
//! types in [`circonus_core`].
//!
//! ```no_run
//! use circonus_api::{Api, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Api::from_config(&ClientConfig::from_env()?)?;
//! let dashboard = api.fetch_dashboard(Some("/dashboard/1234")).await?;
//! println!("{}", dashboard.title);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metric_cluster;
pub mod transport;

pub use circonus_core as model;
pub use client::Api;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use transport::{HttpTransport, Transport, TransportError};
