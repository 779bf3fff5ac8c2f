//! HTTP handler latency tracking backed by a Prometheus histogram.
//!
//! Wrap any handler or router in a [`TrackLatencyLayer`] and every request it
//! serves is timed and recorded into the shared [`LatencyRecorder`]:
//!
//! ```
//! use axum::{routing::get, Router};
//! use circonus_metrics::{LatencyRecorder, TrackLatencyLayer};
//!
//! let recorder = LatencyRecorder::new().expect("register histogram");
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(TrackLatencyLayer::new("index", recorder.clone()));
//! ```

pub mod latency;

pub use latency::{
    metric_name, LatencyRecorder, MetricsError, TrackLatency, TrackLatencyLayer,
    LATENCY_METRIC_NAME,
};
