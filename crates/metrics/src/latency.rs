//! Request latency histogram and the tower layer that feeds it.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::Request;
use futures::future::BoxFuture;
use prometheus::{Encoder, Histogram, HistogramOpts, HistogramVec, Registry, TextEncoder};
use tower::{Layer, Service};

/// Name of the histogram every tracked handler records into.
pub const LATENCY_METRIC_NAME: &str = "http_handler_latency_seconds";

/// Errors from registering or rendering metrics.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Metrics text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Flat Circonus-style metric name for one handler, e.g. ``HTTP`GET`index`latency``.
pub fn metric_name(method: &str, handler: &str) -> String {
    format!("HTTP`{method}`{handler}`latency")
}

/// Shared handle to the latency histogram, labelled by method and handler.
///
/// Cloning is cheap; all clones record into the same registry.
#[derive(Clone)]
pub struct LatencyRecorder {
    registry: Registry,
    latency: HistogramVec,
}

impl LatencyRecorder {
    /// Create a recorder with its own registry.
    pub fn new() -> Result<Self, MetricsError> {
        Self::with_registry(Registry::new())
    }

    /// Create a recorder that registers its histogram into `registry`.
    pub fn with_registry(registry: Registry) -> Result<Self, MetricsError> {
        let latency = HistogramVec::new(
            HistogramOpts::new(LATENCY_METRIC_NAME, "HTTP handler latency in seconds"),
            &["method", "handler"],
        )?;
        registry.register(Box::new(latency.clone()))?;
        Ok(Self { registry, latency })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Histogram for one method/handler pair.
    pub fn histogram(&self, method: &str, handler: &str) -> Histogram {
        self.latency.with_label_values(&[method, handler])
    }

    /// Record one observation, in seconds.
    pub fn observe(&self, method: &str, handler: &str, seconds: f64) {
        self.histogram(method, handler).observe(seconds);
    }

    /// Render every metric in the registry in the Prometheus text format.
    pub fn gather_text(&self) -> Result<String, MetricsError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl std::fmt::Debug for LatencyRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatencyRecorder").finish_non_exhaustive()
    }
}

/// [`Layer`] that times every request passing through the wrapped service.
#[derive(Debug, Clone)]
pub struct TrackLatencyLayer {
    name: Arc<str>,
    recorder: LatencyRecorder,
}

impl TrackLatencyLayer {
    /// `name` becomes the `handler` label on every observation.
    pub fn new(name: impl Into<Arc<str>>, recorder: LatencyRecorder) -> Self {
        Self {
            name: name.into(),
            recorder,
        }
    }
}

impl<S> Layer<S> for TrackLatencyLayer {
    type Service = TrackLatency<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TrackLatency {
            inner,
            name: Arc::clone(&self.name),
            recorder: self.recorder.clone(),
        }
    }
}

/// Service produced by [`TrackLatencyLayer`].
///
/// The elapsed time is recorded once the inner future resolves, whether it
/// succeeded or not.
#[derive(Debug, Clone)]
pub struct TrackLatency<S> {
    inner: S,
    name: Arc<str>,
    recorder: LatencyRecorder,
}

impl<S, B> Service<Request<B>> for TrackLatency<S>
where
    S: Service<Request<B>>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let method = request.method().as_str().to_owned();
        let histogram = self.recorder.histogram(&method, &self.name);
        let name = Arc::clone(&self.name);
        let start = Instant::now();
        let future = self.inner.call(request);

        Box::pin(async move {
            let result = future.await;
            let elapsed = start.elapsed().as_secs_f64();
            histogram.observe(elapsed);
            tracing::trace!(metric = %metric_name(&method, &name), elapsed, "Recorded handler latency");
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::Duration;

    use axum::body::Body;
    use axum::routing::{get, post};
    use axum::Router;
    use tower::{service_fn, ServiceExt};

    use super::*;

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn metric_name_is_backtick_separated() {
        assert_eq!(metric_name("GET", "index"), "HTTP`GET`index`latency");
    }

    #[tokio::test]
    async fn records_one_observation_per_request() {
        let recorder = LatencyRecorder::new().unwrap();
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(TrackLatencyLayer::new("index", recorder.clone()));

        let response = app.clone().oneshot(request("GET", "/")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(recorder.histogram("GET", "index").get_sample_count(), 1);

        app.oneshot(request("GET", "/")).await.unwrap();
        assert_eq!(recorder.histogram("GET", "index").get_sample_count(), 2);
    }

    #[tokio::test]
    async fn labels_by_method_and_handler() {
        let recorder = LatencyRecorder::new().unwrap();
        let app = Router::new()
            .route("/a", get(|| async { "a" }))
            .route("/b", post(|| async { "b" }))
            .layer(TrackLatencyLayer::new("api", recorder.clone()));

        app.clone().oneshot(request("GET", "/a")).await.unwrap();
        app.oneshot(request("POST", "/b")).await.unwrap();

        assert_eq!(recorder.histogram("GET", "api").get_sample_count(), 1);
        assert_eq!(recorder.histogram("POST", "api").get_sample_count(), 1);
        assert_eq!(recorder.histogram("PUT", "api").get_sample_count(), 0);
    }

    #[tokio::test]
    async fn elapsed_time_is_in_seconds() {
        let recorder = LatencyRecorder::new().unwrap();
        let svc = TrackLatencyLayer::new("slow", recorder.clone()).layer(service_fn(
            |_req: Request<()>| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, Infallible>(())
            },
        ));

        svc.oneshot(Request::new(())).await.unwrap();

        let histogram = recorder.histogram("GET", "slow");
        assert_eq!(histogram.get_sample_count(), 1);
        let sum = histogram.get_sample_sum();
        assert!(sum >= 0.02 && sum < 5.0, "unexpected latency sum {sum}");
    }

    #[tokio::test]
    async fn failed_requests_are_still_timed() {
        let recorder = LatencyRecorder::new().unwrap();
        let svc = TrackLatencyLayer::new("broken", recorder.clone())
            .layer(service_fn(|_req: Request<()>| async { Err::<(), _>("boom") }));

        assert_eq!(svc.oneshot(Request::new(())).await, Err("boom"));
        assert_eq!(recorder.histogram("GET", "broken").get_sample_count(), 1);
    }

    #[test]
    fn gather_text_exposes_histogram() {
        let recorder = LatencyRecorder::new().unwrap();
        recorder.observe("GET", "index", 0.25);

        let text = recorder.gather_text().unwrap();
        assert!(text.contains("# TYPE http_handler_latency_seconds histogram"));
        assert!(text.contains("http_handler_latency_seconds_count{"));
        assert!(text.contains(r#"handler="index""#));
        assert!(text.contains(r#"method="GET""#));
    }

    #[test]
    fn shared_registry_rejects_duplicate_recorder() {
        let registry = Registry::new();
        LatencyRecorder::with_registry(registry.clone()).unwrap();
        let err = LatencyRecorder::with_registry(registry).unwrap_err();
        assert!(matches!(err, MetricsError::Prometheus(_)));
    }
}
