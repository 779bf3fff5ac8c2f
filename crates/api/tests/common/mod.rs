#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

use circonus_api::{Api, ClientConfig, HttpTransport, Transport, TransportError};
use circonus_core::dashboard::Dashboard;
use circonus_core::metric_cluster::{MetricCluster, MetricQuery};

/// Raw JSON of the dashboard served at `/dashboard/1234`.
pub const DASHBOARD_JSON: &str = include_str!("../fixtures/dashboard.json");

pub fn test_dashboard() -> Dashboard {
    serde_json::from_str(DASHBOARD_JSON).expect("fixture should decode")
}

pub fn test_metric_cluster() -> MetricCluster {
    MetricCluster {
        cid: Some("/metric_cluster/1234".to_string()),
        name: "test".to_string(),
        queries: vec![MetricQuery::new("*Req*", "average")],
        description: String::new(),
        tags: vec![],
        ..MetricCluster::default()
    }
}

// ---------------------------------------------------------------------------
// Recording mock transport
// ---------------------------------------------------------------------------

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl Call {
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(self.body.as_deref().expect("call has a body"))
            .expect("body should be JSON")
    }
}

type Responder = Box<dyn Fn(&Call) -> Result<Vec<u8>, TransportError> + Send + Sync>;

/// In-memory transport that records every call and answers from a closure.
pub struct MockTransport {
    calls: Mutex<Vec<Call>>,
    responder: Responder,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Call) -> Result<Vec<u8>, TransportError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answers every call with `body`.
    pub fn replying(body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self::new(move |_| Ok(body.clone()))
    }

    /// Answers every call with an HTTP status error.
    pub fn failing(status: u16) -> Self {
        Self::new(move |_| {
            Err(TransportError::Status {
                status,
                body: "boom".to_string(),
            })
        })
    }

    /// Echoes the request body back, or `{}` for body-less calls.
    pub fn echoing() -> Self {
        Self::new(|call| Ok(call.body.clone().unwrap_or_else(|| b"{}".to_vec())))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>, TransportError> {
        let call = Call {
            method,
            path: path.to_string(),
            body,
        };
        let result = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        result
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        self.record("GET", path, None)
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.record("PUT", path, Some(body))
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        self.record("POST", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        self.record("DELETE", path, None)
    }
}

// ---------------------------------------------------------------------------
// HTTP test servers
// ---------------------------------------------------------------------------

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

/// Build an HTTP-backed client pointed at `url` with a test token.
pub fn http_api(url: &str) -> Api<HttpTransport> {
    let config = ClientConfig::new("abc123").with_app("test").with_url(url);
    Api::from_config(&config).expect("client should build")
}

fn json_response(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        body.into(),
    )
        .into_response()
}

fn not_found(method: &Method, uri: &Uri) -> Response {
    (StatusCode::NOT_FOUND, format!("not found: {method} {uri}")).into_response()
}

/// Dashboard API stand-in.
///
/// `/dashboard/1234` answers GET with the fixture, echoes PUT bodies and
/// accepts DELETE. `/dashboard` lists the fixture on GET (any query) and
/// answers POST with the fixture.
pub fn dashboard_router() -> Router {
    Router::new().fallback(|method: Method, uri: Uri, body: Bytes| async move {
        match (uri.path(), method.as_str()) {
            ("/dashboard/1234", "GET") => json_response(StatusCode::OK, DASHBOARD_JSON),
            ("/dashboard/1234", "PUT") => {
                json_response(StatusCode::OK, String::from_utf8_lossy(&body).into_owned())
            }
            ("/dashboard/1234", "DELETE") => json_response(StatusCode::OK, ""),
            ("/dashboard", "GET") => {
                json_response(StatusCode::OK, format!("[{DASHBOARD_JSON}]"))
            }
            ("/dashboard", "POST") => json_response(StatusCode::OK, DASHBOARD_JSON),
            _ => not_found(&method, &uri),
        }
    })
}

/// Metric cluster API stand-in.
///
/// Collection GETs only answer the exact query strings a well-formed search
/// produces; anything else is a 404.
pub fn metric_cluster_router() -> Router {
    Router::new().fallback(|method: Method, uri: Uri, body: Bytes| async move {
        let cluster = serde_json::to_string(&test_metric_cluster()).expect("encode cluster");
        match (uri.path(), method.as_str()) {
            ("/metric_cluster/1234", "GET") => json_response(StatusCode::OK, cluster),
            ("/metric_cluster/1234", "PUT") => {
                json_response(StatusCode::OK, String::from_utf8_lossy(&body).into_owned())
            }
            ("/metric_cluster/1234", "DELETE") => json_response(StatusCode::OK, ""),
            ("/metric_cluster", "GET") => match uri.query() {
                None
                | Some("search=web+servers")
                | Some("f_tags_has=dc%3Asfo1")
                | Some("f_tags_has=dc%3Asfo1&search=web+servers") => {
                    json_response(StatusCode::OK, format!("[{cluster}]"))
                }
                Some(_) => not_found(&method, &uri),
            },
            ("/metric_cluster", "POST") => {
                // Assign a CID the way the service does.
                let mut created: serde_json::Value =
                    serde_json::from_slice(&body).unwrap_or_default();
                created["_cid"] = "/metric_cluster/5678".into();
                json_response(StatusCode::OK, created.to_string())
            }
            _ => not_found(&method, &uri),
        }
    })
}

/// Echoes the auth headers it received as a JSON object.
pub fn header_echo_router() -> Router {
    Router::new().fallback(|headers: HeaderMap| async move {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        let body = serde_json::json!({
            "token": get("x-circonus-auth-token"),
            "app": get("x-circonus-app-name"),
            "accept": get("accept"),
        });
        json_response(StatusCode::OK, body.to_string())
    })
}
