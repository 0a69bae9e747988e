use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Events served by the indexer route, addressed by offset.
pub const INDEXER_EVENT_COUNT: u64 = 25;

pub const SERIALIZED_TX: &str = r#"{"version":2,"sender":"0x7a","inputs":[],"commands":[]}"#;

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("afcall_core=debug")),
            )
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

#[derive(Clone, Default)]
pub struct Recorded {
    pub authorizations: Arc<Mutex<Vec<Option<String>>>>,
    pub slow_started: Arc<AtomicUsize>,
    pub slow_finished: Arc<AtomicUsize>,
}

impl Recorded {
    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.authorizations.lock().expect("lock poisoned").clone()
    }

    pub fn slow_started(&self) -> usize {
        self.slow_started.load(Ordering::SeqCst)
    }

    pub fn slow_finished(&self) -> usize {
        self.slow_finished.load(Ordering::SeqCst)
    }
}

/// In-process stand-in for the API, serving everything under `/api/pools`.
pub struct MockApi {
    /// Base URL with a trailing slash.
    pub url: String,
    pub recorded: Recorded,
}

impl MockApi {
    pub async fn start() -> Self {
        init_tracing();
        let recorded = Recorded::default();

        let app = Router::new()
            .route("/api/pools/big", get(big_numbers))
            .route("/api/pools/bad", get(bad_request))
            .route("/api/pools/garbage", get(garbage))
            .route("/api/pools/echo", any(echo))
            .route("/api/pools/whoami", get(whoami))
            .route("/api/pools/slow", get(slow))
            .route("/api/pools/transaction", post(transaction))
            .route("/api/pools/events", post(events))
            .route("/api/pools/indexer/events", post(indexer_events))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock listener must bind");
        let addr = listener.local_addr().expect("mock listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server must run");
        });

        Self {
            url: format!("http://{addr}/"),
            recorded,
        }
    }
}

async fn big_numbers() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"a": 123456789012345678901, "b": "99999999999999999999n", "c": 7}"#,
    )
}

async fn bad_request() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, "bad request")
}

async fn garbage() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "not json")
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(json!({
        "method": method.as_str(),
        "contentType": content_type,
        "body": body,
    }))
}

async fn whoami(State(recorded): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    recorded
        .authorizations
        .lock()
        .expect("lock poisoned")
        .push(authorization.clone());
    Json(json!({ "authorization": authorization }))
}

async fn slow(State(recorded): State<Recorded>) -> Json<Value> {
    recorded.slow_started.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(5)).await;
    recorded.slow_finished.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "done": true }))
}

async fn transaction() -> Json<Value> {
    Json(Value::String(SERIALIZED_TX.to_owned()))
}

async fn events(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "events": [{ "requested": body }],
        "nextCursor": { "txDigest": "GxV3", "eventSeq": "7" },
    }))
}

async fn indexer_events(Json(body): Json<Value>) -> Json<Vec<Value>> {
    let cursor = body.get("cursor").and_then(Value::as_u64).unwrap_or(0);
    let limit = body.get("limit").and_then(Value::as_u64).unwrap_or(1);
    let events = (cursor..INDEXER_EVENT_COUNT)
        .take(limit as usize)
        .map(|seq| {
            json!({
                "seq": seq,
                "amount": format!("{}n", 100_000_000_000_000_000_000u128 + u128::from(seq)),
            })
        })
        .collect();
    Json(events)
}
