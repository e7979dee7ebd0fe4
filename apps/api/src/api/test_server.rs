//! In-process HTTP server that records requests and answers with a canned body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde_json::Value;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    pub async fn last(&self) -> Recorded {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("no request reached the test server")
    }

    pub async fn count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

async fn record(
    State(canned): State<Canned>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    // Repeated headers are folded into one comma-separated value.
    let mut folded: HashMap<String, String> = HashMap::new();
    for (name, value) in &headers {
        let Ok(value) = value.to_str() else { continue };
        folded
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    let headers = folded;

    canned.requests.lock().await.push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    (canned.status, Json(canned.body.clone()))
}

/// Starts a server on an ephemeral port answering every request with `body`.
pub async fn spawn(status: u16, body: Value) -> TestServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let canned = Canned {
        status: StatusCode::from_u16(status).expect("valid status code"),
        body,
        requests: requests.clone(),
    };

    let app = Router::new().fallback(record).with_state(canned);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    TestServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}
