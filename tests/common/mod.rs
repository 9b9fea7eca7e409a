#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use rentdesk::config::ClientConfig;
use rentdesk::remote::{RemoteClient, Sleeper, StaticToken, TokenSource};

pub const TOKEN: &str = "admin-token";

/// One request as the stub saw it.
#[derive(Clone, Debug)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

struct StubState {
    hits: AtomicUsize,
    script: Mutex<VecDeque<(u16, String)>>,
    fallback: (u16, String),
    seen: Mutex<Vec<Seen>>,
}

/// In-process lease service answering from a script, then from a fallback.
pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl StubServer {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Seen {
        self.seen().pop().expect("stub saw no request")
    }

    pub fn push(&self, status: u16, body: &str) {
        self.state
            .script
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    pub fn client(&self) -> Result<RemoteClient> {
        self.client_with_tokens(Arc::new(StaticToken(Some(TOKEN.to_string()))))
    }

    pub fn client_with_tokens(&self, tokens: Arc<dyn TokenSource>) -> Result<RemoteClient> {
        let cfg = ClientConfig {
            api_url: Some(format!("{}/", self.base_url)),
            admin_id: 42,
            ..ClientConfig::default()
        };
        Ok(RemoteClient::new(&cfg, tokens)?)
    }
}

async fn answer(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.seen.lock().unwrap().push(Seen {
        method,
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).ok(),
    });

    let (status, body) = state
        .script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| state.fallback.clone());
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn spawn_stub(fallback_status: u16, fallback_body: &str) -> Result<StubServer> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind stub listener")?;
    let addr = listener.local_addr().context("stub local addr")?;

    let state = Arc::new(StubState {
        hits: AtomicUsize::new(0),
        script: Mutex::new(VecDeque::new()),
        fallback: (fallback_status, fallback_body.to_string()),
        seen: Mutex::new(Vec::new()),
    });
    let app = Router::new().fallback(answer).with_state(Arc::clone(&state));
    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(StubServer {
        base_url: format!("http://{}", addr),
        state,
        task,
    })
}

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, dur: Duration) {
        self.slept.lock().unwrap().push(dur);
    }
}

/// Hands out the scripted answers in order, then `TOKEN` forever.
pub struct ScriptedTokens {
    script: Mutex<VecDeque<Option<String>>>,
    pub asked: AtomicUsize,
}

impl ScriptedTokens {
    pub fn new(script: impl IntoIterator<Item = Option<&'static str>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().map(|t| t.map(str::to_string)).collect()),
            asked: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TokenSource for ScriptedTokens {
    async fn token(&self) -> Option<String> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Some(TOKEN.to_string()))
    }
}

pub fn lease_json(id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "tenantId": 7,
        "apartmentId": 40,
        "tenantName": "Ada Tenant",
        "apartment": "12B",
        "leaseStartDate": "2025-01-01T00:00:00Z",
        "leaseEndDate": "2026-01-01T00:00:00Z",
        "rentAmount": "150000",
        "status": status,
        "admin_doc_url": ""
    })
}

pub fn leases_body(rows: &[(i64, &str)]) -> String {
    serde_json::Value::Array(rows.iter().map(|(id, s)| lease_json(*id, s)).collect()).to_string()
}
