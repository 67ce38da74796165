use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, Html, IntoResponse, Response},
    routing::get,
};
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum DetailReply {
    Json(Value),
    Delayed(Duration, Value),
    Status(StatusCode),
}

#[derive(Debug, Clone)]
enum SearchReply {
    Json(Value),
    Html(String),
    Status(StatusCode),
}

#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
}

#[derive(Default)]
struct MockState {
    landing: Option<(Vec<String>, String)>,
    search: Option<SearchReply>,
    details: HashMap<String, DetailReply>,
    captured: Mutex<Vec<CapturedRequest>>,
}

impl MockState {
    fn capture(&self, path: String, query: Option<String>, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        if let Ok(mut captured) = self.captured.lock() {
            captured.push(CapturedRequest {
                path,
                query,
                cookie: header("cookie"),
                csrf_token: header("x-csrf-token"),
            });
        }
    }
}

#[derive(Default)]
pub struct MockUpstreamBuilder {
    state: MockState,
}

impl MockUpstreamBuilder {
    pub fn landing(mut self, set_cookies: &[&str], html: &str) -> Self {
        self.state.landing = Some((
            set_cookies.iter().map(|s| s.to_string()).collect(),
            html.to_string(),
        ));
        self
    }

    pub fn search(mut self, body: Value) -> Self {
        self.state.search = Some(SearchReply::Json(body));
        self
    }

    pub fn search_status(mut self, status: StatusCode) -> Self {
        self.state.search = Some(SearchReply::Status(status));
        self
    }

    pub fn search_html(mut self, html: &str) -> Self {
        self.state.search = Some(SearchReply::Html(html.to_string()));
        self
    }

    pub fn detail(mut self, id: &str, reply: DetailReply) -> Self {
        self.state.details.insert(id.to_string(), reply);
        self
    }

    pub async fn start(self) -> MockUpstream {
        let state = Arc::new(self.state);

        let mut app = Router::new()
            .route("/api/v1/phrases/search", get(search))
            .route("/api/v1/phrases/{id}", get(detail));
        if state.landing.is_some() {
            app = app.route("/", get(landing));
        }
        let app = app.with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockUpstream { addr, state }
    }
}

pub struct MockUpstream {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn builder() -> MockUpstreamBuilder {
        MockUpstreamBuilder::default()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.state
            .captured
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn captured_for(&self, path: &str) -> Vec<CapturedRequest> {
        self.captured()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn landing(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.capture("/".to_string(), None, &headers);

    let Some((cookies, html)) = state.landing.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let set_cookies: Vec<_> = cookies.into_iter().map(|c| (SET_COOKIE, c)).collect();
    (AppendHeaders(set_cookies), Html(html)).into_response()
}

async fn search(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state.capture("/api/v1/phrases/search".to_string(), query, &headers);

    match state.search.clone() {
        Some(SearchReply::Json(body)) => Json(body).into_response(),
        Some(SearchReply::Html(html)) => Html(html).into_response(),
        Some(SearchReply::Status(status)) => (status, "search unavailable").into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn detail(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.capture(format!("/api/v1/phrases/{id}"), None, &headers);

    match state.details.get(&id).cloned() {
        Some(DetailReply::Json(body)) => Json(body).into_response(),
        Some(DetailReply::Delayed(delay, body)) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
        Some(DetailReply::Status(status)) => status.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
