//! Shared test fixture: an in-process stub of the analytics backend.
//!
//! Serves the three API routes with canned data, records every request
//! (hit counts and raw query strings), and can be scripted to delay
//! responses or fail with 500s to exercise dedup and retry behavior.
//! A name filter with no matches returns 404, like the real backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;

#[derive(Default)]
pub struct StubState {
    hits: Mutex<HashMap<String, usize>>,
    queries: Mutex<HashMap<String, Vec<Option<String>>>>,
    fail_next: Mutex<HashMap<String, usize>>,
    delay: Mutex<Duration>,
}

impl StubState {
    /// Record a request; returns a canned 500 while failures are scripted.
    async fn intercept(&self, path: &str, query: Option<String>) -> Option<Response> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        *self.hits.lock().unwrap().entry(path.to_string()).or_default() += 1;
        self.queries
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push(query);

        let mut fails = self.fail_next.lock().unwrap();
        if let Some(remaining) = fails.get_mut(path) {
            if *remaining > 0 {
                *remaining -= 1;
                return Some(
                    (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response(),
                );
            }
        }
        None
    }
}

pub struct StubApi {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubApi {
    /// Bind to an ephemeral port and serve until the test ends.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/api/purchase-frequency", get(purchase_frequency))
            .route("/api/customers", get(customers))
            .route("/api/customers/{id}/purchases", get(customer_purchases))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// Requests seen for a path (relative to the API base, e.g.
    /// `"/customers"`).
    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    /// Raw query strings seen for a path, in request order. `None` means
    /// the request URL carried no query string at all.
    pub fn queries(&self, path: &str) -> Vec<Option<String>> {
        self.state
            .queries
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next `count` requests to `path` fail with a 500.
    pub fn fail_next(&self, path: &str, count: usize) {
        self.state
            .fail_next
            .lock()
            .unwrap()
            .insert(path.to_string(), count);
    }

    /// Delay every response, so tests can observe in-flight requests.
    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = delay;
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn purchase_frequency(
    State(state): State<Arc<StubState>>,
    RawQuery(query): RawQuery,
) -> Response {
    if let Some(resp) = state.intercept("/purchase-frequency", query).await {
        return resp;
    }
    Json(json!([
        { "range": "0-20000", "count": 10 },
        { "range": "20000-40000", "count": 4 },
    ]))
    .into_response()
}

async fn customers(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
    RawQuery(query): RawQuery,
) -> Response {
    if let Some(resp) = state.intercept("/customers", query).await {
        return resp;
    }

    let mut list = vec![
        json!({ "id": 1, "name": "김철수", "count": 5, "totalAmount": 300000 }),
        json!({ "id": 2, "name": "이영희", "count": 8, "totalAmount": 650000 }),
        json!({ "id": 3, "name": "박민수", "count": 2, "totalAmount": 120000 }),
    ];

    if let Some(name) = params.get("name") {
        list.retain(|c| c["name"].as_str().unwrap().contains(name.as_str()));
        if list.is_empty() {
            return (StatusCode::NOT_FOUND, "no matching customers").into_response();
        }
    }

    match params.get("sortBy").map(String::as_str) {
        Some("asc") => list.sort_by_key(|c| c["totalAmount"].as_i64()),
        Some("desc") => {
            list.sort_by_key(|c| std::cmp::Reverse(c["totalAmount"].as_i64()))
        }
        _ => {}
    }

    Json(json!(list)).into_response()
}

async fn customer_purchases(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    let path = format!("/customers/{}/purchases", id);
    if let Some(resp) = state.intercept(&path, query).await {
        return resp;
    }

    // Customer 9 has never bought anything.
    if id == 9 {
        return Json(json!([])).into_response();
    }

    Json(json!([
        {
            "date": "2024-07-15",
            "quantity": 2,
            "product": "무선 이어폰",
            "price": 89000,
            "imgSrc": "https://example.com/img/earbuds.jpg"
        },
        {
            "date": "2024-07-02T09:30:00.000Z",
            "quantity": 1,
            "product": "기계식 키보드",
            "price": 129000,
            "imgSrc": ""
        },
    ]))
    .into_response()
}
