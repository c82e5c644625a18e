//! Local stand-in for the Todoist REST API, served with axum.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

pub const TOKEN: &str = "secret-token";

#[derive(Default)]
pub struct FixtureState {
    pub tasks: Vec<Value>,
    pub updates: Vec<(String, Value)>,
    pub auth_headers: Vec<String>,
}

pub type Shared = Arc<Mutex<FixtureState>>;

pub struct Fixture {
    /// Base URL to hand to the client, e.g. `http://127.0.0.1:1234/rest/v2`
    pub base_url: String,
    /// Same server, but every request stalls for two seconds
    pub slow_base_url: String,
    pub state: Shared,
}

impl Fixture {
    pub fn updates(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn auth_headers(&self) -> Vec<String> {
        self.state.lock().unwrap().auth_headers.clone()
    }
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let ok = header == format!("Bearer {}", TOKEN);
    state.lock().unwrap().auth_headers.push(header);
    ok
}

async fn list_tasks(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return (StatusCode::UNAUTHORIZED, "Forbidden").into_response();
    }
    let tasks = state.lock().unwrap().tasks.clone();
    Json(Value::Array(tasks)).into_response()
}

async fn update_task(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return (StatusCode::UNAUTHORIZED, "Forbidden").into_response();
    }
    let date = body["due_date"].clone();
    state.lock().unwrap().updates.push((id.clone(), body));
    Json(serde_json::json!({ "id": id, "due": { "date": date } })).into_response()
}

async fn slow_list_tasks() -> Response {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(Value::Array(Vec::new())).into_response()
}

pub async fn spawn_fixture(tasks: Vec<Value>) -> Fixture {
    let state: Shared = Arc::new(Mutex::new(FixtureState {
        tasks,
        ..Default::default()
    }));

    let app = Router::new()
        .route("/rest/v2/tasks", get(list_tasks))
        .route("/rest/v2/tasks/{id}", post(update_task))
        .route("/slow/rest/v2/tasks", get(slow_list_tasks))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Fixture {
        base_url: format!("http://{}/rest/v2", addr),
        slow_base_url: format!("http://{}/slow/rest/v2", addr),
        state,
    }
}

pub fn task(id: &str, labels: &[&str], due: Option<&str>, completed: bool) -> Value {
    serde_json::json!({
        "id": id,
        "content": format!("Task {}", id),
        "labels": labels,
        "due": due.map(|d| serde_json::json!({ "date": d, "string": d, "is_recurring": false })),
        "is_completed": completed,
        "priority": 1,
    })
}
