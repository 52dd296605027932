// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for integration tests.
//!
//! `FakeBackend` is a small in-process stand-in for the managed backend. It
//! serves the REST filter dialect, a handful of stored procedures and object
//! upload from in-memory tables so routes can be exercised end to end.

use agent_console::config::Config;
use agent_console::db::SupabaseClient;
use agent_console::routes::create_router;
use agent_console::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub const OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// Recorded stored-procedure call.
#[derive(Debug, Clone)]
pub struct RpcCall {
    pub function: String,
    pub args: Value,
}

/// Recorded object upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bucket: String,
    pub path: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
pub struct FakeData {
    pub tables: HashMap<String, Vec<Value>>,
    pub rpc_calls: Vec<RpcCall>,
    pub uploads: Vec<Upload>,
    /// (table, select) of every read
    pub selects: Vec<(String, String)>,
    /// Tables whose reads fail with a 500
    pub failing_tables: Vec<String>,
    /// (apikey, authorization) of the latest request
    pub last_credentials: Option<(String, String)>,
    next_id: u64,
}

impl FakeData {
    fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("gen-{}", self.next_id)
    }

    fn rows_mut(&mut self, table: &str) -> &mut Vec<Value> {
        self.tables.entry(table.to_string()).or_default()
    }

    fn find_mut(&mut self, table: &str, id: &str) -> Option<&mut Value> {
        self.rows_mut(table)
            .iter_mut()
            .find(|row| row["id"].as_str() == Some(id))
    }
}

type Shared = Arc<Mutex<FakeData>>;

/// Handle on a running fake backend.
#[derive(Clone)]
pub struct FakeBackend {
    pub url: String,
    pub data: Shared,
}

#[allow(dead_code)]
impl FakeBackend {
    /// Start a fake backend on an ephemeral local port.
    pub async fn spawn() -> Self {
        let data: Shared = Arc::new(Mutex::new(FakeData::default()));
        let app = Router::new()
            .route("/rest/v1/rpc/{function}", post(call_procedure))
            .route(
                "/rest/v1/{table}",
                axum::routing::get(select_rows)
                    .post(insert_rows)
                    .patch(update_rows)
                    .delete(delete_rows),
            )
            .route("/storage/v1/object/{bucket}/{*path}", post(upload_object))
            .layer(DefaultBodyLimit::disable())
            .with_state(data.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend server");
        });

        Self {
            url: format!("http://{}", addr),
            data,
        }
    }

    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.data
            .lock()
            .unwrap()
            .rows_mut(table)
            .extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.data
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_table(&self, table: &str) {
        self.data
            .lock()
            .unwrap()
            .failing_tables
            .push(table.to_string());
    }

    pub fn rpc_calls(&self, function: &str) -> Vec<Value> {
        self.data
            .lock()
            .unwrap()
            .rpc_calls
            .iter()
            .filter(|c| c.function == function)
            .map(|c| c.args.clone())
            .collect()
    }

    /// Column selections sent for reads of `table`.
    pub fn selects(&self, table: &str) -> Vec<String> {
        self.data
            .lock()
            .unwrap()
            .selects
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, select)| select.clone())
            .collect()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.data.lock().unwrap().uploads.clone()
    }

    pub fn last_credentials(&self) -> Option<(String, String)> {
        self.data.lock().unwrap().last_credentials.clone()
    }
}

fn backend_error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "code": code, "message": message, "details": null, "hint": null })),
    )
        .into_response()
}

fn record_credentials(data: &mut FakeData, headers: &HeaderMap) {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    data.last_credentials = Some((get("apikey"), get("authorization")));
}

// ─── Filter dialect ──────────────────────────────────────────

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Parse `("a","b\"c")` into its values.
fn parse_in_list(raw: &str) -> Vec<String> {
    let inner = raw.trim_start_matches('(').trim_end_matches(')');
    let mut values = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if quoted => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => quoted = !quoted,
            ',' if !quoted => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if !inner.is_empty() {
        values.push(current);
    }
    values
}

fn row_matches(row: &Value, params: &[(String, String)]) -> bool {
    params.iter().all(|(column, filter)| {
        if matches!(column.as_str(), "select" | "order" | "limit") {
            return true;
        }
        let value = as_text(&row[column.as_str()]);
        if let Some(expected) = filter.strip_prefix("eq.") {
            value == expected
        } else if let Some(list) = filter.strip_prefix("in.") {
            parse_in_list(list).contains(&value)
        } else {
            false
        }
    })
}

fn has_filters(params: &[(String, String)]) -> bool {
    params
        .iter()
        .any(|(k, _)| !matches!(k.as_str(), "select" | "order" | "limit"))
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => as_text(a).cmp(&as_text(b)),
    }
}

fn apply_order_and_limit(mut rows: Vec<Value>, params: &[(String, String)]) -> Vec<Value> {
    if let Some((_, order)) = params.iter().find(|(k, _)| k == "order") {
        let keys: Vec<(String, bool)> = order
            .split(',')
            .map(|part| {
                let (column, direction) = part.rsplit_once('.').unwrap_or((part, "asc"));
                (column.to_string(), direction != "desc")
            })
            .collect();
        rows.sort_by(|a, b| {
            keys.iter()
                .map(|(column, asc)| {
                    let ord = compare(&a[column.as_str()], &b[column.as_str()]);
                    if *asc {
                        ord
                    } else {
                        ord.reverse()
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }
    if let Some((_, limit)) = params.iter().find(|(k, _)| k == "limit") {
        if let Ok(n) = limit.parse::<usize>() {
            rows.truncate(n);
        }
    }
    rows
}

// ─── Table handlers ──────────────────────────────────────────

async fn select_rows(
    State(data): State<Shared>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let mut data = data.lock().unwrap();
    record_credentials(&mut data, &headers);
    if let Some((_, select)) = params.iter().find(|(k, _)| k == "select") {
        data.selects.push((table.clone(), select.clone()));
    }

    if data.failing_tables.contains(&table) {
        return backend_error(StatusCode::INTERNAL_SERVER_ERROR, "XX000", "simulated failure");
    }

    let rows: Vec<Value> = data
        .rows_mut(&table)
        .iter()
        .filter(|row| row_matches(row, &params))
        .cloned()
        .collect();
    let rows = apply_order_and_limit(rows, &params);

    let wants_object = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == OBJECT_MEDIA_TYPE);
    if wants_object {
        return if rows.len() == 1 {
            Json(rows.into_iter().next().unwrap_or(Value::Null)).into_response()
        } else {
            backend_error(
                StatusCode::NOT_ACCEPTABLE,
                "PGRST116",
                "JSON object requested, multiple (or no) rows returned",
            )
        };
    }

    Json(Value::Array(rows)).into_response()
}

async fn insert_rows(
    State(data): State<Shared>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = data.lock().unwrap();
    record_credentials(&mut data, &headers);

    let rows = match body {
        Value::Array(rows) => rows,
        row => vec![row],
    };
    let mut inserted = Vec::new();
    for mut row in rows {
        if row.get("id").is_none() {
            let id = data.generate_id();
            row["id"] = json!(id);
        }
        inserted.push(row.clone());
        data.rows_mut(&table).push(row);
    }

    (StatusCode::CREATED, Json(Value::Array(inserted))).into_response()
}

async fn update_rows(
    State(data): State<Shared>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    let mut data = data.lock().unwrap();
    record_credentials(&mut data, &headers);

    if !has_filters(&params) {
        return backend_error(StatusCode::BAD_REQUEST, "21000", "UPDATE requires a WHERE clause");
    }

    let mut updated = Vec::new();
    for row in data.rows_mut(&table).iter_mut() {
        if row_matches(row, &params) {
            if let Value::Object(fields) = &mut *row {
                for (k, v) in &body {
                    fields.insert(k.clone(), v.clone());
                }
            }
            updated.push(row.clone());
        }
    }

    Json(Value::Array(updated)).into_response()
}

async fn delete_rows(
    State(data): State<Shared>,
    Path(table): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let mut data = data.lock().unwrap();
    record_credentials(&mut data, &headers);

    if !has_filters(&params) {
        return backend_error(StatusCode::BAD_REQUEST, "21000", "DELETE requires a WHERE clause");
    }
    data.rows_mut(&table).retain(|row| !row_matches(row, &params));
    StatusCode::NO_CONTENT.into_response()
}

// ─── Stored procedures ───────────────────────────────────────

fn set_status(data: &mut FakeData, table: &str, id: &str, status: &str) -> Option<Value> {
    let row = data.find_mut(table, id)?;
    row["status"] = json!(status);
    Some(row.clone())
}

fn not_found(what: &str) -> Response {
    backend_error(StatusCode::BAD_REQUEST, "P0001", &format!("{} not found", what))
}

async fn call_procedure(
    State(data): State<Shared>,
    Path(function): Path<String>,
    headers: HeaderMap,
    Json(args): Json<Value>,
) -> Response {
    let mut data = data.lock().unwrap();
    record_credentials(&mut data, &headers);
    data.rpc_calls.push(RpcCall {
        function: function.clone(),
        args: args.clone(),
    });

    let arg = |name: &str| args[name].as_str().unwrap_or_default().to_string();

    match function.as_str() {
        "approve_cashout" | "reject_cashout" => {
            let (id, status) = if function == "approve_cashout" {
                (arg("transaction_id_to_approve"), "completed")
            } else {
                (arg("transaction_id_to_reject"), "rejected")
            };
            match set_status(&mut data, "transactions", &id, status) {
                Some(_) => Json(Value::Null).into_response(),
                None => not_found("Transaction"),
            }
        }
        "finalize_purchase" | "reject_purchase" => {
            let id = arg("p_purchase_id");
            let shipped = data
                .find_mut("purchases", &id)
                .is_some_and(|row| row["status"] == "shipped");
            if !shipped {
                return Json(json!({
                    "success": false,
                    "message": "Purchase is not awaiting finalization"
                }))
                .into_response();
            }
            let status = if function == "finalize_purchase" {
                "completed"
            } else {
                "rejected"
            };
            set_status(&mut data, "purchases", &id, status);
            Json(json!({ "success": true, "message": format!("Purchase {}", status) }))
                .into_response()
        }
        "resolve_report" => match set_status(&mut data, "reports", &arg("report_id_to_resolve"), "resolved") {
            Some(_) => Json(Value::Null).into_response(),
            None => not_found("Report"),
        },
        "close_poll" => match set_status(&mut data, "polls", &arg("p_poll_id"), "closed") {
            Some(row) => Json(row).into_response(),
            None => not_found("Poll"),
        },
        "get_blog_post_for_agent" => {
            let id = arg("p_post_id");
            let post = data.find_mut("blog_posts", &id).cloned().unwrap_or(Value::Null);
            Json(post).into_response()
        }
        "delete_blog_post" => {
            let id = arg("p_post_id");
            let posts = data.rows_mut("blog_posts");
            let before = posts.len();
            posts.retain(|row| row["id"].as_str() != Some(id.as_str()));
            if posts.len() == before {
                backend_error(
                    StatusCode::BAD_REQUEST,
                    "P0001",
                    "Blog post not found or not authorized to delete.",
                )
            } else {
                Json(Value::Null).into_response()
            }
        }
        "analyze_gamification_profitability" => Json(json!({
            "total_revenue": 1250.0,
            "total_reward_cost": 310.5,
            "net_profit": 939.5,
            "period_start": args["start_date"],
            "period_end": args["end_date"],
        }))
        .into_response(),
        _ => {
            let mut echoed = args.clone();
            if let Value::Object(fields) = &mut echoed {
                let id = data.generate_id();
                fields.insert("id".to_string(), json!(id));
            }
            Json(echoed).into_response()
        }
    }
}

async fn upload_object(
    State(data): State<Shared>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut data = data.lock().unwrap();
    record_credentials(&mut data, &headers);

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    data.uploads.push(Upload {
        bucket: bucket.clone(),
        path: path.clone(),
        content_type,
        size: body.len(),
    });

    Json(json!({ "Key": format!("{}/{}", bucket, path) })).into_response()
}

// ─── App and request helpers ─────────────────────────────────

/// Config pointing at `backend_url`.
#[allow(dead_code)]
pub fn test_config(backend_url: &str) -> Config {
    let mut config = Config::test_default();
    config.supabase_url = backend_url.to_string();
    config
}

/// Create a test app talking to `backend`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(backend: &FakeBackend) -> (Router, Arc<AppState>) {
    let config = test_config(&backend.url);
    let client = SupabaseClient::new(&config.supabase_url, &config.supabase_anon_key)
        .expect("backend client");
    let state = Arc::new(AppState::new(config, client));
    (create_router(state.clone()), state)
}

/// Create a test app whose backend is offline.
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        SupabaseClient::new_mock(),
    ));
    (create_router(state.clone()), state)
}

/// Mint a session token the way the backend's auth service does.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, user_type: Option<&str>, secret: &[u8]) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let mut claims = json!({
        "sub": user_id,
        "aud": "authenticated",
        "exp": now + 3600,
        "iat": now,
        "email": format!("{}@example.com", user_id),
        "user_metadata": {},
    });
    if let Some(user_type) = user_type {
        claims["user_metadata"]["user_type"] = json!(user_type);
    }

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

/// Token for an agent signed with the test config's secret.
#[allow(dead_code)]
pub fn agent_token() -> String {
    create_test_jwt("agent-1", Some("agent"), &Config::test_default().jwt_secret)
}

/// Send a request and decode the JSON response (Null when empty).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };
    (status, value)
}
