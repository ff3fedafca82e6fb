//! Shared helpers for the HTTP and storage integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Form, Path, State};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing;
use axum::{Json, Router};
use http_body_util::BodyExt;
use rsvp_server::config::{ServerConfig, SheetsConfig};
use rsvp_server::{build_router, storage, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_KEY: &str = include_str!("../fixtures/test_service_account.pem");
const FAKE_TOKEN: &str = "fake-access-token";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Router backed by a fresh local store. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn local_app() -> (Router, TempDir) {
    let data_dir = tempfile::tempdir().expect("temp dir");
    let app = app_for(&ServerConfig::local(data_dir.path())).await;
    (app, data_dir)
}

/// Router for an arbitrary config, going through backend selection
pub async fn app_for(config: &ServerConfig) -> Router {
    let store = storage::select_store(config)
        .await
        .expect("storage initializes");
    build_router(AppState::new(store), config.static_dir.as_deref())
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response body is UTF-8")
}

/// Parsed contents of one of the local store's files
pub fn read_store_file(dir: &TempDir, name: &str) -> Value {
    let content = std::fs::read_to_string(dir.path().join(name)).expect("store file exists");
    serde_json::from_str(&content).expect("store file is JSON")
}

// ---------------------------------------------------------------------------
// Fake Google Sheets API
// ---------------------------------------------------------------------------

/// In-process stand-in for the token endpoint and the Sheets values API.
///
/// Sheets are kept as plain rows of strings, header row included.
#[derive(Clone, Default)]
pub struct FakeSheets {
    sheets: Arc<Mutex<BTreeMap<String, Vec<Vec<String>>>>>,
    token_requests: Arc<AtomicUsize>,
}

impl FakeSheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a sheet
    pub fn seed(&self, title: &str, rows: Vec<Vec<&str>>) {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.sheets.lock().unwrap().insert(title.to_string(), rows);
    }

    pub fn rows(&self, title: &str) -> Option<Vec<Vec<String>>> {
        self.sheets.lock().unwrap().get(title).cloned()
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/token", routing::post(fake_token))
            .route(
                "/v4/spreadsheets/:id",
                routing::get(fake_spreadsheet).post(fake_batch_update),
            )
            .route(
                "/v4/spreadsheets/:id/values/:range",
                routing::get(fake_get_values)
                    .put(fake_put_values)
                    .post(fake_append_values),
            )
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake sheets");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    pub fn config(&self, base_url: &str) -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: "test-spreadsheet".to_string(),
            client_email: "rsvp@test-project.iam.gserviceaccount.com".to_string(),
            private_key: TEST_KEY.to_string(),
            api_base: base_url.to_string(),
            token_uri: format!("{}/token", base_url),
            timeout: Duration::from_secs(5),
        }
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h == format!("Bearer {}", FAKE_TOKEN))
        .unwrap_or(false)
}

fn row_number(cell: &str) -> Option<usize> {
    cell.trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .ok()
}

/// "Guestbook!A2:E" => ("Guestbook", 2, None)
fn parse_range(range: &str) -> (String, usize, Option<usize>) {
    let (title, cells) = range.split_once('!').unwrap_or((range, "A1"));
    let (start, end) = cells.split_once(':').unwrap_or((cells, ""));
    (
        title.to_string(),
        row_number(start).unwrap_or(1),
        row_number(end),
    )
}

async fn fake_token(
    State(fake): State<FakeSheets>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let grant_ok = form.get("grant_type").map(String::as_str)
        == Some("urn:ietf:params:oauth:grant-type:jwt-bearer");
    let assertion_ok = form
        .get("assertion")
        .map(|a| a.split('.').count() == 3)
        .unwrap_or(false);
    if !grant_ok || !assertion_ok {
        return (StatusCode::BAD_REQUEST, "invalid_grant").into_response();
    }

    fake.token_requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "access_token": FAKE_TOKEN,
        "expires_in": 3600,
        "token_type": "Bearer",
    }))
    .into_response()
}

async fn fake_spreadsheet(State(fake): State<FakeSheets>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let sheets: Vec<Value> = fake
        .sheets
        .lock()
        .unwrap()
        .keys()
        .map(|title| json!({ "properties": { "title": title } }))
        .collect();
    Json(json!({ "sheets": sheets })).into_response()
}

async fn fake_batch_update(
    State(fake): State<FakeSheets>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if !id.ends_with(":batchUpdate") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let mut sheets = fake.sheets.lock().unwrap();
    for request in body["requests"].as_array().cloned().unwrap_or_default() {
        if let Some(title) = request["addSheet"]["properties"]["title"].as_str() {
            if sheets.contains_key(title) {
                return (StatusCode::BAD_REQUEST, "sheet already exists").into_response();
            }
            sheets.insert(title.to_string(), Vec::new());
        }
    }
    Json(json!({ "replies": [] })).into_response()
}

async fn fake_get_values(
    State(fake): State<FakeSheets>,
    Path((_id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let (title, start, end) = parse_range(&range);
    let sheets = fake.sheets.lock().unwrap();
    let Some(rows) = sheets.get(&title) else {
        return (StatusCode::BAD_REQUEST, "Unable to parse range").into_response();
    };

    let end = end.unwrap_or(rows.len()).min(rows.len());
    let values: Vec<Vec<String>> = if start <= end {
        rows[start - 1..end].to_vec()
    } else {
        Vec::new()
    };

    // The real API omits `values` when the range is empty
    if values.is_empty() {
        Json(json!({ "range": range })).into_response()
    } else {
        Json(json!({ "range": range, "values": values })).into_response()
    }
}

async fn fake_put_values(
    State(fake): State<FakeSheets>,
    Path((_id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let (title, start, _) = parse_range(&range);
    let mut sheets = fake.sheets.lock().unwrap();
    let Some(rows) = sheets.get_mut(&title) else {
        return (StatusCode::BAD_REQUEST, "Unable to parse range").into_response();
    };

    let new_rows: Vec<Vec<String>> =
        serde_json::from_value(body["values"].clone()).unwrap_or_default();
    for (offset, row) in new_rows.into_iter().enumerate() {
        let index = start - 1 + offset;
        while rows.len() <= index {
            rows.push(Vec::new());
        }
        rows[index] = row;
    }
    Json(json!({ "updatedRange": range })).into_response()
}

async fn fake_append_values(
    State(fake): State<FakeSheets>,
    Path((_id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(range) = range.strip_suffix(":append") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let (title, _, _) = parse_range(range);
    let mut sheets = fake.sheets.lock().unwrap();
    let Some(rows) = sheets.get_mut(&title) else {
        return (StatusCode::BAD_REQUEST, "Unable to parse range").into_response();
    };

    let new_rows: Vec<Vec<String>> =
        serde_json::from_value(body["values"].clone()).unwrap_or_default();
    rows.extend(new_rows);
    Json(json!({ "updates": { "updatedRows": rows.len() } })).into_response()
}
