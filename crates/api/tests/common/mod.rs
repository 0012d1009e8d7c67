#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use picshelf_api::config::{ServerConfig, StorageProfile};
use picshelf_api::router::build_app_router;
use picshelf_api::state::AppState;
use picshelf_db::store::{DiskImageStore, ImageStore};

const BOUNDARY: &str = "picshelf-test-boundary";

/// Upload limit used by the test router; small so oversize tests stay cheap.
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// A router backed by a real SQLite pool and a temporary storage directory.
///
/// The directory is removed when the `TestApp` is dropped.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

/// Build a test `ServerConfig` pointing at `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        storage_profile: StorageProfile::Ephemeral,
        upload_dir: upload_dir.to_path_buf(),
        database_url: "sqlite::memory:".to_string(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a fresh storage directory.
///
/// The storage directory itself is not created; uploads create it.
pub fn build_test_app(pool: SqlitePool) -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let upload_dir = dir.path().join("uploads");
    let config = test_config(&upload_dir);
    let store = DiskImageStore::new(pool.clone(), upload_dir.clone());

    TestApp {
        router: build_app_with_store(Arc::new(store), config),
        pool,
        upload_dir,
        _dir: dir,
    }
}

/// Build the router around an arbitrary store implementation.
pub fn build_app_with_store(store: Arc<dyn ImageStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
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

pub async fn post_empty(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST a multipart form with one part named `field`.
///
/// `filename` of `None` omits the `filename` parameter entirely.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    field: &str,
    filename: Option<&str>,
    contents: &[u8],
) -> Response {
    let body = multipart_body(field, filename, contents);
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Upload `contents` as the `file` field under `filename`.
pub async fn upload(app: &Router, filename: &str, contents: &[u8]) -> Response {
    post_multipart(app, "/upload", "file", Some(filename), contents).await
}

fn multipart_body(field: &str, filename: Option<&str>, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(contents.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Decode the notice carried by a redirect's `Location`, as `(kind, notice)`.
pub fn notice(response: &Response) -> Option<(String, String)> {
    let location = location(response);
    let query = location.split_once('?')?.1;
    let mut params: HashMap<String, String> = serde_urlencoded::from_str(query).unwrap();
    Some((params.remove("kind")?, params.remove("notice")?))
}

/// Number of entries in the storage directory (0 if it does not exist).
pub fn files_on_disk(upload_dir: &Path) -> usize {
    std::fs::read_dir(upload_dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}
