#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use harbor_api::config::ServerConfig;
use harbor_api::router::build_app_router;
use harbor_api::state::AppState;
use harbor_core::extraction::CommandExtractor;
use harbor_core::static_site::AssetResolver;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` rooted at `dir`.
///
/// The frontend bundle is read from `<dir>/out` and uploads land in
/// `<dir>/uploads`. Neither directory is created here.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        frontend_dir: dir.join("out"),
        not_found_document: Some("404.html".to_string()),
        upload_dir: dir.join("uploads"),
        pdf_extractor_cmd: "sh".to_string(),
        pdf_extractor_timeout_secs: 5,
        db_max_connections: 5,
    }
}

/// Extractor that prints the uploaded file back, so a file holding JSON
/// round-trips through `/api/convert`.
pub fn echo_extractor() -> CommandExtractor {
    shell_extractor(r#"cat "$1""#)
}

/// Extractor running `script` under `sh -c`, with the PDF path as `$1`.
pub fn shell_extractor(script: &str) -> CommandExtractor {
    shell_extractor_with_timeout(script, Duration::from_secs(5))
}

pub fn shell_extractor_with_timeout(script: &str, timeout: Duration) -> CommandExtractor {
    CommandExtractor::new(
        "sh",
        vec!["-c".to_string(), script.to_string(), "extract".to_string()],
        timeout,
    )
}

/// Build the full application router over `pool`, with files under `dir`.
pub fn build_test_app_in(pool: PgPool, dir: &Path, extractor: CommandExtractor) -> Router {
    build_test_app_with_config(pool, test_config(dir), extractor)
}

/// Build the full application router from an explicit config.
pub fn build_test_app_with_config(
    pool: PgPool,
    config: ServerConfig,
    extractor: CommandExtractor,
) -> Router {
    let assets = AssetResolver::new(&config.frontend_dir)
        .with_not_found_document(config.not_found_document.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        assets: Arc::new(assets),
        extractor: Arc::new(extractor),
    };
    build_app_router(state, &config)
}

/// Build the full application router with a frontend directory that does
/// not exist.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = std::env::temp_dir().join("harbor-api-tests-no-bundle");
    build_test_app_in(pool, &dir, echo_extractor())
}

/// A pool that never connects unless a handler actually queries it. For
/// tests that only touch the filesystem.
pub fn lazy_pool() -> PgPool {
    sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://harbor@localhost/unused")
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, "PUT", uri, body).await
}

async fn json_request(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
