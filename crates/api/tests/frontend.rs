//! Integration tests for the static frontend fallback.

mod common;

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_bytes, body_json, get, send};
use tempfile::TempDir;

/// Lay out a small exported bundle under `<dir>/out`.
fn write_bundle(dir: &Path) {
    let out = dir.join("out");
    fs::create_dir_all(out.join("master")).unwrap();
    fs::create_dir_all(out.join("_next/static")).unwrap();
    fs::create_dir_all(out.join("api")).unwrap();

    fs::write(out.join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(out.join("404.html"), "<h1>missing</h1>").unwrap();
    fs::write(out.join("master/index.html"), "<h1>master index</h1>").unwrap();
    fs::write(out.join("master.html"), "<h1>master route</h1>").unwrap();
    fs::write(out.join("upload.html"), "<h1>upload</h1>").unwrap();
    fs::write(out.join("_next/static/app.js"), "console.log(1);").unwrap();
    fs::write(out.join("api/hello"), "shadowed").unwrap();
    fs::write(out.join("video.bin"), "0123456789").unwrap();
}

fn ranged_get(uri: &str, range: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("range", range)
        .body(Body::empty())
        .unwrap()
}

fn app(dir: &TempDir) -> axum::Router {
    common::build_test_app_in(common::lazy_pool(), dir.path(), common::echo_extractor())
}

#[tokio::test]
async fn root_serves_index_document() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = get(app(&dir), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<h1>home</h1>");
}

#[tokio::test]
async fn exact_file_is_served_with_content_type() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = get(app(&dir), "/_next/static/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"), "got {content_type}");
    assert_eq!(body_bytes(response).await, b"console.log(1);");
}

#[tokio::test]
async fn directory_index_beats_extensionless_route() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = get(app(&dir), "/master").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<h1>master index</h1>");
}

#[tokio::test]
async fn extensionless_route_maps_to_html_file() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = get(app(&dir), "/upload").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<h1>upload</h1>");
}

#[tokio::test]
async fn unknown_path_serves_not_found_document_with_404() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = get(app(&dir), "/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(response).await, b"<h1>missing</h1>");
}

#[tokio::test]
async fn unknown_path_without_bundle_is_bare_404() {
    let dir = TempDir::new().unwrap();

    let response = get(app(&dir), "/anything").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn api_paths_never_reach_the_bundle() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    // `out/api/hello` exists on disk, but the route answers first.
    let response = get(app(&dir), "/api/hello").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Hello from the harbor backend!"
    );

    let response = get(app(&dir), "/api/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn traversal_is_not_served() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());
    fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

    let response = get(app(&dir), "/%2e%2e/secret.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_ne!(body_bytes(response).await, b"top secret");
}

#[tokio::test]
async fn range_request_keeps_partial_content_status() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = send(app(&dir), ranged_get("/video.bin", "bytes=0-3")).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()["content-range"], "bytes 0-3/10");
    assert_eq!(body_bytes(response).await, b"0123");
}

#[tokio::test]
async fn range_request_for_missing_page_gets_whole_not_found_document() {
    let dir = TempDir::new().unwrap();
    write_bundle(dir.path());

    let response = send(app(&dir), ranged_get("/no/such/page", "bytes=0-3")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get("content-range").is_none());
    assert_eq!(body_bytes(response).await, b"<h1>missing</h1>");
}
