//! Fallback for every path no route claims: the precompiled frontend.

use std::path::PathBuf;

use axum::extract::{Request, State};
use axum::http::header::{
    IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_RANGE, IF_UNMODIFIED_SINCE, RANGE,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use harbor_core::static_site::{is_api_path, normalize_request_path, Resolution};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::AppError;
use crate::state::AppState;

/// Serve the asset the resolver picks, byte-for-byte.
///
/// Unmatched API paths get the JSON error body instead of the HTML
/// not-found document.
pub async fn serve_frontend(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_owned();

    if normalize_request_path(&path).is_some_and(|segments| is_api_path(&segments)) {
        return AppError::NotFound(format!("No route for {path}")).into_response();
    }

    match state.assets.resolve(&path).await {
        Resolution::File(file) => serve_file(file, req).await,
        Resolution::NotFoundDocument(file) => serve_not_found_document(file, req).await,
        Resolution::NotFound => {
            tracing::debug!(%path, "No frontend asset matched");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Stream `file` with whatever status `ServeFile` picks (200, 206, 304, 416).
async fn serve_file(file: PathBuf, req: Request) -> Response {
    match ServeFile::new(&file).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

/// Stream the whole not-found document with a 404.
///
/// Range and conditional headers are dropped first so the body is always
/// the complete document.
async fn serve_not_found_document(file: PathBuf, mut req: Request) -> Response {
    let headers = req.headers_mut();
    for name in [
        RANGE,
        IF_RANGE,
        IF_MATCH,
        IF_NONE_MATCH,
        IF_MODIFIED_SINCE,
        IF_UNMODIFIED_SINCE,
    ] {
        headers.remove(name);
    }

    let mut res = serve_file(file, req).await;
    *res.status_mut() = StatusCode::NOT_FOUND;
    res
}
