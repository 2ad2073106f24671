//! Resolution of request paths to files in a precompiled frontend bundle.
//!
//! Candidates are tried in a fixed order and the first existing file wins:
//!
//! 1. the exact file at the request path
//! 2. `<path>/index.html`
//! 3. `<path>.html`
//! 4. the configured not-found document (served with a 404 status)
//!
//! Paths under the API prefix are never resolved, so the API router keeps
//! first claim on them even when a file of the same name exists.

use std::path::{Path, PathBuf};

/// First path segment reserved for the REST surface.
pub const API_PREFIX: &str = "api";

/// Document served for directory requests.
pub const INDEX_DOCUMENT: &str = "index.html";

/// Default not-found document, relative to the bundle root.
pub const DEFAULT_NOT_FOUND_DOCUMENT: &str = "404.html";

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// One of the first three candidates exists; serve it with 200.
    File(PathBuf),
    /// Nothing matched but the not-found document exists; serve it with 404.
    NotFoundDocument(PathBuf),
    /// Nothing matched and there is no document to show.
    NotFound,
}

/// Maps request paths onto a static bundle directory.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
    not_found_document: Option<String>,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            not_found_document: Some(DEFAULT_NOT_FOUND_DOCUMENT.to_string()),
        }
    }

    /// Override the not-found document. `None` disables it.
    pub fn with_not_found_document(mut self, document: Option<String>) -> Self {
        self.not_found_document = document;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a raw (still percent-encoded) request path.
    ///
    /// Read-only; touches the filesystem at most four times.
    pub async fn resolve(&self, request_path: &str) -> Resolution {
        let Some(segments) = normalize_request_path(request_path) else {
            return Resolution::NotFound;
        };
        if is_api_path(&segments) {
            return Resolution::NotFound;
        }

        let base: PathBuf = segments.iter().fold(self.root.clone(), |p, s| p.join(s));

        if !segments.is_empty() && is_file(&base).await {
            return Resolution::File(base);
        }

        let index = base.join(INDEX_DOCUMENT);
        if is_file(&index).await {
            return Resolution::File(index);
        }

        if let Some(last) = segments.last() {
            let route = base.with_file_name(format!("{last}.html"));
            if is_file(&route).await {
                return Resolution::File(route);
            }
        }

        match &self.not_found_document {
            Some(doc) => {
                let path = self.root.join(doc);
                if is_file(&path).await {
                    Resolution::NotFoundDocument(path)
                } else {
                    Resolution::NotFound
                }
            }
            None => Resolution::NotFound,
        }
    }
}

/// Decode a request path and split it into safe segments.
///
/// Empty segments (from `//` or a trailing `/`) are dropped. Returns `None`
/// when the path is not valid UTF-8 after decoding, or contains `.`/`..`
/// segments, backslashes, or NUL bytes.
pub fn normalize_request_path(raw: &str) -> Option<Vec<String>> {
    let decoded = urlencoding::decode(raw).ok()?;
    if decoded.contains('\0') || decoded.contains('\\') {
        return None;
    }

    let mut segments = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" => continue,
            "." | ".." => return None,
            s => segments.push(s.to_string()),
        }
    }
    Some(segments)
}

/// Whether the first segment is the API prefix.
pub fn is_api_path(segments: &[String]) -> bool {
    segments.first().is_some_and(|s| s == API_PREFIX)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
