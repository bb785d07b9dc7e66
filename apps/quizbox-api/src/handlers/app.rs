use crate::AppState;
use crate::error::ApiError;
use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};

fn build_asset_response(bytes: Vec<u8>, mime: &str, cache_control: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

async fn read_asset(root: &Path, path: &str) -> Option<Response> {
    let relative = Path::new(path);
    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }

    let full_path: PathBuf = root.join(relative);
    if !tokio::fs::metadata(&full_path).await.ok()?.is_file() {
        return None;
    }

    let bytes = tokio::fs::read(&full_path).await.ok()?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let cache_control = if path == "index.html" {
        "no-cache"
    } else {
        "public, max-age=3600"
    };
    Some(build_asset_response(bytes, mime.as_ref(), cache_control))
}

fn looks_like_asset(path: &str) -> bool {
    path.starts_with("assets/") || mime_guess::from_path(path).first().is_some()
}

/// Serves `path` from the bundle, falling back to `index.html` for client-side routes.
pub async fn serve_path(root: &Path, path: &str) -> Response {
    let path = path.trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(response) = read_asset(root, path).await {
        return response;
    }

    // SPA fallback for anything that is not a request for a known asset type
    if !looks_like_asset(path) && !path.contains("..") {
        if let Some(response) = read_asset(root, "index.html").await {
            return response;
        }
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

pub async fn serve_frontend(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") || path == "/api" {
        return ApiError::NotFound(format!("route {}", path)).into_response();
    }
    serve_path(&state.config.static_dir, path).await
}
