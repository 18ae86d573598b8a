//! Static file serving for the landing page.
//!
//! Stylesheet, logo and other assets are embedded in the binary at compile
//! time. Paths that match no asset get the not-found page.

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;
use tracing::error;

use crate::render::render_not_found;
use crate::services::use_config;

/// Embedded static files from `assets/static`.
#[derive(Embed)]
#[folder = "assets/static"]
#[include = "*.css"]
#[include = "*.js"]
#[include = "*.svg"]
#[include = "*.png"]
#[include = "*.jpg"]
#[include = "*.ico"]
#[include = "*.woff2"]
pub struct StaticAssets;

/// Serves an embedded asset, or the not-found page.
pub async fn serve_static(request: Request) -> Response {
    let full_path = request.uri().path();
    let path = full_path.trim_start_matches('/');

    if let Some(content) = StaticAssets::get(path) {
        return file_response(path, content.data.as_ref());
    }

    not_found(full_path)
}

/// Renders the not-found page with the active site config.
fn not_found(path: &str) -> Response {
    match use_config() {
        Ok(snapshot) => (
            StatusCode::NOT_FOUND,
            Html(render_not_found(snapshot.content(), path)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to read site config: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}

/// Creates an HTTP response for a file with appropriate content type.
fn file_response(path: &str, content: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for_path(path))
        .body(Body::from(content.to_vec()))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create response",
            )
                .into_response()
        })
}

/// Returns the Cache-Control header for an asset.
///
/// - Stylesheets and scripts: revalidate, they change with the site
/// - Images and fonts: one day
fn cache_control_for_path(path: &str) -> &'static str {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    if extension.eq_ignore_ascii_case("css") || extension.eq_ignore_ascii_case("js") {
        "no-cache, must-revalidate"
    } else {
        "public, max-age=86400"
    }
}
