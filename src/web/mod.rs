//! HTTP server for the landing page.
//!
//! # Endpoints
//!
//! - `GET /` - Rendered page (`?gallery=<category id>` selects the gallery tab)
//! - `GET /siteConfig.json` - Active configuration document
//! - `GET /health` - Health check with the active config version
//! - `GET /api/countdown` - Current countdown state
//! - `GET /api/media?url=` - Classification of a video URL
//!
//! Every other path is served from the embedded static assets, or answered
//! with the not-found page.
//!
//! Each request runs inside a config provider scope, so handlers read the
//! active snapshot through [`use_config`].

pub mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::branding::APP_DISPLAY_NAME;
use crate::config::Config;
use crate::constants::SITE_CONFIG_PATH;
use crate::render::{self, hero::countdown_visible, PageContext};
use crate::services::countdown::{day_label, target_date_of};
use crate::services::{
    classify_media, provide, spawn_refresh, use_config, Clock, ConfigFetcher, ConfigSnapshot,
    ConfigStore, ContextError, CountdownTicker, HttpConfigFetcher, LocalClock, MediaSource,
};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    /// Server settings
    settings: Arc<Config>,
    /// Site configuration store
    store: Arc<ConfigStore>,
    /// Countdown ticker, alive as long as the state
    countdown: Arc<CountdownTicker>,
}

impl AppState {
    /// Creates the state and mounts the countdown ticker.
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(settings: Config, store: Arc<ConfigStore>, clock: Arc<dyn Clock>) -> Self {
        let countdown = CountdownTicker::mount(&store, clock);
        Self {
            settings: Arc::new(settings),
            store,
            countdown: Arc::new(countdown),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
    /// Version of the active site config snapshot.
    pub config_version: u64,
    /// Where the active snapshot came from.
    pub config_source: String,
}

/// Countdown state response.
#[derive(Debug, Serialize)]
pub struct CountdownResponse {
    /// Whole days until the target date, zero once passed.
    pub days_left: u32,
    /// Whether the page shows the countdown.
    pub visible: bool,
    /// "day" or "days".
    pub label: &'static str,
    /// Configured target date, unparsed.
    pub target_date: Option<String>,
}

/// Query parameters of the page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Gallery category id to show.
    pub gallery: Option<String>,
}

/// Query parameters for media classification.
#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    /// Video URL to classify.
    pub url: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Reads the active snapshot from the request's provider scope.
fn active_snapshot() -> ApiResult<Arc<ConfigSnapshot>> {
    use_config().map_err(|e: ContextError| {
        error!("Failed to read site config: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Site config unavailable", e.to_string())),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Renders the landing page.
async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Html<String>> {
    let snapshot = active_snapshot()?;
    let html = render::render_page(&PageContext {
        content: snapshot.content(),
        days_left: state.countdown.days_left(),
        gallery_tab: query.gallery.as_deref(),
    });
    Ok(Html(html))
}

/// Whether an `If-None-Match` value matches `etag` under weak comparison.
///
/// Accepts `*`, a comma-separated list, and `W/`-prefixed tags.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || tag.strip_prefix("W/").unwrap_or(tag) == etag)
}

/// GET /siteConfig.json - Serves the active document.
async fn site_config(headers: HeaderMap) -> ApiResult<Response> {
    let snapshot = active_snapshot()?;
    let etag = format!("\"{}\"", snapshot.fingerprint());

    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| etag_matches(v, &etag));

    let etag_header = HeaderValue::from_str(&etag).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details("Invalid ETag", e.to_string())),
        )
    })?;

    if not_modified {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag_header)]).into_response());
    }

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (header::ETAG, etag_header),
        ],
        snapshot.document().to_string(),
    )
        .into_response())
}

/// GET /health - Health check.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store.get_active();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config_version: snapshot.version(),
        config_source: snapshot.source().to_string(),
    })
}

/// GET /api/countdown - Current countdown state.
async fn countdown(State(state): State<AppState>) -> ApiResult<Json<CountdownResponse>> {
    let snapshot = active_snapshot()?;
    let days_left = state.countdown.days_left();

    Ok(Json(CountdownResponse {
        days_left,
        visible: countdown_visible(&snapshot.content().hero, days_left),
        label: day_label(days_left),
        target_date: target_date_of(&snapshot),
    }))
}

/// GET /api/media?url= - Classifies a video URL.
async fn media(Query(query): Query<MediaQuery>) -> Json<MediaSource> {
    Json(classify_media(&query.url))
}

/// Runs the rest of the request inside the store's provider scope.
async fn provide_config(State(state): State<AppState>, request: Request, next: Next) -> Response {
    provide(Arc::clone(&state.store), next.run(request)).await
}

// ============================================================================
// Router
// ============================================================================

/// Creates the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(SITE_CONFIG_PATH, get(site_config))
        .route("/health", get(health_check))
        .route("/api/countdown", get(countdown))
        .route("/api/media", get(media))
        .fallback(static_files::serve_static)
        .layer(middleware::from_fn_with_state(state.clone(), provide_config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the server on `addr`.
///
/// Serves the bundled site config immediately; in production mode with a
/// remote URL configured, a one-shot refresh runs in the background.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let store = ConfigStore::initialize();
    let clock: Arc<dyn Clock> = Arc::new(LocalClock);
    let state = AppState::new(config, Arc::clone(&store), clock);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        "Starting {} on {} ({} mode)",
        APP_DISPLAY_NAME,
        addr,
        state.settings.site.mode
    );

    match state.settings.remote_refresh_url() {
        Some(url) => {
            let fetcher: Arc<dyn ConfigFetcher> = Arc::new(HttpConfigFetcher::new()?);
            // Not awaited; requests are served from the bundled config meanwhile.
            drop(spawn_refresh(store, fetcher, url.to_string()));
        }
        None if state.settings.site.mode.is_production() => {
            info!("No remote config URL configured; serving bundled site config");
        }
        None => {}
    }

    let app = create_router(state);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_matches() {
        let etag = "\"abc123\"";

        assert!(etag_matches("\"abc123\"", etag));
        assert!(etag_matches("W/\"abc123\"", etag));
        assert!(etag_matches("\"old\", W/\"abc123\"", etag));
        assert!(etag_matches("*", etag));

        assert!(!etag_matches("\"old\"", etag));
        assert!(!etag_matches("abc123", etag));
        assert!(!etag_matches("", etag));
    }
}
