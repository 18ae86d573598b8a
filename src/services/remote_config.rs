//! One-shot runtime refresh of the site config.
//!
//! A deployed site may publish a newer `siteConfig.json` than the one
//! compiled into the binary. At startup (production mode only) the server
//! fetches it once; a valid JSON response replaces the active document, and
//! any failure leaves the bundled document in place. Failures are logged and
//! never retried.
//!
//! ## Mock Support
//!
//! The HTTP call sits behind [`ConfigFetcher`] so tests can inject canned
//! responses without a network.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::branding;
use crate::constants::{MALFORMED_PREVIEW_CHARS, REMOTE_FETCH_TIMEOUT};
use crate::services::config_store::{ConfigStore, SnapshotSource};

/// Raw response of a config fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

/// Reasons a remote refresh did not replace the configuration.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Non-2xx status or a content type that is not JSON.
    #[error(
        "remote site config unavailable (status: {status}, type: {})",
        .content_type.as_deref().unwrap_or("none")
    )]
    Unavailable {
        /// HTTP status code.
        status: u16,
        /// `Content-Type` header, if any.
        content_type: Option<String>,
    },
    /// Body was served as JSON but does not parse.
    #[error("remote site config is not valid JSON: {source}")]
    Malformed {
        /// First characters of the body.
        preview: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The request itself failed.
    #[error("network error while fetching remote site config: {0}")]
    Network(String),
}

/// Result of a refresh attempt.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The active configuration was replaced; carries the new version.
    Replaced {
        /// Version of the installed snapshot.
        version: u64,
    },
    /// The attempt failed; the active configuration is unchanged.
    Kept(RefreshError),
    /// A refresh was already attempted on this store.
    AlreadyAttempted,
}

impl RefreshOutcome {
    /// Returns true if the configuration was replaced.
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// Source of remote config responses.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Performs a GET on `url`.
    ///
    /// Only transport failures are errors; any HTTP status is a response.
    async fn fetch(&self, url: &str) -> Result<FetchedResponse, RefreshError>;
}

/// [`ConfigFetcher`] backed by `reqwest`.
pub struct HttpConfigFetcher {
    http: Client,
}

impl HttpConfigFetcher {
    /// Creates a fetcher with the default timeout and user agent.
    pub fn new() -> anyhow::Result<Self> {
        use anyhow::Context;

        let http = Client::builder()
            .timeout(REMOTE_FETCH_TIMEOUT)
            .user_agent(branding::user_agent())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl ConfigFetcher for HttpConfigFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse, RefreshError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RefreshError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response
            .text()
            .await
            .map_err(|e| RefreshError::Network(e.to_string()))?;

        Ok(FetchedResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Decides whether a response may become the active document.
///
/// Requires a 2xx status, a content type containing `application/json`, and
/// a body that parses as JSON.
pub fn evaluate_response(response: FetchedResponse) -> Result<Value, RefreshError> {
    let is_success = (200..300).contains(&response.status);
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("application/json"));

    if !is_success || !is_json {
        return Err(RefreshError::Unavailable {
            status: response.status,
            content_type: response.content_type,
        });
    }

    serde_json::from_str(&response.body).map_err(|source| RefreshError::Malformed {
        preview: response.body.chars().take(MALFORMED_PREVIEW_CHARS).collect(),
        source,
    })
}

/// Fetches `url` once and, on success, replaces the store's document.
///
/// The store accepts a single attempt; later calls return
/// [`RefreshOutcome::AlreadyAttempted`] without touching the network.
pub async fn refresh_from_remote(
    store: &ConfigStore,
    fetcher: &dyn ConfigFetcher,
    url: &str,
) -> RefreshOutcome {
    if !store.claim_refresh() {
        debug!("Remote site config refresh already attempted, skipping");
        return RefreshOutcome::AlreadyAttempted;
    }

    info!("Fetching remote site config from {}", url);

    let result = match fetcher.fetch(url).await {
        Ok(response) => evaluate_response(response),
        Err(err) => Err(err),
    };

    match result {
        Ok(document) => {
            let snapshot = store.replace(
                document,
                SnapshotSource::Remote {
                    url: url.to_string(),
                },
            );
            RefreshOutcome::Replaced {
                version: snapshot.version(),
            }
        }
        Err(err) => {
            log_refresh_failure(&err);
            RefreshOutcome::Kept(err)
        }
    }
}

fn log_refresh_failure(err: &RefreshError) {
    match err {
        RefreshError::Unavailable { .. } => {
            warn!("{}; keeping bundled site config", err);
        }
        RefreshError::Malformed { preview, .. } => {
            error!(
                "{}; keeping bundled site config (content starts with: {:?})",
                err, preview
            );
        }
        RefreshError::Network(_) => {
            error!("{}; keeping bundled site config", err);
        }
    }
}

/// Starts the refresh in the background without waiting for it.
pub fn spawn_refresh(
    store: Arc<ConfigStore>,
    fetcher: Arc<dyn ConfigFetcher>,
    url: String,
) -> JoinHandle<RefreshOutcome> {
    tokio::spawn(async move { refresh_from_remote(&store, fetcher.as_ref(), &url).await })
}
