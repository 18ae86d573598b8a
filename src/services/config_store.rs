//! Process-wide store for the active site configuration.
//!
//! The store holds an immutable [`ConfigSnapshot`] behind a `watch` channel.
//! Replacing the configuration swaps the whole snapshot by reference, so
//! readers see either the previous document or the new one, never a mix.
//!
//! Renderers reach the store through a task-local provider scope
//! ([`provide`] / [`use_config`]); reading outside a scope is a wiring bug and
//! reported as [`ContextError::MissingProvider`] instead of silently falling
//! back to defaults.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

use crate::models::SiteContent;

/// Site config compiled into the binary.
pub const BUNDLED_SITE_CONFIG: &str = include_str!("../../assets/siteConfig.json");

/// Where the active document came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotSource {
    /// The document compiled into the binary.
    Bundled,
    /// A document fetched at runtime.
    Remote {
        /// URL the document was fetched from.
        url: String,
    },
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled"),
            Self::Remote { url } => write!(f, "remote ({url})"),
        }
    }
}

/// An immutable version of the site configuration.
#[derive(Debug)]
pub struct ConfigSnapshot {
    version: u64,
    source: SnapshotSource,
    document: Value,
    content: SiteContent,
    fingerprint: String,
}

impl ConfigSnapshot {
    fn new(version: u64, source: SnapshotSource, document: Value) -> Self {
        let content = SiteContent::from_document(&document);
        let fingerprint = fingerprint(&document);
        Self {
            version,
            source,
            document,
            content,
            fingerprint,
        }
    }

    /// Monotonic version, starting at 1 for the bundled document.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Origin of the document.
    #[must_use]
    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    /// The document exactly as loaded.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Typed, defaulted view for rendering.
    #[must_use]
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// SHA-256 hex digest of the serialized document.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(document: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.to_string().as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Holder of the active configuration snapshot.
pub struct ConfigStore {
    tx: watch::Sender<Arc<ConfigSnapshot>>,
    refresh_claimed: AtomicBool,
}

impl ConfigStore {
    /// Creates a store seeded with the bundled document.
    ///
    /// Never fails: if the bundled JSON cannot be parsed the store starts
    /// with an empty object and every section renders empty.
    #[must_use]
    pub fn initialize() -> Arc<Self> {
        let document = serde_json::from_str(BUNDLED_SITE_CONFIG).unwrap_or_else(|err| {
            error!("Bundled site config is not valid JSON: {}", err);
            Value::Object(serde_json::Map::new())
        });
        Self::with_document(document)
    }

    /// Creates a store seeded with `document` as its bundled default.
    #[must_use]
    pub fn with_document(document: Value) -> Arc<Self> {
        let snapshot = Arc::new(ConfigSnapshot::new(1, SnapshotSource::Bundled, document));
        let (tx, _rx) = watch::channel(snapshot);
        Arc::new(Self {
            tx,
            refresh_claimed: AtomicBool::new(false),
        })
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn get_active(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.tx.borrow())
    }

    /// Returns a receiver that is notified on every replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ConfigSnapshot>> {
        self.tx.subscribe()
    }

    /// Replaces the whole document and notifies subscribers.
    ///
    /// Returns the new snapshot.
    pub fn replace(&self, document: Value, source: SnapshotSource) -> Arc<ConfigSnapshot> {
        let mut installed = None;
        self.tx.send_modify(|current| {
            let next = Arc::new(ConfigSnapshot::new(current.version + 1, source, document));
            installed = Some(Arc::clone(&next));
            *current = next;
        });

        let snapshot = installed.unwrap_or_else(|| self.get_active());
        info!(
            "Site config replaced: version {} from {}",
            snapshot.version(),
            snapshot.source()
        );
        snapshot
    }

    /// Claims the single remote refresh allowed per store.
    ///
    /// Returns false if a refresh was already attempted.
    pub(crate) fn claim_refresh(&self) -> bool {
        !self.refresh_claimed.swap(true, Ordering::SeqCst)
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.get_active();
        f.debug_struct("ConfigStore")
            .field("version", &active.version())
            .field("source", active.source())
            .field("refresh_claimed", &self.refresh_claimed.load(Ordering::SeqCst))
            .finish()
    }
}

// ============================================================================
// Provider scope
// ============================================================================

tokio::task_local! {
    static ACTIVE_STORE: Arc<ConfigStore>;
}

/// Errors raised when reading configuration through the provider scope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// `use_config` was called outside of `provide`/`provide_sync`.
    #[error("use_config must be called within a config provider scope")]
    MissingProvider,
}

/// Runs `future` with `store` installed as the config provider.
pub async fn provide<F>(store: Arc<ConfigStore>, future: F) -> F::Output
where
    F: Future,
{
    ACTIVE_STORE.scope(store, future).await
}

/// Runs `f` synchronously with `store` installed as the config provider.
pub fn provide_sync<R>(store: Arc<ConfigStore>, f: impl FnOnce() -> R) -> R {
    ACTIVE_STORE.sync_scope(store, f)
}

/// Returns the active snapshot of the enclosing provider.
pub fn use_config() -> Result<Arc<ConfigSnapshot>, ContextError> {
    ACTIVE_STORE
        .try_with(|store| store.get_active())
        .map_err(|_| ContextError::MissingProvider)
}
