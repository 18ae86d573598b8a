//! Service layer for site behaviour.
//!
//! This module contains the configuration store and its one-shot remote
//! refresh, the booking countdown and video source classification. None of
//! it depends on the web layer.

pub mod config_store;
pub mod countdown;
pub mod media;
pub mod remote_config;

// Re-export commonly used types and functions
pub use config_store::{
    provide, provide_sync, use_config, ConfigSnapshot, ConfigStore, ContextError, SnapshotSource,
};
pub use countdown::{days_remaining, Clock, CountdownTicker, FixedClock, LocalClock};
pub use media::{classify_media, EmbedProvider, MediaSource};
pub use remote_config::{
    refresh_from_remote, spawn_refresh, ConfigFetcher, FetchedResponse, HttpConfigFetcher,
    RefreshError, RefreshOutcome,
};
