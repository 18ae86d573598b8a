//! Integration tests for the one-shot remote refresh of the site config.

use std::sync::Arc;

use serde_json::json;

use pilgrim_site::models::SiteContent;
use pilgrim_site::services::{
    refresh_from_remote, spawn_refresh, ConfigFetcher, ConfigStore, RefreshError, RefreshOutcome,
    SnapshotSource,
};

mod fixtures;
use fixtures::{site_document, MockFetcher, MockReply};

const REMOTE_URL: &str = "https://cdn.example.com/siteConfig.json";

fn bundled_store() -> Arc<ConfigStore> {
    ConfigStore::with_document(site_document("Bundled Title", Some("2027-02-10")))
}

/// Asserts the store still serves its bundled document.
fn assert_unchanged(store: &ConfigStore) {
    let active = store.get_active();
    assert_eq!(active.version(), 1);
    assert_eq!(active.source(), &SnapshotSource::Bundled);
    assert_eq!(
        active.document(),
        &site_document("Bundled Title", Some("2027-02-10"))
    );
}

// ============================================================================
// Failed Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_not_found_keeps_bundled_document() {
    let store = bundled_store();
    let fetcher = MockFetcher::responding(404, Some("application/json"), "{}");

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;

    assert!(matches!(
        outcome,
        RefreshOutcome::Kept(RefreshError::Unavailable { status: 404, .. })
    ));
    assert_unchanged(&store);
}

#[tokio::test]
async fn test_html_response_keeps_bundled_document() {
    let store = bundled_store();
    let fetcher = MockFetcher::responding(200, Some("text/html"), "<!DOCTYPE html><html></html>");

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;

    match outcome {
        RefreshOutcome::Kept(RefreshError::Unavailable {
            status,
            content_type,
        }) => {
            assert_eq!(status, 200);
            assert_eq!(content_type.as_deref(), Some("text/html"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_unchanged(&store);
}

#[tokio::test]
async fn test_missing_content_type_keeps_bundled_document() {
    let store = bundled_store();
    let fetcher = MockFetcher::responding(200, None, "{}");

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;

    assert!(matches!(
        outcome,
        RefreshOutcome::Kept(RefreshError::Unavailable { content_type: None, .. })
    ));
    assert_unchanged(&store);
}

#[tokio::test]
async fn test_malformed_json_keeps_bundled_document() {
    let store = bundled_store();
    let body = "{\"general\": {\"seo\": {\"title\": \"truncated response that goes on for a while";
    let fetcher = MockFetcher::responding(200, Some("application/json"), body);

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;

    match outcome {
        RefreshOutcome::Kept(RefreshError::Malformed { preview, .. }) => {
            assert_eq!(preview.chars().count(), 50);
            assert!(body.starts_with(&preview));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_unchanged(&store);
}

#[tokio::test]
async fn test_network_error_keeps_bundled_document() {
    let store = bundled_store();
    let fetcher = MockFetcher::new(MockReply::NetworkError("connection refused".into()));

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;

    assert!(matches!(
        outcome,
        RefreshOutcome::Kept(RefreshError::Network(ref message)) if message == "connection refused"
    ));
    assert_unchanged(&store);
}

// ============================================================================
// Successful Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_valid_json_replaces_document_exactly() {
    let store = bundled_store();
    let remote = json!({
        "general": { "seo": { "title": "Remote Title", "description": "", "keywords": "" } },
        "extra": { "kept": [1, 2, 3] }
    });
    let fetcher = MockFetcher::json(&remote);

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;

    assert!(matches!(outcome, RefreshOutcome::Replaced { version: 2 }));
    let active = store.get_active();
    assert_eq!(active.document(), &remote);
    assert_eq!(
        active.source(),
        &SnapshotSource::Remote {
            url: REMOTE_URL.to_string()
        }
    );
    // Sections absent from the remote document fall back to empty, not to
    // the bundled values.
    assert_eq!(active.content().hero, SiteContent::default().hero);
    assert_eq!(
        active.content().general.seo.as_ref().map(|s| s.title.as_str()),
        Some("Remote Title")
    );
}

#[tokio::test]
async fn test_subscribers_notified_on_replacement() {
    let store = bundled_store();
    let mut rx = store.subscribe();
    let fetcher = MockFetcher::json(&site_document("Remote Title", None));

    let outcome = refresh_from_remote(&store, &fetcher, REMOTE_URL).await;
    assert!(outcome.is_replaced());

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().version(), 2);
}

#[tokio::test]
async fn test_refresh_attempted_once() {
    let store = bundled_store();
    let failing = MockFetcher::responding(503, Some("text/plain"), "maintenance");
    let valid = MockFetcher::json(&site_document("Remote Title", None));

    let first = refresh_from_remote(&store, &failing, REMOTE_URL).await;
    let second = refresh_from_remote(&store, &valid, REMOTE_URL).await;

    assert!(matches!(first, RefreshOutcome::Kept(_)));
    assert!(matches!(second, RefreshOutcome::AlreadyAttempted));
    assert_eq!(failing.calls(), 1);
    assert_eq!(valid.calls(), 0);
    assert_unchanged(&store);
}

#[tokio::test]
async fn test_spawned_refresh_runs_in_background() {
    let store = bundled_store();
    let fetcher: Arc<dyn ConfigFetcher> =
        Arc::new(MockFetcher::json(&site_document("Remote Title", None)));

    let handle = spawn_refresh(Arc::clone(&store), fetcher, REMOTE_URL.to_string());
    let outcome = handle.await.unwrap();

    assert!(outcome.is_replaced());
    assert_eq!(store.get_active().version(), 2);
}
