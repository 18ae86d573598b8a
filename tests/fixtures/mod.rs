//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use pilgrim_site::services::{ConfigFetcher, FetchedResponse, RefreshError};

/// Builds a date, panicking on invalid input.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A small but complete site config document.
///
/// # Arguments
/// * `title` - SEO title of the page
/// * `target_date` - Countdown target date, omitted when `None`
pub fn site_document(title: &str, target_date: Option<&str>) -> Value {
    let mut hero = json!({
        "slides": [{
            "image": "https://cdn.example.com/kaaba.jpg",
            "bismillah": "Bismillah",
            "translation": "In the name of God",
            "headingPre": "Begin Your",
            "headingSpan": "Sacred Journey",
            "subheading": "Umrah packages for families"
        }],
        "buttons": { "explore": "Explore Packages", "contact": "Contact Us" },
        "trustBadges": [{ "value": "15+", "label": "Years of Service" }]
    });

    if let Some(target) = target_date {
        hero["countdown"] = json!({
            "targetDate": target,
            "deadlineText": "Book before Ramadan",
            "supportingText": "Limited seats"
        });
    }

    json!({
        "general": {
            "seo": {
                "title": title,
                "description": "Trusted Umrah and Hajj packages",
                "keywords": "umrah, hajj"
            },
            "logo": { "image": "/logo.svg", "text": "Al-Noor", "subText": "Travels" }
        },
        "hero": hero,
        "gallery": {
            "sectionTitle": "Our Gallery",
            "mainHeading": { "pre": "Moments from", "highlight": "Past Journeys" },
            "description": "Pilgrims we have guided",
            "categories": [
                {
                    "id": "makkah",
                    "label": "Makkah",
                    "items": [{
                        "src": "https://cdn.example.com/haram.jpg",
                        "alt": "Masjid al-Haram at night",
                        "title": "Masjid al-Haram"
                    }]
                },
                {
                    "id": "videos",
                    "label": "Videos",
                    "images": [{
                        "src": "https://www.youtube.com/shorts/AbCdEfGhIjK",
                        "alt": "Tawaf",
                        "title": "Tawaf",
                        "type": "video"
                    }]
                }
            ]
        },
        "contact": {
            "form": {
                "nameLabel": "Full Name",
                "namePlaceholder": "Your name",
                "phoneLabel": "Phone",
                "phonePlaceholder": "+92 300 0000000",
                "packageLabel": "Package",
                "packagePlaceholder": "Select a package",
                "packages": [{ "value": "economy", "label": "Economy Umrah" }],
                "messageLabel": "Message",
                "messagePlaceholder": "Preferred dates",
                "submitButton": "Send Inquiry"
            }
        }
    })
}

/// Canned reply of a [`MockFetcher`].
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this status, content type and body.
    Response(FetchedResponse),
    /// Fail with a network error.
    NetworkError(String),
}

/// [`ConfigFetcher`] returning a canned reply and counting calls.
#[derive(Debug)]
pub struct MockFetcher {
    reply: MockReply,
    calls: AtomicUsize,
}

impl MockFetcher {
    /// Fetcher answering every request with `reply`.
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fetcher answering with status, content type and body.
    pub fn responding(status: u16, content_type: Option<&str>, body: &str) -> Self {
        Self::new(MockReply::Response(FetchedResponse {
            status,
            content_type: content_type.map(String::from),
            body: body.to_string(),
        }))
    }

    /// Fetcher answering 200 with `document` as JSON.
    pub fn json(document: &Value) -> Self {
        Self::responding(200, Some("application/json; charset=utf-8"), &document.to_string())
    }

    /// Number of fetches performed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedResponse, RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::NetworkError(message) => Err(RefreshError::Network(message.clone())),
        }
    }
}
