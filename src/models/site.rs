//! Typed view over the site configuration document.
//!
//! The document itself stays untyped JSON (it is served back verbatim and
//! replaced wholesale). Renderers never walk that JSON directly; they read
//! [`SiteContent`], which is built section by section. Every field decodes
//! on its own through the `lenient` helpers, so a null or malformed value degrades to
//! that field's default and a bad list entry is dropped, instead of failing
//! the section or the page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::gallery::Gallery;
use crate::models::lenient;

/// Typed, defaulted content of a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    /// Site metadata, SEO and logo.
    pub general: General,
    /// Hero carousel, countdown and trust badges.
    pub hero: Hero,
    /// Gallery section.
    pub gallery: Gallery,
    /// Contact section.
    pub contact: Contact,
}

impl SiteContent {
    /// Builds the typed view of a configuration document.
    ///
    /// Each top-level section is decoded independently. A section that is
    /// absent yields its default; a section that is not an object is logged
    /// and also yields its default, leaving the other sections intact.
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        Self {
            general: section(document, "general"),
            hero: section(document, "hero"),
            gallery: section(document, "gallery"),
            contact: section(document, "contact"),
        }
    }
}

fn section<T: DeserializeOwned + Default>(document: &Value, key: &str) -> T {
    match document.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => T::deserialize(value).unwrap_or_else(|err| {
            warn!("Ignoring malformed '{}' section in site config: {}", key, err);
            T::default()
        }),
    }
}

// ============================================================================
// General
// ============================================================================

/// General site information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Page title and meta tags. Absent means the page shell defaults apply.
    #[serde(deserialize_with = "lenient::optional")]
    pub seo: Option<Seo>,
    /// Brand logo.
    #[serde(deserialize_with = "lenient::or_default")]
    pub logo: Logo,
}

/// Search engine metadata written into the page head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seo {
    /// Document title.
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    /// `<meta name="description">` content.
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    /// `<meta name="keywords">` content.
    #[serde(deserialize_with = "lenient::text")]
    pub keywords: String,
}

/// Brand logo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Logo {
    /// Logo image URL; no image is rendered when absent or empty.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub image: Option<String>,
    /// Brand name.
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    /// Tagline shown under the brand name.
    #[serde(deserialize_with = "lenient::text")]
    pub sub_text: String,
}

// ============================================================================
// Hero
// ============================================================================

/// Hero section: slides, countdown and trust badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    /// Slides in display order.
    #[serde(deserialize_with = "lenient::list")]
    pub slides: Vec<Slide>,
    /// Booking deadline countdown. Absent hides every countdown element.
    #[serde(deserialize_with = "lenient::optional")]
    pub countdown: Option<Countdown>,
    /// Call-to-action button labels.
    #[serde(deserialize_with = "lenient::or_default")]
    pub buttons: HeroButtons,
    /// Short statistics shown under the carousel.
    #[serde(deserialize_with = "lenient::list")]
    pub trust_badges: Vec<TrustBadge>,
}

/// One hero carousel slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Slide {
    /// Background image URL.
    #[serde(deserialize_with = "lenient::text")]
    pub image: String,
    /// Opening invocation line.
    #[serde(deserialize_with = "lenient::text")]
    pub bismillah: String,
    /// Optional translation of the invocation.
    #[serde(deserialize_with = "lenient::optional_text")]
    pub translation: Option<String>,
    /// Heading text before the highlighted part.
    #[serde(deserialize_with = "lenient::text")]
    pub heading_pre: String,
    /// Highlighted heading text.
    #[serde(deserialize_with = "lenient::text")]
    pub heading_span: String,
    /// Paragraph under the heading.
    #[serde(deserialize_with = "lenient::text")]
    pub subheading: String,
}

/// Countdown configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Countdown {
    /// Target date as written in the document (e.g. `2027-02-10`).
    #[serde(deserialize_with = "lenient::optional_text")]
    pub target_date: Option<String>,
    /// Headline shown while the countdown is running.
    #[serde(deserialize_with = "lenient::text")]
    pub deadline_text: String,
    /// Secondary line under the headline.
    #[serde(deserialize_with = "lenient::text")]
    pub supporting_text: String,
}

/// Hero button labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroButtons {
    /// Label of the button scrolling to the packages section.
    #[serde(deserialize_with = "lenient::text")]
    pub explore: String,
    /// Label of the button scrolling to the contact section.
    #[serde(deserialize_with = "lenient::text")]
    pub contact: String,
}

/// A value/label pair such as "15+ / Years of Service".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustBadge {
    /// Prominent value.
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    /// Caption under the value.
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
}

// ============================================================================
// Contact
// ============================================================================

/// Contact section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Inquiry form labels and options.
    #[serde(deserialize_with = "lenient::or_default")]
    pub form: ContactForm,
}

/// Labels, placeholders and options of the inquiry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    /// Label of the name input.
    #[serde(deserialize_with = "lenient::text")]
    pub name_label: String,
    /// Placeholder of the name input.
    #[serde(deserialize_with = "lenient::text")]
    pub name_placeholder: String,
    /// Label of the phone input.
    #[serde(deserialize_with = "lenient::text")]
    pub phone_label: String,
    /// Placeholder of the phone input.
    #[serde(deserialize_with = "lenient::text")]
    pub phone_placeholder: String,
    /// Label of the package select.
    #[serde(deserialize_with = "lenient::text")]
    pub package_label: String,
    /// Text of the empty package option.
    #[serde(deserialize_with = "lenient::text")]
    pub package_placeholder: String,
    /// Selectable packages in display order.
    #[serde(deserialize_with = "lenient::list")]
    pub packages: Vec<PackageOption>,
    /// Label of the message textarea.
    #[serde(deserialize_with = "lenient::text")]
    pub message_label: String,
    /// Placeholder of the message textarea.
    #[serde(deserialize_with = "lenient::text")]
    pub message_placeholder: String,
    /// Submit button text.
    #[serde(deserialize_with = "lenient::text")]
    pub submit_button: String,
}

/// One entry of the package select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOption {
    /// Submitted value.
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
    /// Visible label.
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_document_reads_camel_case_fields() {
        let doc = json!({
            "general": {
                "seo": { "title": "T", "description": "D", "keywords": "K" },
                "logo": { "image": "/logo.png", "text": "Brand", "subText": "Tagline" }
            },
            "hero": {
                "slides": [{
                    "image": "a.jpg",
                    "bismillah": "B",
                    "headingPre": "Pre",
                    "headingSpan": "Span",
                    "subheading": "Sub"
                }],
                "countdown": { "targetDate": "2030-01-01", "deadlineText": "Soon" },
                "buttons": { "explore": "Explore", "contact": "Call" },
                "trustBadges": [{ "value": "10", "label": "Years" }]
            }
        });

        let content = SiteContent::from_document(&doc);

        assert_eq!(content.general.seo.as_ref().unwrap().title, "T");
        assert_eq!(content.general.logo.sub_text, "Tagline");
        assert_eq!(content.hero.slides.len(), 1);
        assert_eq!(content.hero.slides[0].heading_span, "Span");
        assert_eq!(content.hero.slides[0].translation, None);
        let countdown = content.hero.countdown.unwrap();
        assert_eq!(countdown.target_date.as_deref(), Some("2030-01-01"));
        assert_eq!(countdown.supporting_text, "");
        assert_eq!(content.hero.trust_badges[0].label, "Years");
    }

    #[test]
    fn test_from_document_missing_sections_default() {
        let content = SiteContent::from_document(&json!({}));
        assert_eq!(content, SiteContent::default());
        assert!(content.general.seo.is_none());
        assert!(content.hero.countdown.is_none());
    }

    #[test]
    fn test_from_document_malformed_section_is_isolated() {
        let doc = json!({
            "hero": "not an object",
            "gallery": { "categories": "not a list" },
            "contact": { "form": { "nameLabel": "Name" } }
        });

        let content = SiteContent::from_document(&doc);

        assert_eq!(content.hero, Hero::default());
        assert!(content.gallery.categories.is_empty());
        assert_eq!(content.contact.form.name_label, "Name");
    }

    #[test]
    fn test_null_field_keeps_rest_of_section() {
        let doc = json!({
            "hero": {
                "slides": [{ "headingPre": "Pre", "subheading": null, "translation": null }],
                "countdown": { "targetDate": "2030-01-01", "deadlineText": null },
                "buttons": null,
                "trustBadges": [{ "value": "10", "label": "Years" }]
            }
        });

        let content = SiteContent::from_document(&doc);

        assert_eq!(content.hero.slides.len(), 1);
        assert_eq!(content.hero.slides[0].heading_pre, "Pre");
        assert_eq!(content.hero.slides[0].subheading, "");
        assert_eq!(content.hero.slides[0].translation, None);
        let countdown = content.hero.countdown.unwrap();
        assert_eq!(countdown.target_date.as_deref(), Some("2030-01-01"));
        assert_eq!(countdown.deadline_text, "");
        assert_eq!(content.hero.buttons, HeroButtons::default());
        assert_eq!(content.hero.trust_badges[0].value, "10");
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back_individually() {
        let doc = json!({
            "general": {
                "seo": "not an object",
                "logo": { "image": 42, "text": ["Brand"], "subText": "Tagline" }
            },
            "hero": {
                "slides": [{ "headingPre": 2027, "headingSpan": "Hajj" }],
                "buttons": "x",
                "trustBadges": [{ "value": "15+", "label": "Years" }, "oops", { "value": true }]
            },
            "contact": { "form": { "nameLabel": "Name", "packages": { "value": "vip" } } }
        });

        let content = SiteContent::from_document(&doc);

        assert!(content.general.seo.is_none());
        assert_eq!(content.general.logo.image.as_deref(), Some("42"));
        assert_eq!(content.general.logo.text, "");
        assert_eq!(content.general.logo.sub_text, "Tagline");
        assert_eq!(content.hero.slides[0].heading_pre, "2027");
        assert_eq!(content.hero.slides[0].heading_span, "Hajj");
        assert_eq!(content.hero.buttons, HeroButtons::default());
        assert_eq!(content.hero.trust_badges.len(), 2);
        assert_eq!(content.hero.trust_badges[1].value, "true");
        assert_eq!(content.contact.form.name_label, "Name");
        assert!(content.contact.form.packages.is_empty());
    }

    #[test]
    fn test_null_countdown_is_absent() {
        let doc = json!({ "hero": { "countdown": null, "slides": [{ "image": "a.jpg" }] } });

        let content = SiteContent::from_document(&doc);

        assert!(content.hero.countdown.is_none());
        assert_eq!(content.hero.slides[0].image, "a.jpg");
    }

    #[test]
    fn test_bad_slide_is_skipped() {
        let doc = json!({
            "hero": { "slides": [{ "image": "a.jpg" }, null, "b.jpg", { "image": "c.jpg" }] }
        });

        let content = SiteContent::from_document(&doc);

        let images: Vec<_> = content.hero.slides.iter().map(|s| s.image.as_str()).collect();
        assert_eq!(images, ["a.jpg", "c.jpg"]);
    }

    #[test]
    fn test_from_document_non_object_root() {
        let content = SiteContent::from_document(&json!([1, 2, 3]));
        assert_eq!(content, SiteContent::default());
    }
}
