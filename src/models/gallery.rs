//! Gallery section model.

use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// URL fragments that mark an untyped gallery item as a video.
const VIDEO_URL_MARKERS: &[&str] = &["youtube", "facebook", "googlevideo"];

/// Gallery section: heading plus categorized media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Gallery {
    /// Small caps title above the heading.
    #[serde(deserialize_with = "lenient::text")]
    pub section_title: String,
    /// Two-part heading.
    #[serde(deserialize_with = "lenient::or_default")]
    pub main_heading: MainHeading,
    /// Intro paragraph.
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    /// Tabs in display order.
    #[serde(deserialize_with = "lenient::list")]
    pub categories: Vec<GalleryCategory>,
}

impl Gallery {
    /// Returns the category selected by `requested`, or the first category
    /// when nothing was requested.
    ///
    /// An unknown id selects nothing.
    #[must_use]
    pub fn active_category(&self, requested: Option<&str>) -> Option<&GalleryCategory> {
        match requested {
            Some(id) => self.categories.iter().find(|c| c.id == id),
            None => self.categories.first(),
        }
    }
}

/// Heading split into a plain and a highlighted part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainHeading {
    /// Plain leading text.
    #[serde(deserialize_with = "lenient::text")]
    pub pre: String,
    /// Highlighted trailing text.
    #[serde(deserialize_with = "lenient::text")]
    pub highlight: String,
}

/// A gallery tab.
///
/// Older documents list media under `images`. On load, `items` is used when
/// present and non-null, otherwise `images`; it always serializes as `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCategory")]
pub struct GalleryCategory {
    /// Tab identifier, used in the `gallery` query parameter.
    pub id: String,
    /// Tab label.
    pub label: String,
    /// Media in display order.
    pub items: Vec<GalleryItem>,
}

/// Category as written in the document, before `images` is migrated.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawCategory {
    #[serde(deserialize_with = "lenient::text")]
    id: String,
    #[serde(deserialize_with = "lenient::text")]
    label: String,
    #[serde(deserialize_with = "lenient::optional_list")]
    items: Option<Vec<GalleryItem>>,
    #[serde(deserialize_with = "lenient::optional_list")]
    images: Option<Vec<GalleryItem>>,
}

impl From<RawCategory> for GalleryCategory {
    fn from(raw: RawCategory) -> Self {
        Self {
            id: raw.id,
            label: raw.label,
            items: raw.items.or(raw.images).unwrap_or_default(),
        }
    }
}

/// A single image or video tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryItem {
    /// Media URL.
    #[serde(deserialize_with = "lenient::text")]
    pub src: String,
    /// Alternative text.
    #[serde(deserialize_with = "lenient::text")]
    pub alt: String,
    /// Caption.
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    /// Explicit media type (`"video"` or `"image"`).
    #[serde(
        rename = "type",
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

/// How a gallery tile is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Static image with lightbox.
    Image,
    /// Embedded or native video player.
    Video,
}

impl GalleryItem {
    /// Decides whether the tile is a video.
    ///
    /// An explicit `"video"` type always wins. Otherwise, well-known video
    /// hosts in the URL mark the item as a video even if it is typed as an
    /// image.
    #[must_use]
    pub fn media_kind(&self) -> MediaKind {
        let explicit_video = self.kind.as_deref() == Some("video");
        let hosted_video = VIDEO_URL_MARKERS
            .iter()
            .any(|marker| self.src.contains(marker));

        if explicit_video || hosted_video {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}
