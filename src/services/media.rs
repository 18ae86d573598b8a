//! Classification of video URLs into a playable source.
//!
//! Purely syntactic: no request is made to check that a URL actually plays.
//! Rules are tried in order and the first match wins:
//!
//! 1. YouTube shorts → YouTube embed
//! 2. Other YouTube URLs (watch, embed, youtu.be, `v=`) → YouTube embed
//! 3. Facebook URLs → Facebook video plugin
//! 4. `googlevideo.com` or a `.mp4`/`.webm`/`.ogg` file → native `<video>`
//! 5. Anything else → plain iframe on the URL itself

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static YOUTUBE_SHORTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"youtube\.com/shorts/([^"&?/\s]{11})"#).expect("valid shorts regex")
});

static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("valid youtube regex")
});

static VIDEO_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg)(\?.*)?$").expect("valid video file regex"));

/// Marker of the streaming CDN whose URLs play natively.
const STREAMING_CDN_MARKER: &str = "googlevideo.com";

/// Marker of Facebook-hosted videos.
const FACEBOOK_MARKER: &str = "facebook.com";

/// MIME type declared on native video sources.
pub const NATIVE_VIDEO_MIME: &str = "video/mp4";

/// Text shown by browsers that cannot play a native video.
pub const NATIVE_VIDEO_FALLBACK: &str = "Your browser does not support the video tag.";

/// Embed provider of an [`MediaSource::Embed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedProvider {
    /// youtube.com / youtu.be
    YouTube,
    /// facebook.com
    Facebook,
}

/// How a video URL is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaSource {
    /// Provider iframe on a canonical embed URL.
    Embed {
        /// Provider the URL was recognized as.
        provider: EmbedProvider,
        /// URL to load in the iframe.
        embed_url: String,
    },
    /// Native `<video controls>` with one source.
    NativeVideo {
        /// Source URL.
        src: String,
        /// Declared MIME type of the source.
        mime: &'static str,
    },
    /// Last-resort iframe on the original URL.
    Frame {
        /// Original URL.
        src: String,
    },
}

/// Canonical YouTube embed URL for a video id.
fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}?autoplay=0&rel=0")
}

/// Facebook plugin URL playing the video at `url`.
fn facebook_embed_url(url: &str) -> String {
    format!(
        "https://www.facebook.com/plugins/video.php?href={}&show_text=0&width=560",
        urlencoding::encode(url)
    )
}

/// Classifies `url` according to the ordered rule table.
#[must_use]
pub fn classify_media(url: &str) -> MediaSource {
    let youtube_id = YOUTUBE_SHORTS
        .captures(url)
        .or_else(|| YOUTUBE.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    if let Some(id) = youtube_id {
        return MediaSource::Embed {
            provider: EmbedProvider::YouTube,
            embed_url: youtube_embed_url(id),
        };
    }

    if url.contains(FACEBOOK_MARKER) {
        return MediaSource::Embed {
            provider: EmbedProvider::Facebook,
            embed_url: facebook_embed_url(url),
        };
    }

    if url.contains(STREAMING_CDN_MARKER) || VIDEO_FILE.is_match(url) {
        return MediaSource::NativeVideo {
            src: url.to_string(),
            mime: NATIVE_VIDEO_MIME,
        };
    }

    MediaSource::Frame {
        src: url.to_string(),
    }
}
