//! Video player markup for a classified media source.

use std::fmt::Write as _;

use super::html_escape;
use crate::services::media::{classify_media, MediaSource, NATIVE_VIDEO_FALLBACK};

/// Permissions granted to provider embeds.
const EMBED_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; \
                           gyroscope; picture-in-picture; web-share";

/// Renders a player for `src`: provider iframe, native video, or plain
/// iframe, depending on how the URL classifies.
pub fn render_video(output: &mut String, src: &str, title: &str) {
    let title = if title.is_empty() { "Video Player" } else { title };

    match classify_media(src) {
        MediaSource::Embed { embed_url, .. } => {
            let _ = writeln!(
                output,
                "<iframe src=\"{}\" title=\"{}\" allow=\"{}\" allowfullscreen></iframe>",
                html_escape(&embed_url),
                html_escape(title),
                EMBED_ALLOW
            );
        }
        MediaSource::NativeVideo { src, mime } => {
            let _ = writeln!(
                output,
                "<video controls title=\"{}\"><source src=\"{}\" type=\"{}\">{}</video>",
                html_escape(title),
                html_escape(&src),
                mime,
                NATIVE_VIDEO_FALLBACK
            );
        }
        MediaSource::Frame { src } => {
            let _ = writeln!(
                output,
                "<iframe src=\"{}\" title=\"{}\" allowfullscreen></iframe>",
                html_escape(&src),
                html_escape(title)
            );
        }
    }
}
