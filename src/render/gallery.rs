//! Gallery section with category tabs, media grid and image lightbox.
//!
//! Tabs are plain links carrying the category id in the `gallery` query
//! parameter; the lightbox opens through the URL fragment (`:target`), so
//! the section needs no script.

use std::fmt::Write as _;

use super::{html_escape, render_video};
use crate::models::{Gallery, GalleryItem, MediaKind};

/// Renders the gallery section with `requested_tab` active (first tab if
/// none).
pub fn render_gallery(output: &mut String, gallery: &Gallery, requested_tab: Option<&str>) {
    let active = gallery.active_category(requested_tab);
    let active_id = active.map(|c| c.id.as_str());
    let items: &[GalleryItem] = active.map(|c| c.items.as_slice()).unwrap_or_default();

    output.push_str("<section id=\"gallery\" class=\"gallery\">\n");

    output.push_str("<div class=\"section-header\">\n");
    let _ = writeln!(
        output,
        "<span class=\"section-title\">{}</span>",
        html_escape(&gallery.section_title)
    );
    let _ = writeln!(
        output,
        "<h2>{} <span class=\"highlight\">{}</span></h2>",
        html_escape(&gallery.main_heading.pre),
        html_escape(&gallery.main_heading.highlight)
    );
    let _ = writeln!(output, "<p>{}</p>", html_escape(&gallery.description));
    output.push_str("</div>\n");

    output.push_str("<nav class=\"gallery-tabs\">\n");
    for category in &gallery.categories {
        let class = if Some(category.id.as_str()) == active_id {
            "gallery-tab active"
        } else {
            "gallery-tab"
        };
        let _ = writeln!(
            output,
            "<a class=\"{}\" href=\"?gallery={}#gallery\">{}</a>",
            class,
            html_escape(&urlencoding::encode(&category.id)),
            html_escape(&category.label)
        );
    }
    output.push_str("</nav>\n");

    output.push_str("<div class=\"gallery-grid\">\n");
    for (index, item) in items.iter().enumerate() {
        match item.media_kind() {
            MediaKind::Video => {
                output.push_str("<div class=\"gallery-tile video\">\n");
                render_video(output, &item.src, &item.title);
                output.push_str("</div>\n");
            }
            MediaKind::Image => render_image_tile(output, item, index),
        }
    }
    output.push_str("</div>\n");

    for (index, item) in items.iter().enumerate() {
        if item.media_kind() == MediaKind::Image {
            render_lightbox(output, item, index);
        }
    }

    output.push_str("</section>\n");
}

fn render_image_tile(output: &mut String, item: &GalleryItem, index: usize) {
    let _ = writeln!(
        output,
        "<a class=\"gallery-tile\" href=\"#lightbox-{}\">\
         <img src=\"{}\" alt=\"{}\" loading=\"lazy\"><span class=\"caption\">{}</span></a>",
        index,
        html_escape(&item.src),
        html_escape(&item.alt),
        html_escape(&item.title)
    );
}

fn render_lightbox(output: &mut String, item: &GalleryItem, index: usize) {
    let _ = writeln!(output, "<div id=\"lightbox-{index}\" class=\"lightbox\">");
    output.push_str("<a class=\"close\" href=\"#gallery\" aria-label=\"Close\">&times;</a>\n");
    let _ = writeln!(
        output,
        "<img src=\"{}\" alt=\"{}\">",
        html_escape(&item.src),
        html_escape(&item.alt)
    );
    let _ = writeln!(
        output,
        "<div class=\"details\"><h3>{}</h3><p>{}</p></div>",
        html_escape(&item.title),
        html_escape(&item.alt)
    );
    output.push_str("</div>\n");
}
