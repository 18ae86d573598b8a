//! Brand logo block.

use std::fmt::Write as _;

use super::html_escape;
use crate::models::Logo;

/// Presentation options for [`render_logo`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoOptions<'a> {
    /// Wraps the logo in a link when set.
    pub href: Option<&'a str>,
    /// Shows the tagline under the brand name.
    pub show_tagline: bool,
}

/// Renders the logo: optional image, brand name and optional tagline.
pub fn render_logo(output: &mut String, logo: &Logo, options: LogoOptions<'_>) {
    let tag = if options.href.is_some() { "a" } else { "div" };

    match options.href {
        Some(href) => {
            let _ = write!(output, "<a class=\"logo\" href=\"{}\">", html_escape(href));
        }
        None => output.push_str("<div class=\"logo\">"),
    }

    if let Some(image) = logo.image.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(
            output,
            "<span class=\"logo-mark\"><img src=\"{}\" alt=\"{} Logo\"></span>",
            html_escape(image),
            html_escape(&logo.text)
        );
    }

    output.push_str("<span class=\"logo-words\">");
    let _ = write!(
        output,
        "<span class=\"logo-text\">{}</span>",
        html_escape(&logo.text)
    );
    if options.show_tagline {
        let _ = write!(
            output,
            "<span class=\"logo-tagline\">{}</span>",
            html_escape(&logo.sub_text)
        );
    }
    output.push_str("</span>");

    let _ = writeln!(output, "</{tag}>");
}
