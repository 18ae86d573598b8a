//! Server-side HTML rendering of the landing page.
//!
//! Each section has its own module writing into a shared `String`. All text
//! coming from the site config passes through [`html_escape`]; renderers only
//! read the typed [`SiteContent`] view, never the raw document.

pub mod contact;
pub mod gallery;
pub mod hero;
pub mod logo;
pub mod video;

use std::fmt::Write as _;

use crate::branding::{APP_DESCRIPTION, APP_DISPLAY_NAME};
use crate::models::SiteContent;

pub use contact::render_contact_form;
pub use gallery::render_gallery;
pub use hero::render_hero;
pub use logo::{render_logo, LogoOptions};
pub use video::render_video;

/// Inputs of a full page render.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Typed content of the active snapshot.
    pub content: &'a SiteContent,
    /// Current countdown value.
    pub days_left: u32,
    /// Requested gallery tab, if any.
    pub gallery_tab: Option<&'a str>,
}

/// Title and meta tags written into the page head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// `<title>`
    pub title: String,
    /// `<meta name="description">`
    pub description: String,
    /// `<meta name="keywords">`
    pub keywords: String,
}

impl PageMeta {
    /// Takes the SEO block of `content`, or the shell defaults without one.
    #[must_use]
    pub fn from_content(content: &SiteContent) -> Self {
        match &content.general.seo {
            Some(seo) => Self {
                title: seo.title.clone(),
                description: seo.description.clone(),
                keywords: seo.keywords.clone(),
            },
            None => Self {
                title: APP_DISPLAY_NAME.to_string(),
                description: APP_DESCRIPTION.to_string(),
                keywords: String::new(),
            },
        }
    }
}

/// Escapes text for use in HTML content and quoted attributes.
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_document_start(output: &mut String, meta: &PageMeta) {
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(output, "<title>{}</title>", html_escape(&meta.title));
    let _ = writeln!(
        output,
        "<meta name=\"description\" content=\"{}\">",
        html_escape(&meta.description)
    );
    let _ = writeln!(
        output,
        "<meta name=\"keywords\" content=\"{}\">",
        html_escape(&meta.keywords)
    );
    output.push_str("<link rel=\"stylesheet\" href=\"/styles.css\">\n");
    output.push_str("</head>\n<body>\n");
}

fn write_document_end(output: &mut String) {
    output.push_str("</body>\n</html>\n");
}

/// Renders the full landing page.
#[must_use]
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let content = ctx.content;
    let mut output = String::new();

    write_document_start(&mut output, &PageMeta::from_content(content));

    output.push_str("<header class=\"site-header\">\n");
    render_logo(
        &mut output,
        &content.general.logo,
        LogoOptions {
            href: Some("#home"),
            show_tagline: true,
        },
    );
    output.push_str("<nav>");
    output.push_str("<a href=\"#home\">Home</a>");
    output.push_str("<a href=\"#gallery\">Gallery</a>");
    output.push_str("<a href=\"#contact\">Contact</a>");
    output.push_str("</nav>\n</header>\n");

    output.push_str("<main>\n");
    render_hero(&mut output, &content.hero, ctx.days_left);
    output.push_str("<a id=\"about\"></a>\n<a id=\"packages\"></a>\n");
    render_gallery(&mut output, &content.gallery, ctx.gallery_tab);

    output.push_str("<section id=\"contact\" class=\"contact\">\n");
    render_contact_form(&mut output, &content.contact.form);
    output.push_str("</section>\n");
    output.push_str("</main>\n");

    output.push_str("<footer class=\"site-footer\">\n");
    render_logo(
        &mut output,
        &content.general.logo,
        LogoOptions {
            href: None,
            show_tagline: false,
        },
    );
    output.push_str("</footer>\n");

    write_document_end(&mut output);
    output
}

/// Renders the page for unknown routes.
#[must_use]
pub fn render_not_found(content: &SiteContent, path: &str) -> String {
    let mut output = String::new();
    let mut meta = PageMeta::from_content(content);
    meta.title = format!("Page not found | {}", meta.title);

    write_document_start(&mut output, &meta);
    output.push_str("<main class=\"not-found\">\n<h1>404</h1>\n");
    let _ = writeln!(
        output,
        "<p>The page <code>{}</code> does not exist.</p>",
        html_escape(path)
    );
    output.push_str("<a class=\"button button-primary\" href=\"/\">Return to Home</a>\n</main>\n");
    write_document_end(&mut output);
    output
}
