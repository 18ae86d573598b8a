//! Data models for the site configuration document.
//!
//! These types are the typed, defaulted view renderers read from. They are
//! independent of the web layer and of how the document was loaded.

pub mod gallery;
mod lenient;
pub mod site;

// Re-export all model types
pub use gallery::{Gallery, GalleryCategory, GalleryItem, MainHeading, MediaKind};
pub use site::{
    Contact, ContactForm, Countdown, General, Hero, HeroButtons, Logo, PackageOption, Seo,
    SiteContent, Slide, TrustBadge,
};
