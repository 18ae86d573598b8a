//! Branding and application identity.
//!
//! Names used for the binary, the settings directory and the fallback page
//! head live here so a rebrand touches one file.

/// The human-readable display name of the application.
///
/// Used as the page title when the site config has no SEO block, and in
/// server log lines.
pub const APP_DISPLAY_NAME: &str = "Pilgrim Site";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "pilgrim-site";

/// The directory name for application settings.
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "PilgrimSite";

/// Short description for help text and the fallback meta description.
pub const APP_DESCRIPTION: &str = "Umrah and Hajj travel packages";

/// User agent sent when fetching the remote site config.
pub fn user_agent() -> String {
    format!("{}/{}", APP_BINARY_NAME, env!("CARGO_PKG_VERSION"))
}
