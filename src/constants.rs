//! Application-wide constants.

use std::time::Duration;

/// Conventional path of the runtime site config on the serving origin.
pub const SITE_CONFIG_PATH: &str = "/siteConfig.json";

/// How often the countdown is recomputed (one hour).
pub const COUNTDOWN_REFRESH_INTERVAL: Duration = Duration::from_millis(3_600_000);

/// Number of characters of an unparsable remote body kept in the log.
pub const MALFORMED_PREVIEW_CHARS: usize = 50;

/// Timeout for the one-shot remote config fetch.
pub const REMOTE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
