//! Days-remaining countdown for the booking deadline.
//!
//! The value is derived from `hero.countdown.targetDate` of the active site
//! config. Both "today" and the target are whole calendar dates in local
//! time, so the difference is an exact number of days; past targets and
//! today's date clamp to zero, which hides the countdown.
//!
//! [`CountdownTicker`] keeps the value current: it computes once when
//! mounted, then every [`COUNTDOWN_REFRESH_INTERVAL`], and again whenever a
//! config replacement changes the target date. Dropping the ticker aborts its
//! task, so no update is published after teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::constants::COUNTDOWN_REFRESH_INTERVAL;
use crate::services::config_store::{ConfigSnapshot, ConfigStore};

/// Date-only formats accepted for the target date.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Date-time formats without offset accepted for the target date.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Source of the current local date.
pub trait Clock: Send + Sync {
    /// Today's date in local time.
    fn today(&self) -> NaiveDate;
}

/// [`Clock`] reading the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// [`Clock`] returning a settable date.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a clock stuck on `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Moves the clock to `today`.
    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Parses a target date string into a local calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `Month D, YYYY`, date-times with or
/// without seconds, and RFC 3339 timestamps (converted to local time first).
#[must_use]
pub fn parse_target_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Whole days from `today` until `target`, clamped at zero.
#[must_use]
pub fn days_until(target: NaiveDate, today: NaiveDate) -> u32 {
    let days = target.signed_duration_since(today).num_days();
    if days <= 0 {
        0
    } else {
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// Days remaining until the raw target date, or zero if it is missing or
/// unparseable.
#[must_use]
pub fn days_remaining(target: Option<&str>, today: NaiveDate) -> u32 {
    let Some(raw) = target else {
        return 0;
    };

    match parse_target_date(raw) {
        Some(date) => days_until(date, today),
        None => {
            warn!("Unparseable countdown target date '{}'", raw);
            0
        }
    }
}

/// Unit label for a day count.
#[must_use]
pub fn day_label(days: u32) -> &'static str {
    if days == 1 {
        "day"
    } else {
        "days"
    }
}

/// Raw target date of a snapshot, if the countdown block has one.
#[must_use]
pub fn target_date_of(snapshot: &ConfigSnapshot) -> Option<String> {
    snapshot
        .content()
        .hero
        .countdown
        .as_ref()
        .and_then(|c| c.target_date.clone())
}

/// Background task keeping the days-remaining value current.
pub struct CountdownTicker {
    days: watch::Receiver<u32>,
    computations: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    /// Mounts a ticker on `store` with the hourly schedule.
    ///
    /// Must be called within a Tokio runtime.
    #[must_use]
    pub fn mount(store: &ConfigStore, clock: Arc<dyn Clock>) -> Self {
        Self::mount_with_period(store, clock, COUNTDOWN_REFRESH_INTERVAL)
    }

    /// Mounts a ticker recomputing every `period`.
    ///
    /// The first computation happens before this returns.
    #[must_use]
    pub fn mount_with_period(store: &ConfigStore, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let computations = Arc::new(AtomicU64::new(0));
        let mut config_rx = store.subscribe();
        let mut target = target_date_of(&config_rx.borrow_and_update());

        let initial = compute(target.as_deref(), clock.as_ref(), &computations);
        let (tx, days) = watch::channel(initial);

        let counter = Arc::clone(&computations);
        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut store_alive = true;

            loop {
                tokio::select! {
                    _ = ticks.tick() => {}
                    changed = config_rx.changed(), if store_alive => {
                        if changed.is_err() {
                            store_alive = false;
                            continue;
                        }
                        let next = target_date_of(&config_rx.borrow_and_update());
                        if next == target {
                            continue;
                        }
                        debug!("Countdown target changed to {:?}", next);
                        target = next;
                    }
                }

                tx.send_replace(compute(target.as_deref(), clock.as_ref(), &counter));
            }
        });

        Self {
            days,
            computations,
            task,
        }
    }

    /// Current days-remaining value.
    #[must_use]
    pub fn days_left(&self) -> u32 {
        *self.days.borrow()
    }

    /// Receiver notified on every recomputation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.days.clone()
    }

    /// Number of computations performed so far.
    #[must_use]
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::SeqCst)
    }

    /// Shared handle on the computation counter, still readable after
    /// teardown.
    #[must_use]
    pub fn computation_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.computations)
    }

    /// Stops the schedule. Equivalent to dropping the ticker.
    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn compute(target: Option<&str>, clock: &dyn Clock, counter: &AtomicU64) -> u32 {
    counter.fetch_add(1, Ordering::SeqCst);
    days_remaining(target, clock.today())
}
