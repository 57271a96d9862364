//! Deterministic item selection
//!
//! Picks the item of the day from the current time, the configured update
//! interval, and the persisted seed table. Within one (day, hour-bucket)
//! pair the pick never changes; it is eligible to change only when an
//! interval boundary is crossed.

use chrono::{DateTime, Local, Timelike};
use thiserror::Error;

use crate::cache::SeedStore;
use crate::data::ItemKey;

/// One hour in milliseconds
pub const ONE_HOUR_MS: i64 = 60 * 60 * 1000;

/// One day in milliseconds
pub const ONE_DAY_MS: i64 = 24 * ONE_HOUR_MS;

/// How the item of the day should be chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Pick pseudo-randomly from the whole catalog
    Full,
    /// Pick pseudo-randomly from positions up to the given bound
    ///
    /// Bounds outside `1..=max_id` fall back to the full range at selection
    /// time, mirroring the parameter contract.
    Bound(i64),
    /// Always resolve to the item with this exact name
    Pinned(String),
}

/// Errors from selecting the item of the day
#[derive(Debug, Error)]
pub enum SelectError {
    /// The seed table could not be persisted
    #[error("failed to persist the random seed table: {0}")]
    SeedStore(#[from] std::io::Error),

    /// The persisted seed table covers today but not the selected bucket
    #[error("seed table for day {day} has no value for hour bucket {bucket}")]
    MissingBucket { day: i64, bucket: u32 },
}

/// Start of the current interval in epoch milliseconds
///
/// The raw epoch floor is shifted by the local UTC offset so that interval
/// boundaries line up with local wall-clock hours rather than UTC.
pub fn start_of_current_interval(now: DateTime<Local>, interval_ms: i64) -> i64 {
    let utc_offset_ms = i64::from(now.offset().local_minus_utc()) * 1000;
    now.timestamp_millis().div_euclid(interval_ms) * interval_ms - utc_offset_ms
}

/// Day number used as the seed table key
pub fn day_number(now: DateTime<Local>) -> i64 {
    // Equivalent to `i64::div_ceil`, which is still unstable
    // (`int_roundings`, rust-lang/rust#88581) for signed integers.
    let lhs = start_of_current_interval(now, ONE_DAY_MS);
    let rhs = ONE_DAY_MS;
    let d = lhs / rhs;
    let r = lhs % rhs;
    if (r > 0 && rhs > 0) || (r < 0 && rhs < 0) {
        d + 1
    } else {
        d
    }
}

/// Interval-aligned hour bucket used as the per-day seed key
///
/// Folds multiple local hours into one bucket when the interval exceeds one
/// hour, so the key changes only when an interval boundary is crossed.
/// `interval_hours` below 1 is treated as 1.
pub fn hour_bucket(now: DateTime<Local>, interval_hours: u32) -> u32 {
    let interval_hours = interval_hours.max(1);
    now.hour() / interval_hours * interval_hours
}

/// Picks one item identifier per (day, hour-bucket) pair
#[derive(Debug)]
pub struct ItemSelector {
    /// Largest valid positional id (catalog size minus one)
    max_id: usize,
    seeds: SeedStore,
}

impl ItemSelector {
    /// Creates a selector over a catalog whose largest position is `max_id`
    pub fn new(max_id: usize, seeds: SeedStore) -> Self {
        Self { max_id, seeds }
    }

    /// Returns the identifier of the item to show for `now`
    ///
    /// A pinned selector bypasses randomization entirely. Otherwise the seed
    /// value for the current (day, bucket) pair is looked up and the table is
    /// persisted back, even when unchanged. The pick is
    /// `ceil(random * bound)`, which biases away from position 0: id 0 can
    /// only result from a seed value of exactly 0.
    pub fn select_of_today(
        &self,
        selector: &Selector,
        now: DateTime<Local>,
        interval_hours: u32,
    ) -> Result<ItemKey, SelectError> {
        if let Selector::Pinned(name) = selector {
            return Ok(ItemKey::Name(name.clone()));
        }

        let day = day_number(now);
        let bucket = hour_bucket(now, interval_hours);

        let table = self.seeds.seed_for_day(day);
        self.seeds.save(&table)?;

        let random = table
            .get(&day)
            .and_then(|buckets| buckets.get(&bucket))
            .copied()
            .ok_or(SelectError::MissingBucket { day, bucket })?;

        let bound = match selector {
            Selector::Bound(n) if (1..=self.max_id as i64).contains(n) => *n as f64,
            _ => self.max_id as f64,
        };
        Ok(ItemKey::Index((random * bound).ceil() as usize))
    }
}
