//! Timestamp value object, serialized as Unix milliseconds.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Immutable point in time with millisecond precision, always UTC.
///
/// Serializes as an integer number of milliseconds since the Unix epoch,
/// which is the shape stored in `lastModified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Out-of-range values saturate to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(
            Utc.timestamp_millis_opt(millis)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    /// Returns the timestamp as Unix milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Issues strictly increasing timestamps.
///
/// Two writes within the same wall-clock millisecond (or after the wall
/// clock steps backwards) still receive distinct, ordered `lastModified`
/// values.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next timestamp, never earlier than the wall clock and
    /// always later than any previously issued one.
    pub fn next(&self) -> Timestamp {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Timestamp::from_millis(candidate),
                Err(actual) => prev = actual,
            }
        }
    }

    /// Makes sure later timestamps sort after `seen`, e.g. after loading
    /// drafts written by a clock that ran ahead of ours.
    pub fn observe(&self, seen: Timestamp) {
        self.last.fetch_max(seen.as_millis(), Ordering::AcqRel);
    }
}
