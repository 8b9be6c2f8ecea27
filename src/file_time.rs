//! Windows-style last-write timestamps
//!
//! Patch caches store modification times as a single 64-bit FILETIME value:
//! the number of 100-nanosecond ticks since 1601-01-01 UTC, with the high
//! 32-bit half in the upper bits and the low half in the lower bits.
//! Non-Windows platforms translate `SystemTime` into the same space so a cache
//! written on one platform compares bit-for-bit on another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// 100ns ticks per second
const TICKS_PER_SECOND: u64 = 10_000_000;

/// Seconds between 1601-01-01 and 1970-01-01
const EPOCH_DIFFERENCE_SECS: u64 = 11_644_473_600;

/// Encoded last-write time (FILETIME ticks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTime(u64);

impl FileTime {
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Combine the two 32-bit halves reported by the OS
    pub const fn from_halves(high: u32, low: u32) -> Self {
        Self(((high as u64) << 32) | low as u64)
    }

    pub const fn ticks(self) -> u64 {
        self.0
    }

    pub const fn high(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn low(self) -> u32 {
        self.0 as u32
    }

    /// Reinterpret a signed value from a cache store (bit-preserving)
    pub const fn from_i64(value: i64) -> Self {
        Self(value as u64)
    }

    /// Signed view for cache stores that only hold `i64` (bit-preserving)
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }

    /// Translate a `SystemTime` into FILETIME ticks
    ///
    /// Sub-tick precision is truncated. Times before 1601 saturate to zero.
    pub fn from_system_time(time: SystemTime) -> Self {
        let epoch_ticks = EPOCH_DIFFERENCE_SECS * TICKS_PER_SECOND;
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => {
                let ticks = after.as_secs() as u128 * TICKS_PER_SECOND as u128
                    + (after.subsec_nanos() / 100) as u128
                    + epoch_ticks as u128;
                Self(u64::try_from(ticks).unwrap_or(u64::MAX))
            }
            Err(err) => {
                let before = err.duration();
                // Round up so truncation stays toward earlier instants
                let nanos = before.as_nanos();
                let ticks = nanos / 100 + u128::from(nanos % 100 != 0);
                Self((epoch_ticks as u128).saturating_sub(ticks) as u64)
            }
        }
    }

    /// Convert back into a `SystemTime`, if representable
    pub fn to_system_time(self) -> Option<SystemTime> {
        let epoch_ticks = EPOCH_DIFFERENCE_SECS * TICKS_PER_SECOND;
        if self.0 >= epoch_ticks {
            let since = self.0 - epoch_ticks;
            UNIX_EPOCH.checked_add(ticks_to_duration(since))
        } else {
            let before = epoch_ticks - self.0;
            UNIX_EPOCH.checked_sub(ticks_to_duration(before))
        }
    }

    /// UTC date/time for display and logging
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        self.to_system_time().map(DateTime::<Utc>::from)
    }
}

fn ticks_to_duration(ticks: u64) -> std::time::Duration {
    std::time::Duration::new(
        ticks / TICKS_PER_SECOND,
        ((ticks % TICKS_PER_SECOND) * 100) as u32,
    )
}

impl From<SystemTime> for FileTime {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{} ({})", self.0, dt.to_rfc3339()),
            None => write!(f, "{}", self.0),
        }
    }
}
