//! Half-open time interval arithmetic.
//!
//! Every comparison here treats intervals as `[start, end)`: the start instant
//! is included and the end instant is excluded, so two meetings that touch at a
//! boundary never overlap. Adjacency is the "too close" relation between two
//! meetings that do not overlap.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The standard gap below which two meetings are flagged as adjacent (30 minutes).
pub const DEFAULT_ADJACENCY_BUFFER_MS: i64 = 30 * 60 * 1000;

const MS_PER_MINUTE: i64 = 60_000;

/// A half-open time range `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Only intervals with `start < end` take part in conflict computation.
    pub fn is_computable(&self) -> bool {
        self.start < self.end
    }

    /// Length of the interval in whole minutes. See [`duration_minutes`].
    pub fn duration_minutes(&self) -> i64 {
        duration_minutes(self)
    }
}

/// True iff `a.start < b.end && a.end > b.start`.
///
/// Touching intervals (`a.end == b.start`) do not overlap.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start < b.end && a.end > b.start
}

/// True iff both bounds are exactly equal.
pub fn is_duplicate(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start == b.start && a.end == b.end
}

/// Gap in milliseconds between two intervals that do not overlap.
///
/// Returns `None` when the intervals overlap. Touching intervals have a gap of 0.
pub fn gap_ms(a: &TimeInterval, b: &TimeInterval) -> Option<i64> {
    if overlaps(a, b) {
        return None;
    }
    let gap = if a.end <= b.start {
        b.start - a.end
    } else {
        a.start - b.end
    };
    Some(gap.num_milliseconds())
}

/// True iff the intervals do not overlap and the gap between them, on either
/// side, is at most `buffer_ms`.
///
/// A non-positive buffer disables adjacency: with a zero buffer, meetings that
/// merely touch are neither overlapping nor adjacent.
pub fn is_adjacent(a: &TimeInterval, b: &TimeInterval, buffer_ms: i64) -> bool {
    if buffer_ms <= 0 {
        return false;
    }
    matches!(gap_ms(a, b), Some(gap) if gap <= buffer_ms)
}

/// `round((end - start) / 60000)`, with halves rounded up.
pub fn duration_minutes(interval: &TimeInterval) -> i64 {
    let ms = (interval.end - interval.start).num_milliseconds();
    (ms + MS_PER_MINUTE / 2).div_euclid(MS_PER_MINUTE)
}

/// Render an interval for diagnostics in the given timezone.
///
/// Same-day ranges render as `2026-03-02 10:00 - 11:00`; ranges crossing a
/// calendar day repeat the date on the end side.
pub fn format_range(interval: &TimeInterval, tz: &Tz) -> String {
    let start = interval.start.with_timezone(tz);
    let end = interval.end.with_timezone(tz);
    if start.date_naive() == end.date_naive() {
        format!("{} - {}", start.format("%Y-%m-%d %H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} - {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        )
    }
}

