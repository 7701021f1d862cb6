//! Interval algebra for free-time computation.
//!
//! An [`IntervalSet`] holds the currently unclaimed time within a day
//! window as an ordered, disjoint collection of half-open ranges. Fixed
//! blocks are carved out by subtraction; flexible chunks are placed via
//! first-fit queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Create a new interval. Zero and negative-length ranges are rejected.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        if end <= start {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this interval can hold a chunk of the given length
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }
}

/// An ordered, disjoint set of free intervals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Create a set spanning a single window. Empty if `end <= start`.
    pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            intervals: Interval::new(start, end).into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Remove a busy range from every interval it intersects.
    ///
    /// Depending on whether the busy range is a prefix, suffix, interior
    /// cut, or full cover of an interval, that interval is replaced by
    /// zero, one, or two intervals. Results stay sorted by start and
    /// mutually disjoint.
    pub fn subtract(&mut self, busy_start: DateTime<Utc>, busy_end: DateTime<Utc>) {
        if busy_end <= busy_start {
            return;
        }
        let mut next = Vec::with_capacity(self.intervals.len() + 1);
        for iv in &self.intervals {
            if busy_end <= iv.start || busy_start >= iv.end {
                next.push(*iv);
                continue;
            }
            if let Some(head) = Interval::new(iv.start, busy_start) {
                next.push(head);
            }
            if let Some(tail) = Interval::new(busy_end, iv.end) {
                next.push(tail);
            }
        }
        self.intervals = next;
    }

    /// First interval (ascending start) long enough for `minutes`.
    ///
    /// First-fit, not best-fit: placement stays predictable at the cost
    /// of fragmentation.
    pub fn first_fit(&self, minutes: i64) -> Option<Interval> {
        self.intervals.iter().copied().find(|iv| iv.can_fit(minutes))
    }

    /// Total free minutes across all intervals.
    pub fn total_free_minutes(&self) -> i64 {
        self.intervals.iter().map(Interval::duration_minutes).sum()
    }
}
