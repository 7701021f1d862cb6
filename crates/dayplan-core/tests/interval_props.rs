//! Property tests for the interval algebra underpinning free-time
//! bookkeeping.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dayplan_core::IntervalSet;
use proptest::prelude::*;

const WINDOW_MIN: i64 = 960; // 06:00-22:00

fn minute(m: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 6, 6, 0, 0).unwrap() + Duration::minutes(m)
}

proptest! {
    #[test]
    fn subtraction_keeps_set_sorted_disjoint_and_bounded(
        cuts in prop::collection::vec((0i64..WINDOW_MIN, 1i64..180), 0..12)
    ) {
        let mut free = IntervalSet::window(minute(0), minute(WINDOW_MIN));
        for (start, len) in cuts {
            free.subtract(minute(start), minute(start + len));
        }
        for pair in free.intervals().windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start());
        }
        for iv in free.intervals() {
            prop_assert!(iv.duration_minutes() > 0);
            prop_assert!(iv.start() >= minute(0));
            prop_assert!(iv.end() <= minute(WINDOW_MIN));
        }
    }

    #[test]
    fn disjoint_blocks_reduce_free_minutes_exactly(
        layout in prop::collection::vec((0i64..90, 1i64..120), 0..10)
    ) {
        // Lay blocks end to end so they never overlap.
        let mut cursor = 0;
        let mut busy_total = 0;
        let mut blocks = Vec::new();
        for (gap, len) in layout {
            let start = cursor + gap;
            let end = start + len;
            if end > WINDOW_MIN {
                break;
            }
            blocks.push((start, end));
            busy_total += len;
            cursor = end;
        }

        let mut free = IntervalSet::window(minute(0), minute(WINDOW_MIN));
        for (start, end) in blocks {
            free.subtract(minute(start), minute(end));
        }
        prop_assert_eq!(free.total_free_minutes(), WINDOW_MIN - busy_total);
    }

    #[test]
    fn first_fit_is_long_enough_and_earliest(
        cuts in prop::collection::vec((0i64..WINDOW_MIN, 1i64..180), 0..12),
        want in 1i64..300
    ) {
        let mut free = IntervalSet::window(minute(0), minute(WINDOW_MIN));
        for (start, len) in cuts {
            free.subtract(minute(start), minute(start + len));
        }
        match free.first_fit(want) {
            Some(slot) => {
                prop_assert!(slot.duration_minutes() >= want);
                // Every earlier interval is too short.
                for iv in free.intervals() {
                    if iv.start() < slot.start() {
                        prop_assert!(iv.duration_minutes() < want);
                    }
                }
            }
            None => {
                for iv in free.intervals() {
                    prop_assert!(iv.duration_minutes() < want);
                }
            }
        }
    }

    #[test]
    fn placing_a_chunk_never_goes_negative(
        cuts in prop::collection::vec((0i64..WINDOW_MIN, 1i64..180), 0..8),
        want in 1i64..240
    ) {
        let mut free = IntervalSet::window(minute(0), minute(WINDOW_MIN));
        for (start, len) in cuts {
            free.subtract(minute(start), minute(start + len));
        }
        let before = free.total_free_minutes();
        if let Some(slot) = free.first_fit(want) {
            free.subtract(slot.start(), slot.start() + Duration::minutes(want));
            prop_assert_eq!(free.total_free_minutes(), before - want);
            for iv in free.intervals() {
                prop_assert!(iv.duration_minutes() > 0);
            }
        }
    }
}
