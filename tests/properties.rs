//! Property tests for the coverage window.
//!
//! - Structural invariants hold after every request
//! - The window start never moves backwards
//! - Empty requests and requests past the window change nothing
//! - Coverage at any position equals min(times covered while eligible, cap)

use coverage_window::{CheckedWindow, CoverageWindow};
use proptest::prelude::*;

fn requests() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((-20i64..200, -5i64..40), 1..120)
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_request(
        cap in 1u32..6,
        width in 1u64..64,
        reqs in requests(),
    ) {
        let mut checked = CheckedWindow::new(cap, width);
        let mut last_lo = checked.lowest_unsaturated();
        for (start, count) in reqs {
            prop_assert!(checked.apply(start, count).is_ok());
            let (lo, hi) = checked.active_window();
            prop_assert!(lo >= last_lo);
            prop_assert_eq!(hi, lo + width as i64 - 1);
            last_lo = lo;
        }
    }

    #[test]
    fn prop_noop_requests_leave_state_untouched(
        cap in 1u32..6,
        width in 1u64..64,
        reqs in requests(),
        start in -50i64..400,
        past in 0i64..100,
        count in 1i64..50,
    ) {
        let mut window = CoverageWindow::new(cap, width);
        for (s, c) in reqs {
            window.apply(s, c);
        }
        let before: Vec<_> = window.breakpoints().collect();
        let (_, hi) = window.active_window();

        window.apply(start, 0);
        window.apply(start, -count);
        window.apply(hi + 1 + past, count);

        prop_assert_eq!(window.breakpoints().collect::<Vec<_>>(), before);
    }

    #[test]
    fn prop_matches_naive_counts(
        cap in 1u32..5,
        width in 1u64..40,
        reqs in prop::collection::vec((0i64..120, 0i64..30), 1..80),
    ) {
        let mut window = CoverageWindow::new(cap, width);
        let mut counts = vec![0u32; 256];
        let mut lo = 0i64;
        for (start, count) in reqs {
            window.apply(start, count);
            let end = (start + count).min(lo + width as i64);
            for pos in start.max(lo)..end {
                let slot = &mut counts[pos as usize];
                *slot = (*slot + 1).min(cap);
            }
            while counts[lo as usize] == cap {
                lo += 1;
            }
        }
        prop_assert_eq!(window.lowest_unsaturated(), lo);
        for pos in lo..lo + width as i64 {
            prop_assert_eq!(window.coverage_at(pos), counts[pos as usize]);
        }
    }
}
