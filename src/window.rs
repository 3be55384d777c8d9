//! Coverage window engine backed by a run-length compressed step function.
//!
//! The engine stores one breakpoint per run of equal coverage rather than one counter per
//! position. Every update touches only the breakpoints inside the request, and saturated
//! positions at the front are discarded as the window slides forward.

use tracing::{debug, trace};

use crate::config::WindowConfig;
use crate::error::ConfigError;
use crate::runs::{self, RunMap};

/// A maximal span of positions sharing one coverage count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    /// First position of the run.
    pub start: i64,
    /// First position past the run, or `None` for the unbounded tail.
    pub end: Option<i64>,
    /// Coverage count shared by every position in the run.
    pub count: u32,
}

/// Sliding-window, capped coverage counter over integer positions.
///
/// Every position starts with coverage `0`. [`apply`](Self::apply) bumps the coverage of a
/// span of positions by one, capped at [`cap`](Self::cap). Only the
/// [`width`](Self::width) positions starting at the lowest unsaturated position are eligible;
/// once the leading positions saturate, the window slides past them and they are forgotten.
///
/// Instances are independent owned values. Share one across threads behind a lock.
#[derive(Clone, Debug)]
pub struct CoverageWindow {
    cap: u32,
    width: u64,
    pub(crate) runs: RunMap,
}

impl CoverageWindow {
    /// Creates an engine with coverage cap `cap` and window width `width`.
    ///
    /// Both must be positive. Use [`from_config`](Self::from_config) to get an error instead
    /// of a panic.
    pub fn new(cap: u32, width: u64) -> Self {
        assert!(cap > 0, "coverage cap must be positive");
        assert!(width > 0, "window width must be positive");
        Self {
            cap,
            width,
            runs: RunMap::from([(0, 0)]),
        }
    }

    /// Creates an engine from validated parameters.
    pub fn from_config(config: WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.cap, config.width))
    }

    /// Returns the coverage cap `n`.
    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Returns the window width `s`.
    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn config(&self) -> WindowConfig {
        WindowConfig::new(self.cap, self.width)
    }

    /// Returns the lowest position whose coverage is still below the cap.
    pub fn lowest_unsaturated(&self) -> i64 {
        self.runs.first_key_value().map_or(0, |(&key, _)| key)
    }

    /// Returns the inclusive bounds `(h, h + s - 1)` of the active window.
    ///
    /// The upper bound saturates at `i64::MAX`.
    pub fn active_window(&self) -> (i64, i64) {
        let lo = self.lowest_unsaturated();
        (lo, self.window_end(lo).saturating_sub(1))
    }

    /// Covers every position of `[start, start + count)` inside the active window once more.
    ///
    /// The window is read once at the top of the call. Positions before it are already
    /// saturated and positions past it are not eligible, so both are dropped from the request.
    /// A non-positive `count` or a request starting past the window is ignored.
    pub fn apply(&mut self, start: i64, count: i64) {
        let lo = self.lowest_unsaturated();
        let window_end = self.window_end(lo);
        if count <= 0 || start >= window_end {
            trace!(start, count, lo, "request outside active window ignored");
            return;
        }

        let from = start.max(lo);
        let to = start.saturating_add(count).min(window_end);
        if to <= from {
            trace!(start, count, lo, "request ends before active window");
            return;
        }

        // Positions from `to` on keep the coverage they have now.
        let resume = runs::value_at(&self.runs, to).unwrap_or(0);

        runs::split_at(&mut self.runs, from);
        runs::bump_range(&mut self.runs, from, to, self.cap);
        self.runs.entry(to).or_insert(resume);
        runs::merge_equal_neighbors(&mut self.runs, from, to);

        if runs::drop_saturated_prefix(&mut self.runs, self.cap) > 0 {
            debug!(from = lo, to = self.lowest_unsaturated(), "active window advanced");
        }
    }

    /// Applies a request whose length is the number of `items`.
    ///
    /// The items themselves are never inspected.
    pub fn apply_items<I>(&mut self, start: i64, items: I)
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        let len = items.into_iter().len();
        self.apply(start, i64::try_from(len).unwrap_or(i64::MAX));
    }

    /// Returns the coverage of `pos`.
    ///
    /// Positions before the window have been discarded as saturated and report the cap.
    pub fn coverage_at(&self, pos: i64) -> u32 {
        runs::value_at(&self.runs, pos).unwrap_or(self.cap)
    }

    /// Returns whether `pos` has reached the cap.
    pub fn is_saturated(&self, pos: i64) -> bool {
        self.coverage_at(pos) >= self.cap
    }

    /// Iterates the runs of the tracked range in increasing order.
    ///
    /// The last run is the zero-coverage tail and has no end.
    pub fn runs(&self) -> impl Iterator<Item = Run> + '_ {
        let mut iter = self.runs.iter().peekable();
        std::iter::from_fn(move || {
            let (&start, &count) = iter.next()?;
            let end = iter.peek().map(|&(&next, _)| next);
            Some(Run { start, end, count })
        })
    }

    /// Iterates the raw `(position, count)` breakpoints.
    pub fn breakpoints(&self) -> impl Iterator<Item = (i64, u32)> + '_ {
        self.runs.iter().map(|(&key, &count)| (key, count))
    }

    /// Number of stored breakpoints.
    pub fn breakpoint_count(&self) -> usize {
        self.runs.len()
    }

    fn window_end(&self, lo: i64) -> i64 {
        let width = i64::try_from(self.width).unwrap_or(i64::MAX);
        lo.saturating_add(width)
    }
}
