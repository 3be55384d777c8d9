//! Validating wrapper that re-checks the coverage map after every update.

use std::ops::Deref;

use tracing::warn;

use crate::config::WindowConfig;
use crate::error::{ConfigError, InvariantViolation};
use crate::window::CoverageWindow;

/// Checks the structural invariants of `window`'s coverage map.
///
/// The map must be non-empty, its leading run below the cap, every count within `[0, cap]`,
/// no two consecutive breakpoints equal, and the tail run at zero.
pub fn check_invariants(window: &CoverageWindow) -> Result<(), InvariantViolation> {
    let cap = window.cap();
    let mut breakpoints = window.breakpoints();

    let Some((first, first_count)) = breakpoints.next() else {
        return Err(InvariantViolation::Empty);
    };
    if first_count > cap {
        return Err(InvariantViolation::CountOutOfRange {
            key: first,
            count: first_count,
            cap,
        });
    }
    if first_count == cap {
        return Err(InvariantViolation::LeadingSaturated {
            key: first,
            count: first_count,
            cap,
        });
    }

    let (mut prev, mut prev_count) = (first, first_count);
    for (key, count) in breakpoints {
        if count > cap {
            return Err(InvariantViolation::CountOutOfRange { key, count, cap });
        }
        if count == prev_count {
            return Err(InvariantViolation::RedundantBreakpoint { prev, key, count });
        }
        prev = key;
        prev_count = count;
    }

    if prev_count != 0 {
        return Err(InvariantViolation::NonZeroTail {
            key: prev,
            count: prev_count,
        });
    }
    Ok(())
}

/// [`CoverageWindow`] that validates its state after every update.
///
/// Read-only queries are reachable through `Deref`. Updates return the first invariant
/// found broken, which always points at a defect in the engine.
#[derive(Clone, Debug)]
pub struct CheckedWindow {
    inner: CoverageWindow,
    last_lo: i64,
}

impl CheckedWindow {
    pub fn new(cap: u32, width: u64) -> Self {
        let inner = CoverageWindow::new(cap, width);
        let last_lo = inner.lowest_unsaturated();
        Self { inner, last_lo }
    }

    pub fn from_config(config: WindowConfig) -> Result<Self, ConfigError> {
        let inner = CoverageWindow::from_config(config)?;
        let last_lo = inner.lowest_unsaturated();
        Ok(Self { inner, last_lo })
    }

    /// Wraps an existing engine after validating it.
    pub fn wrap(inner: CoverageWindow) -> Result<Self, InvariantViolation> {
        check_invariants(&inner)?;
        let last_lo = inner.lowest_unsaturated();
        Ok(Self { inner, last_lo })
    }

    pub fn apply(&mut self, start: i64, count: i64) -> Result<(), InvariantViolation> {
        self.inner.apply(start, count);
        self.verify()
    }

    pub fn apply_items<I>(&mut self, start: i64, items: I) -> Result<(), InvariantViolation>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        self.inner.apply_items(start, items);
        self.verify()
    }

    pub fn inner(&self) -> &CoverageWindow {
        &self.inner
    }

    pub fn into_inner(self) -> CoverageWindow {
        self.inner
    }

    fn verify(&mut self) -> Result<(), InvariantViolation> {
        let lo = self.inner.lowest_unsaturated();
        let result = if lo < self.last_lo {
            Err(InvariantViolation::WindowRegressed {
                before: self.last_lo,
                after: lo,
            })
        } else {
            check_invariants(&self.inner)
        };
        match result {
            Ok(()) => {
                self.last_lo = lo;
                Ok(())
            }
            Err(violation) => {
                warn!(%violation, "coverage map invariant broken");
                Err(violation)
            }
        }
    }
}

impl Deref for CheckedWindow {
    type Target = CoverageWindow;

    fn deref(&self) -> &CoverageWindow {
        &self.inner
    }
}
