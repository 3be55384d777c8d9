//! Sliding-window, capped coverage counter.
//!
//! [`CoverageWindow`] counts how many times each integer position has been covered by a
//! request, up to a cap `n`, while only tracking a window of `s` positions starting at the
//! lowest position that has not reached the cap. State is a run-length compressed step
//! function, so memory and update cost scale with the number of distinct runs rather than
//! with the window width.
//!
//! ```
//! use coverage_window::CoverageWindow;
//!
//! let mut window = CoverageWindow::new(3, 10);
//! window.apply(1, 5);
//! window.apply(1, 6);
//! window.apply(1, 7);
//! assert_eq!(window.active_window(), (0, 9));
//!
//! for _ in 0..3 {
//!     window.apply(0, 1);
//! }
//! assert_eq!(window.active_window(), (6, 15));
//! ```
//!
//! [`CheckedWindow`] wraps the engine and re-validates the compressed map after every call,
//! which is handy in tests and fuzzing.

mod checked;
mod config;
mod error;
mod runs;
mod window;

pub use checked::{CheckedWindow, check_invariants};
pub use config::WindowConfig;
pub use error::{ConfigError, InvariantViolation};
pub use window::{CoverageWindow, Run};
