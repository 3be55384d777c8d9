use thiserror::Error;

/// Rejected engine parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The coverage cap `n` must be at least one.
    #[error("coverage cap must be positive")]
    ZeroCap,
    /// The window width `s` must be at least one.
    #[error("window width must be positive")]
    ZeroWidth,
}

/// A broken structural invariant of the coverage map.
///
/// Reported by [`CheckedWindow`](crate::CheckedWindow) after a call; any of these means the
/// update algorithm is wrong, not that the caller misused the engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("coverage map is empty")]
    Empty,
    #[error("leading run at {key} is saturated (count {count}, cap {cap})")]
    LeadingSaturated { key: i64, count: u32, cap: u32 },
    #[error("run at {key} has count {count} above cap {cap}")]
    CountOutOfRange { key: i64, count: u32, cap: u32 },
    #[error("breakpoint at {key} repeats count {count} of its predecessor at {prev}")]
    RedundantBreakpoint { prev: i64, key: i64, count: u32 },
    #[error("tail run at {key} has count {count}, expected 0")]
    NonZeroTail { key: i64, count: u32 },
    #[error("window moved backwards from {before} to {after}")]
    WindowRegressed { before: i64, after: i64 },
}
