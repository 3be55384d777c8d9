use crate::error::ConfigError;

/// Construction parameters of a [`CoverageWindow`](crate::CoverageWindow).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowConfig {
    /// Coverage cap `n`: a position is saturated once it has been covered this many times.
    pub cap: u32,
    /// Width `s` of the active window.
    pub width: u64,
}

impl WindowConfig {
    pub fn new(cap: u32, width: u64) -> Self {
        Self { cap, width }
    }

    /// Checks that both parameters are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cap == 0 {
            return Err(ConfigError::ZeroCap);
        }
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(())
    }
}
