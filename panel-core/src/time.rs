//! Monotonic millisecond timestamps shared by all controller targets.

use core::ops::Add;

/// Monotonic timestamp in milliseconds since boot.
///
/// Target crates convert their native clocks at the boundary; the core only
/// compares and subtracts these values, so the underlying clock merely has to
/// be non-decreasing across ticks.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Millis(u64);

impl Millis {
    /// Timestamp at boot.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw millisecond count.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw millisecond count.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub const fn elapsed_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for Millis {
    type Output = Self;

    fn add(self, millis: u64) -> Self::Output {
        Self(self.0 + millis)
    }
}
