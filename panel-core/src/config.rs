//! Build-time configuration for the panel controller.
//!
//! All values are fixed when the image is built; nothing here is reloadable
//! at runtime. `Controller::new` refuses to start on an inconsistent
//! configuration, since a bad permutation or zero-sized window is a
//! programming error rather than a runtime condition.

use core::fmt;

/// Number of sensor/lamp channels on the reference board.
pub const DEFAULT_CHANNELS: usize = 5;
/// Samples kept per channel for the moving average.
pub const DEFAULT_WINDOW: usize = 10;
/// Deviation from the moving average that activates a lamp.
pub const DEFAULT_THRESHOLD: i32 = 4;
/// How long a lamp stays lit when no gesture reset arrives.
pub const DEFAULT_ON_DURATION_MS: u64 = 30_000;
/// Minimum spacing between ticks; earlier invocations are skipped entirely.
pub const DEFAULT_MIN_TICK_INTERVAL_MS: u64 = 100;
/// Ticks spent only filling the filter before any lamp may activate.
pub const DEFAULT_STARTUP_CYCLES: u32 = 20;

/// Immutable controller configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PanelConfig<const N: usize> {
    /// Sensor deviation (absolute, against the moving average) that lights a lamp.
    pub threshold: i32,
    /// Elapsed time after which a lit lamp switches itself off.
    pub on_duration_ms: u64,
    /// Ticks arriving sooner than this after the previous tick start are skipped.
    pub min_tick_interval_ms: u64,
    /// Initial ticks during which transitions are suppressed while the
    /// moving average stabilizes.
    pub startup_cycles: u32,
    /// Permutation of channel indices giving the activation order that
    /// triggers a full panel reset.
    pub gesture_order: [usize; N],
}

impl<const N: usize> PanelConfig<N> {
    /// Reference-board defaults with the identity gesture order.
    #[must_use]
    pub const fn with_defaults() -> Self {
        let mut order = [0; N];
        let mut channel = 0;
        while channel < N {
            order[channel] = channel;
            channel += 1;
        }
        Self {
            threshold: DEFAULT_THRESHOLD,
            on_duration_ms: DEFAULT_ON_DURATION_MS,
            min_tick_interval_ms: DEFAULT_MIN_TICK_INTERVAL_MS,
            startup_cycles: DEFAULT_STARTUP_CYCLES,
            gesture_order: order,
        }
    }

    /// Checks the dimensions and the gesture table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the channel count is zero or the
    /// gesture order is not a permutation of `0..N`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if N == 0 {
            return Err(ConfigError::NoChannels);
        }

        let mut seen = [false; N];
        for &channel in &self.gesture_order {
            if channel >= N || seen[channel] {
                return Err(ConfigError::GestureOrderNotPermutation);
            }
            seen[channel] = true;
        }

        Ok(())
    }
}

impl<const N: usize> Default for PanelConfig<N> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Startup validation failures. All of these indicate a build mistake.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The controller was instantiated with zero channels.
    NoChannels,
    /// The filter window constant `K` is zero.
    ZeroWindow,
    /// The gesture table does not cover every channel exactly once.
    GestureOrderNotPermutation,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoChannels => f.write_str("channel count must be non-zero"),
            ConfigError::ZeroWindow => f.write_str("filter window must be non-zero"),
            ConfigError::GestureOrderNotPermutation => {
                f.write_str("gesture order must be a permutation of the channel indices")
            }
        }
    }
}
