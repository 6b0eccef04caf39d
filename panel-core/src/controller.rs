//! Tick-driven controller tying sensors, filters, lamps, and the gesture
//! check together.
//!
//! One logical tick runs to completion before the next may begin: read all
//! sensors, update all filters, evaluate every lamp transition, then run the
//! gesture check. Nothing suspends mid-tick and the shared filter cursor is
//! mutated exactly once per completed tick, so no locking is needed anywhere
//! in this crate.

use heapless::Vec;

use crate::config::{ConfigError, PanelConfig};
use crate::event::{PanelEvent, PanelEventKind};
use crate::filter::FilterBank;
use crate::gesture::{GestureDetector, GestureVerdict};
use crate::lamp::{Lamp, LampState, LampTransition};
use crate::time::Millis;

/// Upper bound on events one tick can emit: one transition per channel plus
/// a gesture reset. Sized for the boards this crate targets.
pub const MAX_TICK_EVENTS: usize = 16;

/// Reads one raw sensor sample per channel per tick.
///
/// Reads always succeed: a disconnected sensor yields whatever the hardware
/// floor produces and the filter simply incorporates it.
pub trait SensorReader {
    /// Returns the current raw sample for `channel`.
    fn read_sample(&mut self, channel: usize) -> i32;
}

/// Drives the physical indicator outputs.
pub trait LampDriver {
    /// Asserts or deasserts the output for `channel`.
    fn set_output(&mut self, channel: usize, on: bool);

    /// Deasserts every output. Used by the gesture reset so the whole panel
    /// goes dark in the same tick.
    fn all_off(&mut self);
}

/// Lamp driver that performs no hardware interaction.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopLampDriver;

impl NoopLampDriver {
    /// Creates a new no-op lamp driver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LampDriver for NoopLampDriver {
    fn set_output(&mut self, _: usize, _: bool) {}

    fn all_off(&mut self) {}
}

/// Events and gesture verdict produced by one completed tick.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickReport {
    /// Transitions applied this tick, in channel order, reset last.
    pub events: Vec<PanelEvent, MAX_TICK_EVENTS>,
    /// Outcome of the gesture check run after the transitions.
    pub gesture: GestureVerdict,
}

/// Outcome of a single controller tick.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// Less than the minimum interval elapsed since the previous tick
    /// started; no sensor was read and no state changed.
    Skipped,
    /// Filters were updated but transitions are still suppressed while the
    /// moving average stabilizes.
    Warmup,
    /// A full tick ran: filters, lamp decisions, gesture check.
    Ran(TickReport),
}

/// Owns all mutable panel state and applies the per-tick control cycle.
pub struct Controller<const N: usize, const K: usize> {
    config: PanelConfig<N>,
    filters: FilterBank<N, K>,
    lamps: [Lamp; N],
    detector: GestureDetector<N>,
    warmup_remaining: u32,
    last_tick_started_at: Option<Millis>,
}

impl<const N: usize, const K: usize> Controller<N, K> {
    /// Validates the configuration and builds an idle controller.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the window is zero or the
    /// configuration fails [`PanelConfig::validate`]. A mismatch here is a
    /// programming error, so callers should refuse to start.
    pub fn new(config: PanelConfig<N>) -> Result<Self, ConfigError> {
        if K == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        config.validate()?;

        Ok(Self {
            filters: FilterBank::new(),
            lamps: [Lamp::new(); N],
            detector: GestureDetector::new(config.gesture_order),
            warmup_remaining: config.startup_cycles,
            last_tick_started_at: None,
            config,
        })
    }

    /// The configuration this controller was built with.
    #[must_use]
    pub const fn config(&self) -> &PanelConfig<N> {
        &self.config
    }

    /// Tick-aligned snapshot of every lamp state.
    #[must_use]
    pub fn lamp_states(&self) -> [LampState; N] {
        core::array::from_fn(|channel| self.lamps[channel].state())
    }

    /// Returns `true` while startup cycles are still suppressing transitions.
    #[must_use]
    pub const fn is_warming_up(&self) -> bool {
        self.warmup_remaining > 0
    }

    /// Read-only view of the filter bank.
    #[must_use]
    pub const fn filters(&self) -> &FilterBank<N, K> {
        &self.filters
    }

    /// Runs one control cycle at `now`.
    ///
    /// Ticks arriving sooner than the minimum interval after the previous
    /// tick start are skipped entirely: not queued, not accumulated, and
    /// they leave the gate timer untouched.
    pub fn tick<S, D>(&mut self, now: Millis, sensors: &mut S, driver: &mut D) -> TickOutcome
    where
        S: SensorReader,
        D: LampDriver,
    {
        if let Some(last) = self.last_tick_started_at
            && now.elapsed_since(last) < self.config.min_tick_interval_ms
        {
            return TickOutcome::Skipped;
        }
        self.last_tick_started_at = Some(now);

        for channel in 0..N {
            let sample = sensors.read_sample(channel);
            self.filters.record(channel, sample);
        }
        // One cursor move for all channels keeps the windows time-aligned.
        self.filters.advance();

        if self.warmup_remaining > 0 {
            self.warmup_remaining -= 1;
            return TickOutcome::Warmup;
        }

        let mut events: Vec<PanelEvent, MAX_TICK_EVENTS> = Vec::new();
        for channel in 0..N {
            let delta =
                (self.filters.average(channel) - self.filters.last_raw(channel)).abs();
            let transition = self.lamps[channel].evaluate(
                delta,
                now,
                self.config.threshold,
                self.config.on_duration_ms,
            );
            match transition {
                Some(LampTransition::Activated) => {
                    driver.set_output(channel, true);
                    let _ = events.push(PanelEvent::new(PanelEventKind::LampOn(channel), now));
                }
                Some(LampTransition::TimedOut) => {
                    driver.set_output(channel, false);
                    let _ = events.push(PanelEvent::new(PanelEventKind::LampOff(channel), now));
                }
                None => {}
            }
        }

        let gesture = self.detector.evaluate(&self.lamp_states());
        if gesture == GestureVerdict::Matched {
            for lamp in &mut self.lamps {
                lamp.force_off();
            }
            driver.all_off();
            let _ = events.push(PanelEvent::new(PanelEventKind::GestureReset, now));
        }

        TickOutcome::Ran(TickReport { events, gesture })
    }
}
