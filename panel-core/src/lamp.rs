//! Per-channel lamp state machine: a sensor deviation arms it, a timer
//! clears it.

use crate::time::Millis;

/// Observable state of one lamp.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LampState {
    /// Output deasserted; no timer running.
    #[default]
    Off,
    /// Output asserted since the recorded tick time.
    On {
        /// Tick timestamp at which the lamp activated.
        since: Millis,
    },
}

impl LampState {
    /// Returns `true` when the lamp is lit.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, LampState::On { .. })
    }

    /// Activation timestamp, when lit.
    #[must_use]
    pub const fn activated_at(self) -> Option<Millis> {
        match self {
            LampState::Off => None,
            LampState::On { since } => Some(since),
        }
    }
}

/// Transition reported by [`Lamp::evaluate`].
///
/// The caller drives the physical output on every transition; a lamp never
/// touches hardware itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LampTransition {
    /// The deviation reached the threshold; assert the output.
    Activated,
    /// The on-duration expired; deassert the output.
    TimedOut,
}

/// One channel's debounce-style timing state machine.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Lamp {
    state: LampState,
}

impl Lamp {
    /// Creates a lamp in the `Off` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LampState::Off,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> LampState {
        self.state
    }

    /// Runs one tick of the state machine.
    ///
    /// From `Off`, a deviation of at least `threshold` activates the lamp
    /// and records `now` as the activation time. From `On`, only the timer
    /// matters: further deviations are ignored until the lamp has returned
    /// to `Off`, and expiry requires strictly more than `on_duration_ms` to
    /// have elapsed.
    pub fn evaluate(
        &mut self,
        delta: i32,
        now: Millis,
        threshold: i32,
        on_duration_ms: u64,
    ) -> Option<LampTransition> {
        match self.state {
            LampState::Off if delta >= threshold => {
                self.state = LampState::On { since: now };
                Some(LampTransition::Activated)
            }
            LampState::Off => None,
            LampState::On { since } if now.elapsed_since(since) > on_duration_ms => {
                self.state = LampState::Off;
                Some(LampTransition::TimedOut)
            }
            LampState::On { .. } => None,
        }
    }

    /// Forces the lamp off without reporting a transition.
    ///
    /// Used by the gesture reset, which drives all outputs in one call.
    pub fn force_off(&mut self) {
        self.state = LampState::Off;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: i32 = 4;
    const ON_DURATION_MS: u64 = 30_000;

    fn step(lamp: &mut Lamp, delta: i32, at: u64) -> Option<LampTransition> {
        lamp.evaluate(delta, Millis::new(at), THRESHOLD, ON_DURATION_MS)
    }

    #[test]
    fn delta_equal_to_threshold_activates() {
        let mut lamp = Lamp::new();
        assert_eq!(step(&mut lamp, THRESHOLD, 100), Some(LampTransition::Activated));
        assert_eq!(lamp.state(), LampState::On { since: Millis::new(100) });
    }

    #[test]
    fn delta_below_threshold_does_nothing() {
        let mut lamp = Lamp::new();
        assert_eq!(step(&mut lamp, THRESHOLD - 1, 100), None);
        assert_eq!(lamp.state(), LampState::Off);
    }

    #[test]
    fn lamp_cannot_rearm_while_on() {
        let mut lamp = Lamp::new();
        let _ = step(&mut lamp, 50, 100);
        assert_eq!(step(&mut lamp, 50, 200), None);
        assert_eq!(lamp.state().activated_at(), Some(Millis::new(100)));
    }

    #[test]
    fn timer_expires_strictly_after_on_duration() {
        let mut lamp = Lamp::new();
        let _ = step(&mut lamp, 50, 1_000);
        assert_eq!(step(&mut lamp, 0, 1_000 + ON_DURATION_MS), None);
        assert_eq!(
            step(&mut lamp, 0, 1_000 + ON_DURATION_MS + 1),
            Some(LampTransition::TimedOut)
        );
        assert_eq!(lamp.state(), LampState::Off);
    }

    #[test]
    fn force_off_clears_without_transition() {
        let mut lamp = Lamp::new();
        let _ = step(&mut lamp, 50, 100);
        lamp.force_off();
        assert_eq!(lamp.state(), LampState::Off);
        // Off again, so a fresh deviation re-arms normally.
        assert_eq!(step(&mut lamp, 50, 300), Some(LampTransition::Activated));
    }
}
