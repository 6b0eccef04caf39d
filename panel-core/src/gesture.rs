//! Detects the all-lamps activation-order gesture that resets the panel.
//!
//! The check only runs once every lamp is lit; until then no activation
//! timestamp is defined for some channel and the ordering comparison would
//! be meaningless. That precondition is part of the contract, not an
//! optimization.

use crate::lamp::LampState;
use crate::time::Millis;

/// Outcome of a gesture evaluation at a tick boundary.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GestureVerdict {
    /// At least one lamp is off; no ordering check was performed.
    Idle,
    /// Every lamp is on, but the activation times violate the table.
    OrderMismatch,
    /// Every lamp is on and activations followed the configured order.
    Matched,
}

/// Immutable activation-order table, loaded once at startup.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GestureDetector<const N: usize> {
    order: [usize; N],
}

impl<const N: usize> GestureDetector<N> {
    /// Builds a detector over a permutation of channel indices.
    ///
    /// The permutation is validated by `PanelConfig::validate` before the
    /// controller constructs the detector.
    #[must_use]
    pub const fn new(order: [usize; N]) -> Self {
        Self { order }
    }

    /// The configured activation order.
    #[must_use]
    pub const fn order(&self) -> &[usize; N] {
        &self.order
    }

    /// Walks the table and compares activation timestamps.
    ///
    /// Timestamps read along the permutation must be non-decreasing; ties
    /// are allowed, so channels activated in the same tick still match.
    #[must_use]
    pub fn evaluate(&self, lamps: &[LampState; N]) -> GestureVerdict {
        let mut previous: Option<Millis> = None;
        for &channel in &self.order {
            let Some(activated_at) = lamps[channel].activated_at() else {
                return GestureVerdict::Idle;
            };
            if let Some(previous) = previous
                && activated_at < previous
            {
                return GestureVerdict::OrderMismatch;
            }
            previous = Some(activated_at);
        }
        GestureVerdict::Matched
    }
}
