//! Transition events surfaced to targets for logging and diagnostics.
//!
//! The core never logs; it reports transitions through these events and the
//! embedding target decides what to do with them. Raw codes keep the events
//! cheap to mirror into atomics or push over a diagnostics channel.

use core::fmt;

use crate::time::Millis;

/// Discriminated panel events shared across all targets.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PanelEventKind {
    /// A lamp activated on a sensor deviation.
    LampOn(usize),
    /// A lamp switched off after its on-duration expired.
    LampOff(usize),
    /// The activation-order gesture matched and the panel was reset.
    GestureReset,
}

impl PanelEventKind {
    const LAMP_ON_BASE: u16 = 0x0000;
    const LAMP_OFF_BASE: u16 = 0x0100;
    const GESTURE_RESET_CODE: u16 = 0x0200;

    /// Encodes the event into a compact transport-friendly discriminant.
    ///
    /// Channel indices above 255 fold into the base code; boards this crate
    /// targets have single-digit channel counts.
    #[must_use]
    pub fn to_raw(self) -> u16 {
        match self {
            PanelEventKind::LampOn(channel) => {
                Self::LAMP_ON_BASE + u16::try_from(channel).unwrap_or(0) % 0x100
            }
            PanelEventKind::LampOff(channel) => {
                Self::LAMP_OFF_BASE + u16::try_from(channel).unwrap_or(0) % 0x100
            }
            PanelEventKind::GestureReset => Self::GESTURE_RESET_CODE,
        }
    }

    /// Decodes a raw discriminant, returning `None` for unknown codes.
    #[must_use]
    pub fn from_raw(code: u16) -> Option<Self> {
        match code {
            Self::GESTURE_RESET_CODE => Some(PanelEventKind::GestureReset),
            code if code < Self::LAMP_OFF_BASE => {
                Some(PanelEventKind::LampOn(usize::from(code)))
            }
            code if code < Self::GESTURE_RESET_CODE => Some(PanelEventKind::LampOff(
                usize::from(code - Self::LAMP_OFF_BASE),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for PanelEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelEventKind::LampOn(channel) => write!(f, "lamp-on {channel}"),
            PanelEventKind::LampOff(channel) => write!(f, "lamp-off {channel}"),
            PanelEventKind::GestureReset => f.write_str("gesture-reset"),
        }
    }
}

/// Event paired with the tick timestamp that produced it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PanelEvent {
    pub kind: PanelEventKind,
    pub at: Millis,
}

impl PanelEvent {
    /// Creates a new event stamped with its tick time.
    #[must_use]
    pub const fn new(kind: PanelEventKind, at: Millis) -> Self {
        Self { kind, at }
    }
}
