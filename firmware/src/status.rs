#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! Shared status storage for the firmware target.
//!
//! Lightweight atomics mirror lamp state and tick progress so diagnostics
//! can snapshot the controller without touching shared mutable state.

use panel_core::event::PanelEventKind;
use portable_atomic::{AtomicU8, AtomicU16, AtomicU32, Ordering};

/// Bitmask of currently lit lamps (bit n == channel n).
static LAMP_MASK: AtomicU8 = AtomicU8::new(0);
/// Number of completed (non-skipped) ticks, wrapping.
static TICK_COUNT: AtomicU32 = AtomicU32::new(0);
/// Raw code of the most recent event, stored +1 (0 == none yet).
static LAST_EVENT: AtomicU16 = AtomicU16::new(0);

fn bit_for(channel: usize) -> u8 {
    1u8.checked_shl(u32::try_from(channel).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Records one lamp's output level.
pub fn set_lamp(channel: usize, on: bool) {
    if on {
        LAMP_MASK.fetch_or(bit_for(channel), Ordering::Relaxed);
    } else {
        LAMP_MASK.fetch_and(!bit_for(channel), Ordering::Relaxed);
    }
}

/// Clears every lamp bit in one store (gesture reset path).
pub fn clear_lamps() {
    LAMP_MASK.store(0, Ordering::Relaxed);
}

/// Returns the current lamp bitmask.
pub fn lamp_mask() -> u8 {
    LAMP_MASK.load(Ordering::Relaxed)
}

/// Counts one completed tick.
pub fn record_tick() {
    TICK_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Returns the number of completed ticks since boot, wrapping.
pub fn tick_count() -> u32 {
    TICK_COUNT.load(Ordering::Relaxed)
}

/// Remembers the most recent transition event.
pub fn record_event(kind: PanelEventKind) {
    LAST_EVENT.store(kind.to_raw().wrapping_add(1), Ordering::Relaxed);
}

/// Returns the most recent transition event, if any happened yet.
pub fn last_event() -> Option<PanelEventKind> {
    match LAST_EVENT.load(Ordering::Relaxed) {
        0 => None,
        raw => PanelEventKind::from_raw(raw.wrapping_sub(1)),
    }
}
