#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! Glue binding `panel-core` to the Embassy runtime.
//!
//! Board constants, the event queue shared between the tick task and the
//! log task, and the clock conversion all live here so the rest of the
//! firmware never spells out channel counts or mutex flavors.

#[cfg(target_os = "none")]
pub mod driver;

#[cfg(not(target_os = "none"))]
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
#[cfg(target_os = "none")]
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use panel_core::config::PanelConfig;
use panel_core::controller::Controller;
use panel_core::event::PanelEvent;

/// Number of sensor/lamp channels wired on the board.
pub const CHANNELS: usize = 5;

/// Moving-average window per channel.
pub const WINDOW: usize = 10;

/// Depth of the event queue between the tick task and the log task.
pub const EVENT_QUEUE_DEPTH: usize = 8;

#[cfg(target_os = "none")]
type PanelMutex = ThreadModeRawMutex;
#[cfg(not(target_os = "none"))]
type PanelMutex = NoopRawMutex;

/// Queue carrying transition events from the tick task to the log task.
pub type EventQueue = Channel<PanelMutex, PanelEvent, EVENT_QUEUE_DEPTH>;

/// Convenience sender type alias for the event queue.
pub type EventSender<'a> = Sender<'a, PanelMutex, PanelEvent, EVENT_QUEUE_DEPTH>;

/// Convenience receiver type alias for the event queue.
pub type EventReceiver<'a> = Receiver<'a, PanelMutex, PanelEvent, EVENT_QUEUE_DEPTH>;

/// Controller type for this board: five channels, ten-sample windows.
pub type PanelController = Controller<CHANNELS, WINDOW>;

/// Configuration burned into this board image.
///
/// The gesture table is the identity order: sensors must be struck left to
/// right across the panel to trigger the full reset.
#[must_use]
pub const fn board_config() -> PanelConfig<CHANNELS> {
    PanelConfig::with_defaults()
}

/// Converts the Embassy monotonic clock into core timestamps.
#[cfg(target_os = "none")]
#[must_use]
pub fn now_millis() -> panel_core::time::Millis {
    panel_core::time::Millis::new(embassy_time::Instant::now().as_millis())
}
