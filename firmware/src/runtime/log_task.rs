use defmt::info;
use panel_core::event::PanelEventKind;

use crate::panel::EventReceiver;

/// Logs transition events off the tick path.
#[embassy_executor::task]
pub async fn run(events: EventReceiver<'static>) -> ! {
    loop {
        let event = events.receive().await;
        let at_ms = event.at.as_u64();
        match event.kind {
            PanelEventKind::LampOn(channel) => {
                info!("lamp {=usize} on at {=u64} ms", channel, at_ms);
            }
            PanelEventKind::LampOff(channel) => {
                info!("lamp {=usize} off at {=u64} ms", channel, at_ms);
            }
            PanelEventKind::GestureReset => {
                info!("gesture matched, panel reset at {=u64} ms", at_ms);
            }
        }
    }
}
