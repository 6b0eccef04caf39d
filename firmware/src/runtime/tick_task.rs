use embassy_time::{Duration, Ticker};
use panel_core::controller::TickOutcome;
use panel_core::event::PanelEventKind;

use crate::hw::sensors::AdcSensorBank;
use crate::panel::{EventSender, PanelController, driver::HardwareLampDriver, now_millis};
use crate::status;

/// Drives the whole control cycle at the configured tick interval.
///
/// The ticker paces invocations and the controller enforces its own minimum
/// interval on top, so a jittery wakeup cannot sneak in an early tick.
#[embassy_executor::task]
pub async fn run(
    mut controller: PanelController,
    mut sensors: AdcSensorBank<'static>,
    mut driver: HardwareLampDriver<'static>,
    events: EventSender<'static>,
) -> ! {
    let interval_ms = controller.config().min_tick_interval_ms;
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms));

    loop {
        ticker.next().await;

        match controller.tick(now_millis(), &mut sensors, &mut driver) {
            TickOutcome::Skipped => {}
            TickOutcome::Warmup => status::record_tick(),
            TickOutcome::Ran(report) => {
                status::record_tick();
                for event in &report.events {
                    status::record_event(event.kind);
                    match event.kind {
                        PanelEventKind::LampOn(channel) => status::set_lamp(channel, true),
                        PanelEventKind::LampOff(channel) => status::set_lamp(channel, false),
                        PanelEventKind::GestureReset => status::clear_lamps(),
                    }
                    // Drop events rather than stall the tick when the log
                    // task falls behind.
                    let _ = events.try_send(*event);
                }
            }
        }
    }
}
