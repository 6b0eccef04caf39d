//! Embassy runtime wiring for the glow panel firmware.

use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_sync::channel::Channel;

use crate::hw::sensors::AdcSensorBank;
use crate::panel::{self, EventQueue, driver::HardwareLampDriver};

mod log_task;
mod tick_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

pub(super) static EVENT_QUEUE: EventQueue = Channel::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let hal::Peripherals {
        PA0,
        PA1,
        PA4,
        PA5,
        PA6,
        PB0,
        PB1,
        PB2,
        PB3,
        PB4,
        ADC1,
        ..
    } = hal::init(config);

    let sensors = AdcSensorBank::new(
        Adc::new(ADC1),
        [
            PA0.degrade_adc(),
            PA1.degrade_adc(),
            PA4.degrade_adc(),
            PA5.degrade_adc(),
            PA6.degrade_adc(),
        ],
    );

    let driver = HardwareLampDriver::new([
        Output::new(PB0, Level::Low, Speed::Low),
        Output::new(PB1, Level::Low, Speed::Low),
        Output::new(PB2, Level::Low, Speed::Low),
        Output::new(PB3, Level::Low, Speed::Low),
        Output::new(PB4, Level::Low, Speed::Low),
    ]);

    let controller = panel::PanelController::new(panel::board_config())
        .expect("panel configuration must validate at startup");

    spawner
        .spawn(tick_task::run(
            controller,
            sensors,
            driver,
            EVENT_QUEUE.sender(),
        ))
        .expect("failed to spawn tick task");

    spawner
        .spawn(log_task::run(EVENT_QUEUE.receiver()))
        .expect("failed to spawn event log task");

    core::future::pending::<()>().await;
}
