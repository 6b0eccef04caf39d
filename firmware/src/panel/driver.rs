//! GPIO lamp driver for the reference board.

use embassy_stm32::gpio::Output;
use panel_core::controller::LampDriver;

use super::CHANNELS;

/// Push-pull outputs driving the five indicator lamps.
pub struct HardwareLampDriver<'d> {
    lamps: [Output<'d>; CHANNELS],
}

impl<'d> HardwareLampDriver<'d> {
    /// Takes ownership of the configured lamp pins, channel order matching
    /// the sensor bank.
    pub fn new(lamps: [Output<'d>; CHANNELS]) -> Self {
        Self { lamps }
    }
}

impl<'d> LampDriver for HardwareLampDriver<'d> {
    fn set_output(&mut self, channel: usize, on: bool) {
        if let Some(lamp) = self.lamps.get_mut(channel) {
            if on {
                lamp.set_high();
            } else {
                lamp.set_low();
            }
        }
    }

    fn all_off(&mut self) {
        for lamp in &mut self.lamps {
            lamp.set_low();
        }
    }
}
