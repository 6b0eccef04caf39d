//! ADC sampling for the five proximity sensors.
//!
//! Wraps the Embassy ADC driver behind the `SensorReader` capability so the
//! portable controller never touches MCU registers directly.

use embassy_stm32::adc::{Adc, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;
use panel_core::controller::SensorReader;

use crate::panel::CHANNELS;

/// Embassy ADC wrapper producing one sample per channel per tick.
pub struct AdcSensorBank<'d> {
    adc: Adc<'d, ADC1>,
    inputs: [AnyAdcChannel<ADC1>; CHANNELS],
    discard_next: bool,
}

impl<'d> AdcSensorBank<'d> {
    /// Configures the ADC and takes ownership of the per-channel inputs.
    pub fn new(mut adc: Adc<'d, ADC1>, inputs: [AnyAdcChannel<ADC1>; CHANNELS]) -> Self {
        adc.set_sample_time(SampleTime::CYCLES160_5);
        Self {
            adc,
            inputs,
            discard_next: true,
        }
    }
}

impl<'d> SensorReader for AdcSensorBank<'d> {
    fn read_sample(&mut self, channel: usize) -> i32 {
        // The first conversion after enabling the ADC is unreliable on this
        // part; throw it away.
        if self.discard_next {
            let _ = self.adc.blocking_read(&mut self.inputs[0]);
            self.discard_next = false;
        }

        i32::from(self.adc.blocking_read(&mut self.inputs[channel]))
    }
}
