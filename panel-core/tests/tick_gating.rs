use panel_core::config::{ConfigError, PanelConfig};
use panel_core::controller::{Controller, NoopLampDriver, SensorReader, TickOutcome};
use panel_core::time::Millis;

const CHANNELS: usize = 5;
const WINDOW: usize = 10;
const TICK_MS: u64 = 100;

struct CountingSensors {
    reads: usize,
}

impl SensorReader for CountingSensors {
    fn read_sample(&mut self, _: usize) -> i32 {
        self.reads += 1;
        0
    }
}

fn quiet_controller(startup_cycles: u32) -> Controller<CHANNELS, WINDOW> {
    let config = PanelConfig {
        min_tick_interval_ms: TICK_MS,
        startup_cycles,
        ..PanelConfig::with_defaults()
    };
    Controller::new(config).expect("test config should validate")
}

#[test]
fn early_tick_is_skipped_without_touching_sensors() {
    let mut controller = quiet_controller(0);
    let mut sensors = CountingSensors { reads: 0 };
    let mut driver = NoopLampDriver::new();

    assert!(matches!(
        controller.tick(Millis::new(100), &mut sensors, &mut driver),
        TickOutcome::Ran(_)
    ));
    assert_eq!(sensors.reads, CHANNELS);

    // 50 ms later: under the minimum interval, nothing runs.
    assert_eq!(
        controller.tick(Millis::new(150), &mut sensors, &mut driver),
        TickOutcome::Skipped
    );
    assert_eq!(sensors.reads, CHANNELS);

    assert!(matches!(
        controller.tick(Millis::new(200), &mut sensors, &mut driver),
        TickOutcome::Ran(_)
    ));
    assert_eq!(sensors.reads, 2 * CHANNELS);
}

#[test]
fn skipped_ticks_do_not_move_the_gate() {
    let mut controller = quiet_controller(0);
    let mut sensors = CountingSensors { reads: 0 };
    let mut driver = NoopLampDriver::new();

    controller.tick(Millis::new(100), &mut sensors, &mut driver);
    assert_eq!(
        controller.tick(Millis::new(160), &mut sensors, &mut driver),
        TickOutcome::Skipped
    );

    // 210 is only 50 ms after the skipped call but a full interval past the
    // last tick that actually started.
    assert!(matches!(
        controller.tick(Millis::new(210), &mut sensors, &mut driver),
        TickOutcome::Ran(_)
    ));
}

#[test]
fn the_first_ever_tick_always_runs() {
    let mut controller = quiet_controller(0);
    let mut sensors = CountingSensors { reads: 0 };
    let mut driver = NoopLampDriver::new();

    assert!(matches!(
        controller.tick(Millis::ZERO, &mut sensors, &mut driver),
        TickOutcome::Ran(_)
    ));
}

#[test]
fn skipped_ticks_do_not_consume_warmup_cycles() {
    let mut controller = quiet_controller(2);
    let mut sensors = CountingSensors { reads: 0 };
    let mut driver = NoopLampDriver::new();

    assert_eq!(
        controller.tick(Millis::new(100), &mut sensors, &mut driver),
        TickOutcome::Warmup
    );
    assert_eq!(
        controller.tick(Millis::new(150), &mut sensors, &mut driver),
        TickOutcome::Skipped
    );
    assert!(controller.is_warming_up());
    assert_eq!(
        controller.tick(Millis::new(200), &mut sensors, &mut driver),
        TickOutcome::Warmup
    );
    assert!(!controller.is_warming_up());
}

#[test]
fn controller_refuses_a_broken_gesture_table() {
    let config = PanelConfig::<CHANNELS> {
        gesture_order: [0, 1, 2, 3, 3],
        ..PanelConfig::with_defaults()
    };
    assert_eq!(
        Controller::<CHANNELS, WINDOW>::new(config).err(),
        Some(ConfigError::GestureOrderNotPermutation)
    );
}

#[test]
fn controller_refuses_a_zero_sample_window() {
    let config = PanelConfig::<CHANNELS>::with_defaults();
    assert_eq!(
        Controller::<CHANNELS, 0>::new(config).err(),
        Some(ConfigError::ZeroWindow)
    );
}
