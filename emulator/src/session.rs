use std::collections::VecDeque;
use std::str::SplitWhitespace;

use crossterm::style::Stylize;
use panel_core::config::PanelConfig;
use panel_core::controller::{Controller, LampDriver, SensorReader, TickOutcome};
use panel_core::event::PanelEventKind;
use panel_core::time::Millis;

const CHANNELS: usize = 5;
const WINDOW: usize = 10;

/// Quiescent sensor level fed on every tick without a queued impact.
const BASELINE: i32 = 100;

/// Default impact height above the baseline. Chosen so the pulse trips the
/// threshold on arrival but its residue in the window averages below it.
const DEFAULT_MAGNITUDE: i32 = 35;

/// Upper bound on `run`, so a typo cannot spin the session for minutes.
const MAX_RUN_TICKS: u64 = 10_000;

pub const HELP_TOPICS: &[(&str, &str)] = &[
    (
        "hit",
        "hit <channel> [magnitude]  - queue an impact on a sensor for the next tick",
    ),
    (
        "gesture",
        "gesture                    - queue impacts in the reset order, one per tick",
    ),
    (
        "run",
        "run [ticks]                - advance the clock by whole tick intervals",
    ),
    (
        "status",
        "status                     - display lamp states and filter averages",
    ),
    (
        "help",
        "help [topic]               - show help for a command",
    ),
];

/// Sensors idle at the baseline; queued values play back one per tick.
struct ScriptedSensors {
    queued: [VecDeque<i32>; CHANNELS],
}

impl ScriptedSensors {
    fn new() -> Self {
        Self {
            queued: Default::default(),
        }
    }

    /// Schedules `value` for `channel`, `offset` ticks from now.
    fn schedule(&mut self, channel: usize, offset: usize, value: i32) {
        let queue = &mut self.queued[channel];
        while queue.len() <= offset {
            queue.push_back(BASELINE);
        }
        queue[offset] = value;
    }
}

impl SensorReader for ScriptedSensors {
    fn read_sample(&mut self, channel: usize) -> i32 {
        self.queued[channel].pop_front().unwrap_or(BASELINE)
    }
}

/// Remembers output levels so `status` can render the lamp row.
#[derive(Default)]
struct MirrorDriver {
    outputs: [bool; CHANNELS],
}

impl LampDriver for MirrorDriver {
    fn set_output(&mut self, channel: usize, on: bool) {
        self.outputs[channel] = on;
    }

    fn all_off(&mut self) {
        self.outputs = [false; CHANNELS];
    }
}

pub struct Session {
    controller: Controller<CHANNELS, WINDOW>,
    sensors: ScriptedSensors,
    driver: MirrorDriver,
    clock: Millis,
    ticks_run: u64,
}

impl Session {
    pub fn new() -> Self {
        let config = PanelConfig::with_defaults();
        Self {
            controller: Controller::new(config).expect("default panel configuration is valid"),
            sensors: ScriptedSensors::new(),
            driver: MirrorDriver::default(),
            clock: Millis::ZERO,
            ticks_run: 0,
        }
    }

    pub fn handle_command(&mut self, input: &str) -> Vec<String> {
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            return Vec::new();
        };

        match command.to_ascii_lowercase().as_str() {
            "hit" => self.cmd_hit(parts),
            "gesture" => self.cmd_gesture(),
            "run" => self.cmd_run(parts),
            "status" => self.status_lines(),
            "help" => help_lines(parts.next()),
            other => vec![format!(
                "Unknown command `{other}`. Type `help` for commands."
            )],
        }
    }

    fn cmd_hit(&mut self, mut parts: SplitWhitespace<'_>) -> Vec<String> {
        let Some(channel) = parts.next().and_then(|raw| raw.parse::<usize>().ok()) else {
            return vec!["Usage: hit <channel> [magnitude]".to_string()];
        };
        if channel >= CHANNELS {
            return vec![format!("Channel must be 0..{}", CHANNELS - 1)];
        }
        let magnitude = match parts.next() {
            None => DEFAULT_MAGNITUDE,
            Some(raw) => match raw.parse::<i32>() {
                Ok(magnitude) => magnitude,
                Err(_) => return vec![format!("Bad magnitude `{raw}`")],
            },
        };

        self.sensors.schedule(channel, 0, BASELINE + magnitude);
        vec![format!(
            "Queued a +{magnitude} impact on channel {channel}; `run` to play it."
        )]
    }

    fn cmd_gesture(&mut self) -> Vec<String> {
        let order = self.controller.config().gesture_order;
        for (step, channel) in order.into_iter().enumerate() {
            self.sensors
                .schedule(channel, step, BASELINE + DEFAULT_MAGNITUDE);
        }
        vec![format!(
            "Queued impacts in panel order {order:?}; `run {CHANNELS}` to play them."
        )]
    }

    fn cmd_run(&mut self, mut parts: SplitWhitespace<'_>) -> Vec<String> {
        let ticks = match parts.next() {
            None => 1,
            Some(raw) => match raw.parse::<u64>() {
                Ok(ticks) if (1..=MAX_RUN_TICKS).contains(&ticks) => ticks,
                _ => return vec![format!("Tick count must be 1..={MAX_RUN_TICKS}")],
            },
        };

        let mut lines = Vec::new();
        let interval_ms = self.controller.config().min_tick_interval_ms;
        let mut warmup_ticks = 0u64;
        for _ in 0..ticks {
            self.clock = self.clock + interval_ms;
            match self
                .controller
                .tick(self.clock, &mut self.sensors, &mut self.driver)
            {
                TickOutcome::Skipped => {}
                TickOutcome::Warmup => {
                    self.ticks_run += 1;
                    warmup_ticks += 1;
                }
                TickOutcome::Ran(report) => {
                    self.ticks_run += 1;
                    for event in &report.events {
                        lines.push(format!(
                            "[{:>8} ms] {}",
                            event.at.as_u64(),
                            describe(event.kind)
                        ));
                    }
                }
            }
        }
        if warmup_ticks > 0 {
            lines.push(format!("({warmup_ticks} warm-up ticks, transitions suppressed)"));
        }
        if lines.is_empty() {
            lines.push(format!("{ticks} quiet ticks."));
        }
        lines
    }

    fn status_lines(&self) -> Vec<String> {
        let states = self.controller.lamp_states();
        let mut row = String::from("lamps: ");
        for state in states {
            if state.is_on() {
                row.push_str(&format!("{} ", "●".green()));
            } else {
                row.push_str(&format!("{} ", "○".dark_grey()));
            }
        }

        let filters = self.controller.filters();
        let averages: Vec<i32> = (0..CHANNELS).map(|channel| filters.average(channel)).collect();

        let mut lines = vec![
            row,
            format!("averages: {averages:?}"),
            format!(
                "clock: {} ms, ticks run: {}",
                self.clock.as_u64(),
                self.ticks_run
            ),
        ];
        if self.controller.is_warming_up() {
            lines.push("warming up: transitions suppressed".to_string());
        }
        lines
    }
}

fn describe(kind: PanelEventKind) -> String {
    match kind {
        PanelEventKind::LampOn(channel) => format!("{} {channel}", "lamp-on".green()),
        PanelEventKind::LampOff(channel) => format!("{} {channel}", "lamp-off".dark_grey()),
        PanelEventKind::GestureReset => format!("{}", "gesture-reset".magenta().bold()),
    }
}

fn help_lines(topic: Option<&str>) -> Vec<String> {
    match topic {
        None => HELP_TOPICS
            .iter()
            .map(|(_, usage)| (*usage).to_string())
            .collect(),
        Some(topic) => HELP_TOPICS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(topic))
            .map_or_else(
                || vec![format!("No help for `{topic}`")],
                |(_, usage)| vec![(*usage).to_string()],
            ),
    }
}
