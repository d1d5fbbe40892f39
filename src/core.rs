//! Core state machine and main polling loop.
//!
//! `Core` owns the daemon's entire runtime state: the current mode, the
//! recorded temperature, the immutable daylight window, and the sink. The
//! loop is strictly sequential — one tick per minute, at most one ramp in
//! flight, no shared state with any other actor.
//!
//! Classification has exactly two actionable outcomes: daytime
//! (sunrise ≤ now < sunset) flips Night to Day, and at-or-after sunset
//! flips Day to Night. A tick before sunrise matches neither and does
//! nothing, so a process started between midnight and sunrise keeps the
//! day temperature until sunset comes around. That gap is part of the
//! observed behavior this daemon is built around; do not add a pre-sunrise
//! branch.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::time::Duration;

use crate::config::Config;
use crate::constants::{STEP_DELAY, TICK_INTERVAL};
use crate::daylight::DaylightWindow;
use crate::sink::TemperatureSink;
use crate::transition::Ramp;

/// Which temperature regime the display currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The sink holds the day temperature.
    Day,
    /// The sink holds the night temperature.
    Night,
    /// A ramp is in progress; no classification happens until it ends.
    Transitioning,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Day => write!(f, "day"),
            Mode::Night => write!(f, "night"),
            Mode::Transitioning => write!(f, "transitioning"),
        }
    }
}

/// Wall-clock classification against the daylight window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// sunrise ≤ now < sunset
    Daytime,
    /// now ≥ sunset
    Nighttime,
    /// now < sunrise: no branch acts on this
    BeforeSunrise,
}

/// Classify an instant against the window.
pub fn classify(now: DateTime<Local>, window: &DaylightWindow) -> TimeOfDay {
    if now >= window.sunrise && now < window.sunset {
        TimeOfDay::Daytime
    } else if now >= window.sunset {
        TimeOfDay::Nighttime
    } else {
        TimeOfDay::BeforeSunrise
    }
}

/// The daemon's state machine and control loop.
pub struct Core {
    config: Config,
    window: DaylightWindow,
    sink: Box<dyn TemperatureSink>,
    debug_enabled: bool,
    mode: Mode,
    current_temp: i32,
    step_delay: Duration,
}

impl Core {
    pub fn new(
        config: Config,
        window: DaylightWindow,
        sink: Box<dyn TemperatureSink>,
        debug_enabled: bool,
    ) -> Self {
        let current_temp = config.day_temp;
        Self {
            config,
            window,
            sink,
            debug_enabled,
            mode: Mode::Day,
            current_temp,
            step_delay: STEP_DELAY,
        }
    }

    /// Override the ramp pacing. Tests use a zero delay.
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_temp(&self) -> i32 {
        self.current_temp
    }

    /// Test hook: pin the mode without running a transition.
    #[cfg(feature = "testing-support")]
    pub fn force_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Force the day temperature and initialize the mode, regardless of the
    /// time of day. Runs exactly once, before the first tick.
    pub fn apply_startup_state(&mut self) -> Result<()> {
        log_block_start!("Forcing day temperature ({}K)", self.config.day_temp);
        self.sink
            .apply(&self.config.day_temp.to_string())
            .context("failed to apply startup temperature")?;
        self.mode = Mode::Day;
        self.current_temp = self.config.day_temp;
        Ok(())
    }

    /// Run one polling tick against the given wall-clock instant.
    ///
    /// Performs at most one transition, and none at all while a previous
    /// ramp holds the `Transitioning` guard.
    pub fn tick(&mut self, now: DateTime<Local>) -> Result<()> {
        if self.mode == Mode::Transitioning {
            return Ok(());
        }

        match (classify(now, &self.window), self.mode) {
            (TimeOfDay::Daytime, Mode::Night) => {
                self.transition(self.config.day_temp, Mode::Day)?;
            }
            (TimeOfDay::Nighttime, Mode::Day) => {
                self.transition(self.config.night_temp, Mode::Night)?;
            }
            _ => {
                if self.debug_enabled {
                    log_debug!("Tick at {}: staying in {} mode", now.format("%H:%M"), self.mode);
                }
            }
        }

        Ok(())
    }

    /// Apply the startup state and poll until the process is killed.
    pub fn execute(mut self) -> Result<()> {
        self.apply_startup_state()?;

        log_block_start!(
            "Watching the clock (sunrise {}, sunset {})",
            self.window.sunrise.format("%H:%M"),
            self.window.sunset.format("%H:%M")
        );

        loop {
            self.tick(Local::now())?;
            std::thread::sleep(TICK_INTERVAL);
        }
    }

    fn transition(&mut self, target: i32, end_mode: Mode) -> Result<()> {
        self.mode = Mode::Transitioning;
        log_block_start!("Commencing transition to {end_mode} ({target}K)");

        let ramp = Ramp::new(self.current_temp, target, self.config.duration)
            .with_step_delay(self.step_delay);
        let reached = ramp
            .run(self.sink.as_mut())
            .context("transition aborted")?;

        self.current_temp = reached;
        self.mode = end_mode;
        log_decorated!("Transitioned to {reached}K");
        Ok(())
    }
}
