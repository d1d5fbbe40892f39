//! Stepped temperature transitions.
//!
//! A `Ramp` turns a (current, target, duration) triple into sink
//! invocations. Zero duration applies the absolute target in a single
//! invocation. A positive duration emits exactly `duration` relative steps
//! of `(target - current) / duration`, using integer division that
//! truncates toward zero, with a fixed pause between steps.
//!
//! The engine does not correct for truncation: a delta that does not divide
//! evenly leaves the display short of the nominal target, and `reached()`
//! reports that shortfall as the temperature to record. Callers must treat
//! the reached value, not the nominal target, as the new current
//! temperature.

use std::time::Duration;

use crate::constants::STEP_DELAY;
use crate::error::ExecutionError;
use crate::sink::TemperatureSink;

/// One planned transition from a current to a target temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    current: i32,
    target: i32,
    duration: u32,
    step_delay: Duration,
}

impl Ramp {
    pub fn new(current: i32, target: i32, duration: u32) -> Self {
        Self {
            current,
            target,
            duration,
            step_delay: STEP_DELAY,
        }
    }

    /// Override the inter-step pause. Tests use a zero delay.
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Per-step adjustment: truncating integer division of the total delta.
    pub fn step(&self) -> i32 {
        if self.duration == 0 {
            0
        } else {
            (self.target - self.current) / self.duration as i32
        }
    }

    /// Temperature actually reached after all steps have been applied.
    pub fn reached(&self) -> i32 {
        if self.duration == 0 {
            self.target
        } else {
            self.current + self.step() * self.duration as i32
        }
    }

    /// Drive the sink through the transition.
    ///
    /// Each step invocation is fire-and-forget; the pacing comes from the
    /// inter-step pause, never from waiting on the spawned process. Returns
    /// the reached temperature for the caller to record.
    pub fn run(&self, sink: &mut dyn TemperatureSink) -> Result<i32, ExecutionError> {
        if self.duration == 0 {
            sink.apply(&self.target.to_string())?;
            return Ok(self.target);
        }

        let delta = format!("{:+}", self.step());
        for _ in 0..self.duration {
            sink.apply(&delta)?;
            std::thread::sleep(self.step_delay);
        }

        Ok(self.reached())
    }
}
