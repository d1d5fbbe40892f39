//! Temperature sink: the external command that touches the display.
//!
//! Every change goes through `hyprctl hyprsunset temperature <value>`,
//! where `<value>` is either an absolute temperature ("3000") or a signed
//! relative step ("+350", "-120"). Invocations are fire-and-forget: the
//! command is spawned, a detached thread reaps it, and its exit status is
//! discarded. Only failure to start the command is an error, and that
//! error is fatal wherever it occurs.

use std::process::Command;

use crate::constants::{SINK_COMMAND, SINK_SUBCOMMAND};
use crate::error::ExecutionError;

/// Applies a temperature value or delta to the display.
///
/// The trait seam exists so the state machine and ramp engine can be tested
/// against a recording fake without touching hyprctl.
pub trait TemperatureSink {
    /// Start one sink invocation carrying `value`. Must not block on the
    /// spawned process completing, but must guarantee it is reaped.
    fn apply(&mut self, value: &str) -> Result<(), ExecutionError>;
}

/// Production sink driving hyprsunset through hyprctl.
pub struct HyprctlSink {
    debug_enabled: bool,
}

impl HyprctlSink {
    pub fn new(debug_enabled: bool) -> Self {
        Self { debug_enabled }
    }
}

impl TemperatureSink for HyprctlSink {
    fn apply(&mut self, value: &str) -> Result<(), ExecutionError> {
        let mut command = Command::new(SINK_COMMAND);
        command.args(SINK_SUBCOMMAND).arg(value);

        if self.debug_enabled {
            log_debug!("Running {SINK_COMMAND} {} {value}", SINK_SUBCOMMAND.join(" "));
        }

        let mut child = command.spawn().map_err(|source| ExecutionError {
            command: format!("{SINK_COMMAND} {} {value}", SINK_SUBCOMMAND.join(" ")),
            source,
        })?;

        // Reap the child off the control loop; status is not inspected.
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}
