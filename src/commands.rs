//! One-shot commands that apply a temperature and exit.
//!
//! `--enable` forces the night temperature, `--disable` the day
//! temperature. Both perform exactly one sink invocation with the absolute
//! value and never resolve a daylight window, so they work at any time of
//! day and with any window configuration on disk.

use anyhow::{Context, Result};

use crate::args::CliOverrides;
use crate::config;
use crate::sink::{HyprctlSink, TemperatureSink};

/// Force the night temperature once.
pub fn enable(overrides: &CliOverrides, debug_enabled: bool) -> Result<()> {
    let presets = config::load_presets(overrides)?;
    apply_once(presets.night_temp, "night", debug_enabled)
}

/// Force the day temperature once.
pub fn disable(overrides: &CliOverrides, debug_enabled: bool) -> Result<()> {
    let presets = config::load_presets(overrides)?;
    apply_once(presets.day_temp, "day", debug_enabled)
}

fn apply_once(temp: i32, label: &str, debug_enabled: bool) -> Result<()> {
    log_block_start!("Forcing {label} temperature ({temp}K)");
    let mut sink = HyprctlSink::new(debug_enabled);
    sink.apply(&temp.to_string())
        .with_context(|| format!("failed to force {label} temperature"))?;
    log_end!();
    Ok(())
}
