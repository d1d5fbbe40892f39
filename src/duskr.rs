//! Application coordinator that manages the complete lifecycle of duskr.
//!
//! This module wires the pieces together for a daemon run: configuration
//! loading and echoing, daylight window resolution (manual times win; the
//! remote provider is consulted only when both are absent), sink creation,
//! and handing control to the core loop. It sits between CLI dispatch in
//! `main.rs` and the state machine in `core`.

use anyhow::{Context, Result};

use crate::args::CliOverrides;
use crate::config::Config;
use crate::core::Core;
use crate::daylight::{DaylightProvider, DaylightWindow, WebDaylightProvider};
use crate::sink::HyprctlSink;

/// Builder for configuring and running the duskr daemon.
pub struct Duskr {
    debug_enabled: bool,
    overrides: CliOverrides,
}

impl Duskr {
    pub fn new(debug_enabled: bool, overrides: CliOverrides) -> Self {
        Self {
            debug_enabled,
            overrides,
        }
    }

    /// Execute the daemon: resolve everything fallible up front, then run
    /// the polling loop until the process is killed. Only startup can fail
    /// with a configuration or lookup error; the loop itself returns only
    /// on a sink start failure.
    pub fn run(self) -> Result<()> {
        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled");
        }

        let config = Config::load(&self.overrides)?;
        config.log_config();

        let window = resolve_window(&config, self.debug_enabled)?;
        log_block_start!("Daylight window resolved");
        log_indented!("Sunrise: {}", window.sunrise.format("%H:%M:%S"));
        log_indented!("Sunset: {}", window.sunset.format("%H:%M:%S"));

        let sink = Box::new(HyprctlSink::new(self.debug_enabled));
        Core::new(config, window, sink, self.debug_enabled).execute()
    }
}

/// Resolve the daylight window from manual times or the remote provider.
///
/// Operator-supplied times take precedence and fully bypass the provider.
fn resolve_window(config: &Config, debug_enabled: bool) -> Result<DaylightWindow> {
    if let (Some(sunrise), Some(sunset)) = (config.sunrise, config.sunset) {
        return DaylightWindow::from_manual(sunrise, sunset)
            .context("failed to build daylight window from manual times");
    }

    log_block_start!("Looking up sunrise and sunset for this location...");
    let provider = WebDaylightProvider::new(debug_enabled)?;
    let window = provider
        .resolve()
        .context("failed to resolve daylight window")?;
    Ok(window)
}
