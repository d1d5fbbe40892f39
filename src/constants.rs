//! Shared constants and default values.

use std::time::Duration;

/// Default day (disabled) color temperature in Kelvin.
pub const DEFAULT_DAY_TEMP: i32 = 6500;

/// Default night color temperature in Kelvin.
pub const DEFAULT_NIGHT_TEMP: i32 = 3000;

/// Default ramp duration in minutes. Zero applies the target instantly.
pub const DEFAULT_RAMP_DURATION: u32 = 0;

/// Polling interval of the main loop.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Pause between consecutive ramp steps.
pub const STEP_DELAY: Duration = Duration::from_secs(5);

/// External tool that applies temperatures to the display.
pub const SINK_COMMAND: &str = "hyprctl";

/// Arguments preceding the temperature value in a sink invocation.
pub const SINK_SUBCOMMAND: [&str; 2] = ["hyprsunset", "temperature"];

/// IP-based geolocation endpoint (returns `{ "lat": .., "lon": .. }`).
pub const GEOLOCATION_URL: &str = "http://ip-api.com/json/?fields=lat,lon";

/// Sunrise/sunset lookup endpoint; expects `lat`/`lng` query parameters and
/// `formatted=0` for ISO-8601 timestamps with UTC offset.
pub const DAYLIGHT_URL: &str = "https://api.sunrise-sunset.org/json";

/// Name of the optional configuration file under the config directory.
pub const CONFIG_FILE: &str = "duskr.toml";

/// Directory under `$XDG_CONFIG_HOME` holding the configuration file.
pub const CONFIG_DIR: &str = "duskr";
