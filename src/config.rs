//! Configuration loading, CLI merging, and validation.
//!
//! Settings come from two layers: an optional TOML file at
//! `$XDG_CONFIG_HOME/duskr/duskr.toml` and the command-line flags, which
//! override the file field by field. The merged result is immutable for the
//! process lifetime — there is no hot reload, and the daylight window derived
//! from it is computed exactly once per run.
//!
//! ```toml
//! day_temp = 6500      # Color temperature while the sun is up (Kelvin)
//! night_temp = 3000    # Color temperature after sunset (Kelvin)
//! sunrise = "06:30"    # Manual sunrise (HH:MM); set together with sunset
//! sunset = "19:45"     # Manual sunset (HH:MM); set together with sunrise
//! duration = 0         # Transition duration in minutes, 0 = instant
//! ```
//!
//! Manual sunrise/sunset must be supplied together and in order; a lone or
//! malformed time is a fatal configuration error. Temperatures are taken as
//! given — duskr does not enforce a Kelvin range.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::args::CliOverrides;
use crate::error::ConfigError;

/// On-disk configuration shape. Every field is optional; defaults fill the
/// gaps after merging.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub day_temp: Option<i32>,
    pub night_temp: Option<i32>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub duration: Option<u32>,
}

/// Fully merged and validated runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Temperature applied between sunrise and sunset.
    pub day_temp: i32,
    /// Temperature applied after sunset.
    pub night_temp: i32,
    /// Manual sunrise; present only when the operator supplied both times.
    pub sunrise: Option<NaiveTime>,
    /// Manual sunset; present only when the operator supplied both times.
    pub sunset: Option<NaiveTime>,
    /// Ramp duration in minutes. Zero applies the target in one step.
    pub duration: u32,
}

/// Day and night temperatures only, for the one-shot commands.
///
/// `--enable`/`--disable` apply a temperature and exit without ever
/// resolving a daylight window, so the window fields are neither parsed nor
/// validated on this path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presets {
    pub day_temp: i32,
    pub night_temp: i32,
}

impl Config {
    /// Load the configuration file (if any) and merge CLI overrides on top.
    pub fn load(overrides: &CliOverrides) -> Result<Config> {
        let file = read_file_layer()?;
        Config::merge(file, overrides).context("invalid configuration")
    }

    /// Merge the file layer with CLI overrides and validate the result.
    pub fn merge(file: FileConfig, overrides: &CliOverrides) -> Result<Config, ConfigError> {
        let day_temp = match &overrides.day_temp {
            Some(raw) => parse_temp("--def", raw)?,
            None => file.day_temp.unwrap_or(DEFAULT_DAY_TEMP),
        };
        let night_temp = match &overrides.night_temp {
            Some(raw) => parse_temp("--temp", raw)?,
            None => file.night_temp.unwrap_or(DEFAULT_NIGHT_TEMP),
        };
        let duration = match &overrides.duration {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidNumber {
                field: "--duration",
                value: raw.clone(),
            })?,
            None => file.duration.unwrap_or(DEFAULT_RAMP_DURATION),
        };

        let sunrise_raw = overrides.sunrise.clone().or(file.sunrise);
        let sunset_raw = overrides.sunset.clone().or(file.sunset);

        let (sunrise, sunset) = match (sunrise_raw, sunset_raw) {
            (Some(rise), Some(set)) => {
                let sunrise = parse_time("sunrise", &rise)?;
                let sunset = parse_time("sunset", &set)?;
                if sunrise >= sunset {
                    return Err(ConfigError::InvertedWindow {
                        sunrise: rise,
                        sunset: set,
                    });
                }
                (Some(sunrise), Some(sunset))
            }
            (Some(_), None) => return Err(ConfigError::IncompleteWindow { missing: "sunset" }),
            (None, Some(_)) => return Err(ConfigError::IncompleteWindow { missing: "sunrise" }),
            (None, None) => (None, None),
        };

        Ok(Config {
            day_temp,
            night_temp,
            sunrise,
            sunset,
            duration,
        })
    }

    /// True when the operator pinned the window and the remote lookup can be
    /// skipped entirely.
    pub fn has_manual_window(&self) -> bool {
        self.sunrise.is_some() && self.sunset.is_some()
    }

    /// Echo the effective settings at startup.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Day temperature: {}K", self.day_temp);
        log_indented!("Night temperature: {}K", self.night_temp);
        match (self.sunrise, self.sunset) {
            (Some(rise), Some(set)) => {
                log_indented!("Sunrise: {} (manual)", rise.format("%H:%M"));
                log_indented!("Sunset: {} (manual)", set.format("%H:%M"));
            }
            _ => log_indented!("Sunrise/sunset: automatic lookup"),
        }
        if self.duration == 0 {
            log_indented!("Transition: instant");
        } else {
            log_indented!("Transition: {} minute ramp", self.duration);
        }
    }
}

/// Load just the temperature presets for a one-shot command.
pub fn load_presets(overrides: &CliOverrides) -> Result<Presets> {
    let file = read_file_layer()?;
    let day_temp = match &overrides.day_temp {
        Some(raw) => parse_temp("--def", raw)?,
        None => file.day_temp.unwrap_or(DEFAULT_DAY_TEMP),
    };
    let night_temp = match &overrides.night_temp {
        Some(raw) => parse_temp("--temp", raw)?,
        None => file.night_temp.unwrap_or(DEFAULT_NIGHT_TEMP),
    };
    Ok(Presets {
        day_temp,
        night_temp,
    })
}

fn read_file_layer() -> Result<FileConfig> {
    match config_path() {
        Some(path) if path.exists() => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let parsed = toml::from_str(&contents).map_err(ConfigError::from)?;
            Ok(parsed)
        }
        _ => Ok(FileConfig::default()),
    }
}

fn parse_temp(field: &'static str, raw: &str) -> Result<i32, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_time(field: &'static str, raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| ConfigError::InvalidTime {
        field,
        value: raw.to_string(),
    })
}

/// Path of the configuration file, if a config directory can be determined.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn no_overrides() -> CliOverrides {
        CliOverrides::default()
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = Config::merge(FileConfig::default(), &no_overrides()).unwrap();
        assert_eq!(config.day_temp, DEFAULT_DAY_TEMP);
        assert_eq!(config.night_temp, DEFAULT_NIGHT_TEMP);
        assert_eq!(config.duration, DEFAULT_RAMP_DURATION);
        assert!(!config.has_manual_window());
    }

    #[test]
    fn test_cli_overrides_beat_file_values() {
        let file = FileConfig {
            day_temp: Some(6000),
            night_temp: Some(3200),
            duration: Some(30),
            ..Default::default()
        };
        let overrides = CliOverrides {
            day_temp: Some("5500".to_string()),
            duration: Some("10".to_string()),
            ..Default::default()
        };
        let config = Config::merge(file, &overrides).unwrap();
        assert_eq!(config.day_temp, 5500);
        assert_eq!(config.night_temp, 3200); // file value survives
        assert_eq!(config.duration, 10);
    }

    #[test]
    fn test_manual_window_parses() {
        let overrides = CliOverrides {
            sunrise: Some("06:30".to_string()),
            sunset: Some("19:45".to_string()),
            ..Default::default()
        };
        let config = Config::merge(FileConfig::default(), &overrides).unwrap();
        assert!(config.has_manual_window());
        assert_eq!(config.sunrise.unwrap().format("%H:%M").to_string(), "06:30");
        assert_eq!(config.sunset.unwrap().format("%H:%M").to_string(), "19:45");
    }

    #[test]
    fn test_lone_sunrise_is_fatal() {
        let overrides = CliOverrides {
            sunrise: Some("06:30".to_string()),
            ..Default::default()
        };
        let err = Config::merge(FileConfig::default(), &overrides).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IncompleteWindow { missing: "sunset" }
        ));
    }

    #[test]
    fn test_inverted_window_is_fatal() {
        let overrides = CliOverrides {
            sunrise: Some("20:00".to_string()),
            sunset: Some("06:00".to_string()),
            ..Default::default()
        };
        let err = Config::merge(FileConfig::default(), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedWindow { .. }));
    }

    #[test]
    fn test_malformed_time_is_fatal() {
        for bad in ["6 am", "25:00", "12:61", "noon", ""] {
            let overrides = CliOverrides {
                sunrise: Some(bad.to_string()),
                sunset: Some("19:00".to_string()),
                ..Default::default()
            };
            let err = Config::merge(FileConfig::default(), &overrides).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTime { .. }),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_temperature_is_fatal() {
        let overrides = CliOverrides {
            day_temp: Some("warm".to_string()),
            ..Default::default()
        };
        let err = Config::merge(FileConfig::default(), &overrides).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { field: "--def", .. }
        ));
    }

    #[test]
    #[serial]
    fn test_load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join(CONFIG_FILE),
            "day_temp = 5800\nnight_temp = 2700\nduration = 20\n",
        )
        .unwrap();

        // SAFETY: serialized test, no concurrent env access
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        let config = Config::load(&no_overrides()).unwrap();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        assert_eq!(config.day_temp, 5800);
        assert_eq!(config.night_temp, 2700);
        assert_eq!(config.duration, 20);
    }

    #[test]
    #[serial]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILE), "day_temp = [not an int").unwrap();

        // SAFETY: serialized test, no concurrent env access
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        let result = Config::load(&no_overrides());
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_presets_ignore_window_validity() {
        // A lone sunrise in the file stops the daemon but not a one-shot.
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join(CONFIG_FILE),
            "night_temp = 2700\nsunrise = \"06:00\"\n",
        )
        .unwrap();

        // SAFETY: serialized test, no concurrent env access
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        let presets = load_presets(&no_overrides());
        let full = Config::load(&no_overrides());
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        assert_eq!(presets.unwrap().night_temp, 2700);
        assert!(full.is_err());
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        // SAFETY: serialized test, no concurrent env access
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };
        let config = Config::load(&no_overrides()).unwrap();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        assert_eq!(config.day_temp, DEFAULT_DAY_TEMP);
        assert_eq!(config.night_temp, DEFAULT_NIGHT_TEMP);
    }
}
