//! Error taxonomy for duskr's fallible operations.
//!
//! Every failure here is fatal: the error propagates with `anyhow` context
//! up to the handler in `main`, which logs the chain and exits non-zero.
//! There is no retry, no backoff, and no partial-failure recovery — on
//! restart the daemon re-forces the day temperature and computes a fresh
//! daylight window.
//!
//! There is deliberately no variant for the sink's external command exiting
//! non-zero. The reaper thread waits on the child and discards its status;
//! only failure to *start* the command is observable.

use thiserror::Error;

/// Malformed or incomplete operator-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A sunrise/sunset value did not parse as `HH:MM`.
    #[error("invalid time '{value}' for {field}: expected HH:MM")]
    InvalidTime { field: &'static str, value: String },

    /// Only one of sunrise/sunset was supplied.
    #[error("sunrise and sunset must be set together (missing {missing})")]
    IncompleteWindow { missing: &'static str },

    /// Manual times violate the sunrise < sunset ordering.
    #[error("sunrise {sunrise} must be earlier than sunset {sunset}")]
    InvertedWindow { sunrise: String, sunset: String },

    /// A numeric flag value did not parse.
    #[error("invalid value '{value}' for {field}: expected an integer")]
    InvalidNumber { field: &'static str, value: String },

    /// The configuration file exists but is not valid TOML.
    #[error("failed to parse configuration file: {0}")]
    Unparseable(#[from] toml::de::Error),
}

/// Network or parse failure while resolving the daylight window remotely.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("geolocation request failed")]
    Geolocation(#[source] reqwest::Error),

    #[error("sunrise/sunset request failed")]
    DaylightTimes(#[source] reqwest::Error),

    #[error("unexpected response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("could not parse timestamp '{value}' from daylight service")]
    BadTimestamp { value: String },
}

/// The sink's external command could not be started.
#[derive(Debug, Error)]
#[error("failed to start '{command}'")]
pub struct ExecutionError {
    pub command: String,
    #[source]
    pub source: std::io::Error,
}
