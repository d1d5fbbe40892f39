//! Daylight window resolution.
//!
//! The daemon needs exactly two instants per run: today's sunrise and
//! sunset. They come either from operator-supplied `HH:MM` times pinned to
//! today's local date, or from a two-step remote lookup recovered at
//! startup: an IP geolocation query for approximate coordinates, then a
//! sunrise/sunset query for those coordinates. The window is computed once
//! and never refreshed — a process that runs across midnight keeps
//! comparing against the instants it resolved at startup.
//!
//! Lookup responses are trusted beyond basic parseability; there is no
//! retry, no backoff, and no request timeout (a hung lookup blocks startup,
//! which is acceptable for a once-per-run call).

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use serde::Deserialize;

use crate::constants::{DAYLIGHT_URL, GEOLOCATION_URL};
use crate::error::LookupError;

/// Today's sunrise and sunset instants, in local time.
///
/// Invariant: `sunrise < sunset`, both on the same calendar day. Immutable
/// for the process lifetime once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaylightWindow {
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
}

impl DaylightWindow {
    /// Pin operator-supplied wall-clock times to today's local date.
    pub fn from_manual(sunrise: NaiveTime, sunset: NaiveTime) -> Result<Self> {
        let today = Local::now().date_naive();
        let sunrise = Local
            .from_local_datetime(&today.and_time(sunrise))
            .single()
            .context("ambiguous local time for sunrise")?;
        let sunset = Local
            .from_local_datetime(&today.and_time(sunset))
            .single()
            .context("ambiguous local time for sunset")?;
        Ok(Self { sunrise, sunset })
    }
}

/// Source of the daylight window when the operator did not pin it.
pub trait DaylightProvider {
    fn resolve(&self) -> Result<DaylightWindow, LookupError>;
}

#[derive(Debug, Deserialize)]
struct Geolocation {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct DaylightResults {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct DaylightResponse {
    results: DaylightResults,
}

/// Remote provider backed by ip-api.com and api.sunrise-sunset.org.
pub struct WebDaylightProvider {
    client: reqwest::blocking::Client,
    debug_enabled: bool,
}

impl WebDaylightProvider {
    /// Build the provider with an HTTP client that never times out.
    pub fn new(debug_enabled: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            debug_enabled,
        })
    }

    fn fetch_location(&self) -> Result<Geolocation, LookupError> {
        let body = self
            .client
            .get(GEOLOCATION_URL)
            .send()
            .and_then(|resp| resp.text())
            .map_err(LookupError::Geolocation)?;

        let location: Geolocation =
            serde_json::from_str(&body).map_err(|e| LookupError::MalformedResponse {
                endpoint: "ip-api.com",
                reason: e.to_string(),
            })?;

        if self.debug_enabled {
            log_debug!(
                "Geolocated to lat={:.4}, lon={:.4}",
                location.lat,
                location.lon
            );
        }
        Ok(location)
    }

    fn fetch_daylight(&self, location: &Geolocation) -> Result<DaylightWindow, LookupError> {
        let url = format!(
            "{DAYLIGHT_URL}?lat={}&lng={}&formatted=0",
            location.lat, location.lon
        );

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .and_then(|resp| resp.text())
            .map_err(LookupError::DaylightTimes)?;

        parse_daylight_payload(&body)
    }
}

impl DaylightProvider for WebDaylightProvider {
    fn resolve(&self) -> Result<DaylightWindow, LookupError> {
        let location = self.fetch_location()?;
        self.fetch_daylight(&location)
    }
}

/// Decode a sunrise-sunset.org payload into local-time instants.
pub(crate) fn parse_daylight_payload(body: &str) -> Result<DaylightWindow, LookupError> {
    let response: DaylightResponse =
        serde_json::from_str(body).map_err(|e| LookupError::MalformedResponse {
            endpoint: "api.sunrise-sunset.org",
            reason: e.to_string(),
        })?;

    Ok(DaylightWindow {
        sunrise: parse_local_timestamp(&response.results.sunrise)?,
        sunset: parse_local_timestamp(&response.results.sunset)?,
    })
}

/// Parse an ISO-8601 timestamp carrying a UTC offset and convert it to
/// local time for wall-clock comparison.
fn parse_local_timestamp(value: &str) -> Result<DateTime<Local>, LookupError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| LookupError::BadTimestamp {
            value: value.to_string(),
        })
}
