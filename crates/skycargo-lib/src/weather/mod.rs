//! Weather penalties for route weighting.
//!
//! This module provides:
//! - [`WeatherConfig`] - endpoint, timeout, cache TTL, and fallback penalty
//! - [`WeatherObservation`] - penalty plus a human-readable status string
//! - [`MetarSource`] / [`HttpMetarSource`] - transport seam for METAR lookups
//! - [`WeatherProvider`] - simulated or live penalties behind a TTL cache
//!
//! Live lookups never fail: transport errors, bad statuses, and empty
//! responses all degrade to the configured fallback penalty with a status
//! message describing what went wrong.

mod cache;
mod metar;

pub use cache::WeatherCache;
pub use metar::{parse_first_report, MetarReport, Visibility};

use std::env;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;

/// Default METAR endpoint (NOAA Aviation Weather Center).
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://aviationweather.gov/api/data/metar";

const WEATHER_URL_ENV: &str = "SKYCARGO_WEATHER_URL";
const WEATHER_TIMEOUT_ENV: &str = "SKYCARGO_WEATHER_TIMEOUT_SECS";
const WEATHER_TTL_ENV: &str = "SKYCARGO_WEATHER_TTL_SECS";

const SIMULATED_DESCRIPTION: &str = "Simulated";
const NO_DATA_DESCRIPTION: &str = "No data available";

/// Settings for live weather lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub ttl: Duration,
    /// Penalty (percent) used whenever live data cannot be obtained.
    pub fallback_penalty: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            ttl: Duration::from_secs(300),
            fallback_penalty: 20.0,
        }
    }
}

impl WeatherConfig {
    /// Defaults overridden by `SKYCARGO_WEATHER_URL`,
    /// `SKYCARGO_WEATHER_TIMEOUT_SECS`, and `SKYCARGO_WEATHER_TTL_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = env::var(WEATHER_URL_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }
        if let Some(timeout) = seconds_from_env(WEATHER_TIMEOUT_ENV) {
            config.timeout = timeout;
        }
        if let Some(ttl) = seconds_from_env(WEATHER_TTL_ENV) {
            config.ttl = ttl;
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn seconds_from_env(name: &str) -> Option<Duration> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring non-numeric duration override");
            None
        }
    }
}

/// Where an observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource {
    /// Operator-supplied severity; no network involved.
    Simulated,
    /// Decoded from a live METAR report.
    Live,
    /// Live lookup failed or had no data; fallback penalty applied.
    Fallback,
}

/// Weather penalty for one airport at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    /// Percentage added to route cost.
    pub penalty: f64,
    pub description: String,
    pub fetched_at: DateTime<Utc>,
    pub source: ObservationSource,
}

impl WeatherObservation {
    pub fn simulated(base_severity: f64, at: DateTime<Utc>) -> Self {
        Self {
            penalty: base_severity,
            description: SIMULATED_DESCRIPTION.to_string(),
            fetched_at: at,
            source: ObservationSource::Simulated,
        }
    }

    /// An observation is fresh only while its age is strictly below `ttl`.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(age) => age >= ttl,
            // Observation stamped in the future: treat as fresh.
            Err(_) => false,
        }
    }
}

/// Result of asking a METAR source for one airport.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Observed(MetarReport),
    NoData,
    Failed(String),
}

/// Transport used by [`WeatherProvider`] to obtain METAR reports.
pub trait MetarSource: Send + Sync {
    fn fetch(&self, airport: &str) -> FetchOutcome;
}

/// Blocking HTTP client for the METAR JSON API.
#[derive(Debug, Clone)]
pub struct HttpMetarSource {
    client: Client,
    endpoint: String,
}

impl HttpMetarSource {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("skycargo/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl MetarSource for HttpMetarSource {
    fn fetch(&self, airport: &str) -> FetchOutcome {
        debug!(airport, endpoint = %self.endpoint, "requesting METAR");
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .query(&[("ids", airport), ("format", "json")])
            .send();

        let response = match response {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                return FetchOutcome::Failed("Request timed out".to_string())
            }
            Err(err) => {
                debug!(airport, error = %err, "METAR transport failure");
                return FetchOutcome::Failed("Connection failed".to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return FetchOutcome::NoData;
        }
        if !status.is_success() {
            return FetchOutcome::Failed(format!("API error (HTTP {})", status.as_u16()));
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(err) if err.is_timeout() => {
                return FetchOutcome::Failed("Request timed out".to_string())
            }
            Err(_) => return FetchOutcome::Failed("Connection failed".to_string()),
        };

        match parse_first_report(&body) {
            Ok(Some(report)) => FetchOutcome::Observed(report),
            Ok(None) => FetchOutcome::NoData,
            Err(err) => {
                debug!(airport, error = %err, "unreadable METAR payload");
                FetchOutcome::Failed("Malformed response".to_string())
            }
        }
    }
}

/// Supplies weather penalties for airports, caching live lookups.
pub struct WeatherProvider {
    config: WeatherConfig,
    source: Arc<dyn MetarSource>,
    cache: WeatherCache,
}

impl WeatherProvider {
    /// Provider backed by the HTTP METAR endpoint in `config`.
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let source = HttpMetarSource::new(&config)?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Provider backed by a custom METAR source.
    pub fn with_source(config: WeatherConfig, source: Arc<dyn MetarSource>) -> Self {
        let cache = WeatherCache::new(config.ttl);
        Self {
            config,
            source,
            cache,
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Weather penalty for `airport`.
    ///
    /// Simulated lookups return `base_severity` unchanged, without touching
    /// the network or the cache. Range checks belong to the caller. Live lookups reuse a cached observation younger than the
    /// TTL and otherwise fetch, falling back on any failure.
    pub fn penalty_for(
        &self,
        airport: &str,
        use_real_weather: bool,
        base_severity: f64,
    ) -> WeatherObservation {
        self.penalty_for_at(airport, use_real_weather, base_severity, Utc::now())
    }

    /// Same as [`penalty_for`](Self::penalty_for) with an explicit clock reading.
    pub fn penalty_for_at(
        &self,
        airport: &str,
        use_real_weather: bool,
        base_severity: f64,
        now: DateTime<Utc>,
    ) -> WeatherObservation {
        if !use_real_weather {
            return WeatherObservation::simulated(base_severity, now);
        }

        self.cache
            .get_or_refresh(airport, now, || self.fetch_observation(airport, now))
    }

    /// Look up both endpoints concurrently and return once both resolve.
    pub fn penalties_for_pair(
        &self,
        origin: &str,
        destination: &str,
        use_real_weather: bool,
        base_severity: f64,
    ) -> (WeatherObservation, WeatherObservation) {
        let now = Utc::now();
        if !use_real_weather {
            return (
                WeatherObservation::simulated(base_severity, now),
                WeatherObservation::simulated(base_severity, now),
            );
        }

        std::thread::scope(|scope| {
            let origin_lookup =
                scope.spawn(|| self.penalty_for_at(origin, true, base_severity, now));
            let destination_weather = self.penalty_for_at(destination, true, base_severity, now);
            let origin_weather = origin_lookup
                .join()
                .unwrap_or_else(|_| self.fallback(now, "Lookup aborted".to_string()));
            (origin_weather, destination_weather)
        })
    }

    fn fetch_observation(&self, airport: &str, now: DateTime<Utc>) -> WeatherObservation {
        match self.source.fetch(airport) {
            FetchOutcome::Observed(report) => WeatherObservation {
                penalty: report.penalty(),
                description: report.describe(),
                fetched_at: now,
                source: ObservationSource::Live,
            },
            FetchOutcome::NoData => {
                warn!(airport, "no METAR data available, using fallback penalty");
                self.fallback(now, NO_DATA_DESCRIPTION.to_string())
            }
            FetchOutcome::Failed(reason) => {
                warn!(airport, reason = %reason, "METAR lookup failed, using fallback penalty");
                self.fallback(now, reason)
            }
        }
    }

    fn fallback(&self, now: DateTime<Utc>, description: String) -> WeatherObservation {
        WeatherObservation {
            penalty: self.config.fallback_penalty,
            description,
            fetched_at: now,
            source: ObservationSource::Fallback,
        }
    }
}

impl std::fmt::Debug for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProvider")
            .field("endpoint", &self.config.endpoint)
            .field("ttl", &self.config.ttl)
            .field("cached_airports", &self.cache.len())
            .finish()
    }
}
