//! Shared helpers for integration tests.
//!
//! Provides an in-memory METAR source that records how often each airport
//! was requested, so tests can assert on network behaviour without a server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use skycargo_lib::weather::Visibility;
use skycargo_lib::{FetchOutcome, MetarReport, MetarSource, WeatherConfig, WeatherProvider};

/// METAR source returning canned outcomes and counting calls.
#[derive(Default)]
pub struct ScriptedSource {
    outcomes: HashMap<String, FetchOutcome>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the given wind and visibility for `airport`.
    pub fn with_report(mut self, airport: &str, wind_kt: f64, visibility_sm: f64) -> Self {
        let report = MetarReport {
            wind_speed_kt: Some(wind_kt),
            visibility_statute_miles: Some(Visibility::Miles(visibility_sm)),
        };
        self.outcomes
            .insert(airport.to_string(), FetchOutcome::Observed(report));
        self
    }

    pub fn with_outcome(mut self, airport: &str, outcome: FetchOutcome) -> Self {
        self.outcomes.insert(airport.to_string(), outcome);
        self
    }

    pub fn calls_for(&self, airport: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .get(airport)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl MetarSource for ScriptedSource {
    fn fetch(&self, airport: &str) -> FetchOutcome {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .expect("calls lock")
            .entry(airport.to_string())
            .or_default() += 1;
        self.outcomes
            .get(airport)
            .cloned()
            .unwrap_or(FetchOutcome::Observed(MetarReport::default()))
    }
}

/// Weather provider wired to `source` with default TTL and fallback.
#[allow(dead_code)]
pub fn provider_with(source: Arc<ScriptedSource>) -> WeatherProvider {
    WeatherProvider::with_source(WeatherConfig::default(), source)
}
