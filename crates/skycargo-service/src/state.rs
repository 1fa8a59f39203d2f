//! Application state shared by the axum handlers.

use std::sync::Arc;

use skycargo_lib::{AirportRegistry, Error as LibError, WeatherConfig, WeatherProvider};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The METAR HTTP client could not be built.
    WeatherClient(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeatherClient(e) => write!(f, "failed to build weather client: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WeatherClient(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable. Every request shares the same [`WeatherProvider`], so
/// live weather is fetched at most once per airport per cache window no
/// matter how many requests arrive.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    registry: AirportRegistry,
    weather: WeatherProvider,
}

impl AppState {
    /// State over `registry` using `weather` for penalties.
    pub fn new(registry: AirportRegistry, weather: WeatherProvider) -> Self {
        Self {
            inner: Arc::new(AppStateInner { registry, weather }),
        }
    }

    /// Built-in registry with weather settings read from the environment.
    ///
    /// Builds a blocking HTTP client, so call this outside the async runtime.
    pub fn from_env() -> Result<Self, AppStateError> {
        let config = WeatherConfig::from_env();
        tracing::info!(
            endpoint = %config.endpoint,
            timeout_secs = config.timeout.as_secs(),
            ttl_secs = config.ttl.as_secs(),
            "configuring weather provider"
        );
        let weather = WeatherProvider::new(config).map_err(AppStateError::WeatherClient)?;
        Ok(Self::new(AirportRegistry::builtin().clone(), weather))
    }

    pub fn registry(&self) -> &AirportRegistry {
        &self.inner.registry
    }

    pub fn weather(&self) -> &WeatherProvider {
        &self.inner.weather
    }

    /// Whether live METAR lookups have an endpoint to talk to.
    pub fn live_weather_configured(&self) -> bool {
        !self.inner.weather.config().endpoint.trim().is_empty()
    }
}
