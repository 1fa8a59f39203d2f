// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and dispatches.

pub mod airports;
pub mod route;
pub mod weather;

use anyhow::{Context, Result};
use skycargo_lib::{WeatherConfig, WeatherProvider};

/// Build the weather provider from the environment and `--weather-url`.
pub fn weather_provider(weather_url: Option<&str>) -> Result<WeatherProvider> {
    let mut config = WeatherConfig::from_env();
    if let Some(url) = weather_url {
        config = config.with_endpoint(url);
    }
    WeatherProvider::new(config).context("failed to build the METAR HTTP client")
}
