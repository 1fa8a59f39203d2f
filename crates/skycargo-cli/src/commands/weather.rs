//! Weather command handler reporting the penalty for one airport.

use anyhow::{Context, Result};
use skycargo_cli::output::{render_weather, OutputFormat};
use skycargo_cli::terminal::ColorPalette;
use skycargo_lib::AirportRegistry;

use super::weather_provider;

/// Arguments for the weather command.
#[derive(Debug, Clone)]
pub struct WeatherCommandArgs {
    pub airport: String,
    pub real_weather: bool,
    pub weather_severity: f64,
}

/// Handle the weather subcommand.
pub fn handle_weather_command(
    args: &WeatherCommandArgs,
    format: OutputFormat,
    weather_url: Option<&str>,
) -> Result<()> {
    let airport = AirportRegistry::builtin()
        .lookup(&args.airport)
        .with_context(|| format!("cannot report weather for '{}'", args.airport.trim()))?;
    let provider = weather_provider(weather_url)?;
    let observation =
        provider.penalty_for(&airport.code, args.real_weather, args.weather_severity);

    let rendered = render_weather(airport, &observation, format, &ColorPalette::detect())?;
    print!("{rendered}");
    Ok(())
}
