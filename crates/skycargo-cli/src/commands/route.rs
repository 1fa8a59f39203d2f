//! Route command handler for planning a flight between two airports.

use anyhow::{Context, Result};
use skycargo_cli::output::{render_route, OutputFormat};
use skycargo_cli::terminal::ColorPalette;
use skycargo_lib::{plan_route, AirportRegistry, FlightLevel, RouteAlgorithm, RouteRequest};

use super::weather_provider;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Origin airport code.
    pub from: String,
    /// Destination airport code.
    pub to: String,
    /// Query live METAR data.
    pub real_weather: bool,
    /// Simulated weather penalty in percent.
    pub weather_severity: f64,
    /// Fuel burn in kg per km.
    pub fuel_efficiency: f64,
    /// Cargo load multiplier.
    pub cargo_load: f64,
    /// Cruise flight level.
    pub altitude: u16,
    pub algorithm: RouteAlgorithm,
    /// Arc samples per leg.
    pub samples: usize,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            use_real_weather: self.real_weather,
            base_weather_severity: self.weather_severity,
            fuel_efficiency: self.fuel_efficiency,
            cargo_load: self.cargo_load,
            cruise_altitude: FlightLevel(self.altitude),
            algorithm: self.algorithm,
            samples_per_segment: self.samples,
            ..RouteRequest::new(self.from.clone(), self.to.clone())
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    args: &RouteCommandArgs,
    format: OutputFormat,
    weather_url: Option<&str>,
) -> Result<()> {
    let weather = weather_provider(weather_url)?;
    let request = args.to_request();
    let result = plan_route(AirportRegistry::builtin(), &weather, &request)
        .with_context(|| format!("failed to plan route {} -> {}", args.from, args.to))?;

    let rendered = render_route(&result, format, &ColorPalette::detect())?;
    println!("{}", rendered.trim_end());
    Ok(())
}
