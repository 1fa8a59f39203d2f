//! Output formatting for CLI subcommands.
//!
//! Every renderer returns a `String` so subcommands decide where it goes and
//! tests can inspect it without capturing stdout.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;

use skycargo_lib::{
    output::{render_text, to_geojson},
    Airport, RouteResult, WeatherObservation,
};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Full result as pretty-printed JSON.
    Json,
    /// GeoJSON FeatureCollection for map tools.
    Geojson,
}

/// Render a planned route.
pub fn render_route(
    result: &RouteResult,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_route_text(result, palette)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Geojson => Ok(serde_json::to_string_pretty(&to_geojson(result))?),
    }
}

fn render_route_text(result: &RouteResult, p: &ColorPalette) -> String {
    let summary = render_text(result);
    let mut lines = summary.lines();
    let mut out = String::new();

    if let Some(header) = lines.next() {
        let _ = writeln!(out, "{}{}{}", p.white_bold, header, p.reset);
    }
    for line in lines {
        let color = if line.contains("Weather (") {
            let penalty = if line.starts_with("Start") {
                result.origin_weather.penalty
            } else {
                result.destination_weather.penalty
            };
            p.penalty(penalty)
        } else {
            ""
        };
        let reset = if color.is_empty() { "" } else { p.reset };
        let _ = writeln!(out, "{color}{line}{reset}");
    }
    out
}

/// Render the airport registry listing.
pub fn render_airports<'a>(
    airports: impl IntoIterator<Item = &'a Airport>,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<String> {
    let airports: Vec<&Airport> = airports.into_iter().collect();
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for airport in airports {
                let _ = writeln!(
                    out,
                    "{}{}{}  {:<12} {}{:>9.4}, {:>10.4}{}",
                    palette.white_bold,
                    airport.code,
                    palette.reset,
                    airport.name,
                    palette.gray,
                    airport.position.lat,
                    airport.position.lon,
                    palette.reset
                );
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&airports)?),
        OutputFormat::Geojson => {
            let features: Vec<_> = airports
                .iter()
                .map(|airport| {
                    serde_json::json!({
                        "type": "Feature",
                        "geometry": {
                            "type": "Point",
                            "coordinates": [airport.position.lon, airport.position.lat],
                        },
                        "properties": { "code": airport.code, "name": airport.name },
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "type": "FeatureCollection",
                "features": features,
            }))?)
        }
    }
}

/// Render a single-airport weather observation.
pub fn render_weather(
    airport: &Airport,
    observation: &WeatherObservation,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Geojson => {
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "airport": airport,
                "weather": observation,
            }))?)
        }
        OutputFormat::Text => Ok(format!(
            "{}{}{} ({}): {} | {}Penalty: +{:.0}%{}\n",
            palette.white_bold,
            airport.code,
            palette.reset,
            airport.name,
            observation.description,
            palette.penalty(observation.penalty),
            observation.penalty,
            palette.reset
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycargo_lib::{plan_route, AirportRegistry, RouteRequest, WeatherConfig, WeatherProvider};

    fn hkg_jfk() -> RouteResult {
        let weather = WeatherProvider::new(WeatherConfig::default()).unwrap();
        plan_route(
            AirportRegistry::builtin(),
            &weather,
            &RouteRequest::new("HKG", "JFK"),
        )
        .unwrap()
    }

    #[test]
    fn text_route_without_color_matches_library_summary() {
        let result = hkg_jfk();
        let text = render_route(&result, OutputFormat::Text, &ColorPalette::plain()).unwrap();
        assert_eq!(text.trim_end(), render_text(&result));
    }

    #[test]
    fn json_route_contains_path_and_fuel() {
        let text = render_route(&hkg_jfk(), OutputFormat::Json, &ColorPalette::plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["path"], serde_json::json!(["HKG", "JFK"]));
        assert_eq!(value["cruise_altitude"], 350);
        assert!(value["total_fuel_kg"].as_f64().unwrap() > 15_000.0);
    }

    #[test]
    fn colored_route_highlights_header_and_weather() {
        let result = hkg_jfk();
        let palette = ColorPalette::colored();
        let text = render_route(&result, OutputFormat::Text, &palette).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(header, format!("{}HKG → JFK{}", palette.white_bold, palette.reset));
        let start = text
            .lines()
            .find(|line| line.contains("Start Weather"))
            .unwrap();
        assert!(start.starts_with(palette.penalty(20.0)));
        assert!(start.ends_with(palette.reset));
        assert!(text.lines().any(|line| line == "Cruise altitude: FL350"));
    }

    #[test]
    fn airport_listing_has_one_line_per_airport() {
        let registry = AirportRegistry::builtin();
        let text =
            render_airports(registry.all(), OutputFormat::Text, &ColorPalette::plain()).unwrap();
        assert_eq!(text.lines().count(), registry.len());
        assert!(text.contains("FRA  Frankfurt"));
    }
}
