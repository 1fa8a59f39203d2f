//! Presentation helpers for planned routes.
//!
//! [`render_text`] produces the human-readable summary used by the CLI and
//! [`to_geojson`] produces a `FeatureCollection` for map front-ends.

use serde_json::{json, Value};

use crate::routing::RouteResult;
use crate::weather::WeatherObservation;

/// Format an integer with comma thousands separators.
///
/// ```
/// # use skycargo_lib::output::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(12968), "12,968");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn rounded(value: f64) -> String {
    format_with_separators(value.max(0.0).round() as u64)
}

fn weather_line(label: &str, code: &str, observation: &WeatherObservation) -> String {
    format!(
        "{label} Weather ({code}): {} | Penalty: +{:.0}%",
        observation.description, observation.penalty
    )
}

/// Render a route summary as plain text.
pub fn render_text(result: &RouteResult) -> String {
    let mut lines = Vec::new();
    lines.push(result.path.join(" → "));
    lines.push(format!(
        "Distance: {} km ({} leg{}; algorithm: {})",
        rounded(result.total_distance_km),
        result.hop_count(),
        if result.hop_count() == 1 { "" } else { "s" },
        result.algorithm
    ));
    lines.push(format!("Estimated fuel: {} kg", rounded(result.total_fuel_kg)));
    lines.push(format!("Cruise altitude: {}", result.cruise_altitude));

    if let (Some(origin), Some(destination)) = (result.path.first(), result.path.last()) {
        lines.push(weather_line("Start", origin, &result.origin_weather));
        lines.push(weather_line("End", destination, &result.destination_weather));
    }
    lines.push(format!(
        "Average weather penalty: +{:.0}%",
        result.avg_weather_penalty
    ));
    lines.join("\n")
}

/// Render a route as a GeoJSON `FeatureCollection`.
///
/// The arc becomes a `LineString` and each waypoint a `Point`. Coordinates
/// are emitted in GeoJSON `[lon, lat]` order.
pub fn to_geojson(result: &RouteResult) -> Value {
    let mut features = Vec::with_capacity(result.waypoints.len() + 1);

    let line: Vec<[f64; 2]> = result
        .arc
        .iter()
        .map(|point| [point.lon, point.lat])
        .collect();
    features.push(json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": line },
        "properties": {
            "route": result.path.join("-"),
            "distance_km": result.total_distance_km,
            "fuel_kg": result.total_fuel_kg,
            "avg_weather_penalty": result.avg_weather_penalty,
        },
    }));

    let last = result.waypoints.len().saturating_sub(1);
    for (index, waypoint) in result.waypoints.iter().enumerate() {
        let role = match index {
            0 => "origin",
            i if i == last => "destination",
            _ => "waypoint",
        };
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [waypoint.position.lon, waypoint.position.lat],
            },
            "properties": {
                "code": waypoint.code,
                "name": waypoint.name,
                "altitude": waypoint.altitude,
                "role": role,
            },
        }));
    }

    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::AirportRegistry;
    use crate::routing::{plan_route, RouteRequest};
    use crate::weather::{WeatherConfig, WeatherProvider};

    fn sample_route() -> RouteResult {
        let weather = WeatherProvider::new(WeatherConfig::default()).unwrap();
        plan_route(
            AirportRegistry::builtin(),
            &weather,
            &RouteRequest::new("HKG", "JFK"),
        )
        .unwrap()
    }

    #[test]
    fn separators_are_inserted_every_three_digits() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(1000), "1,000");
        assert_eq!(format_with_separators(100000), "100,000");
    }

    #[test]
    fn text_summary_lists_route_and_weather() {
        let text = render_text(&sample_route());
        assert!(text.starts_with("HKG → JFK"));
        assert!(text.contains("12,969 km"));
        assert!(text.contains("FL350"));
        assert!(text.contains("Start Weather (HKG): Simulated | Penalty: +20%"));
        assert!(text.contains("End Weather (JFK): Simulated | Penalty: +20%"));
        assert!(text.contains("Average weather penalty: +20%"));
    }

    #[test]
    fn penalties_are_rounded_to_whole_percent() {
        let weather = WeatherProvider::new(WeatherConfig::default()).unwrap();
        let route = plan_route(
            AirportRegistry::builtin(),
            &weather,
            &RouteRequest {
                base_weather_severity: 12.4,
                ..RouteRequest::new("SIN", "FRA")
            },
        )
        .unwrap();

        let text = render_text(&route);
        assert!(text.contains("Start Weather (SIN): Simulated | Penalty: +12%"));
        assert!(text.contains("Average weather penalty: +12%"));
        assert!(!text.contains("12.4"));
    }

    #[test]
    fn geojson_uses_lon_lat_order() {
        let route = sample_route();
        let value = to_geojson(&route);
        assert_eq!(value["type"], "FeatureCollection");

        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["geometry"]["type"], "LineString");
        let coordinates = features[0]["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coordinates.len(), route.arc.len());

        let origin = &features[1];
        assert_eq!(origin["properties"]["code"], "HKG");
        assert_eq!(origin["properties"]["role"], "origin");
        assert_eq!(origin["properties"]["altitude"], "FL350");
        assert_eq!(origin["geometry"]["coordinates"][0], 113.9365);
        assert_eq!(features[2]["properties"]["role"], "destination");
    }
}
