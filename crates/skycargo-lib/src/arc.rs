//! Polyline geometry for drawing a route on a map.

use crate::airports::AirportRegistry;
use crate::error::Result;
use crate::geo::{interpolate_arc, GeoPoint};

/// Expand consecutive positions into one great-circle polyline.
///
/// Each leg contributes `samples_per_segment` points, endpoints inclusive,
/// so the joint between two legs appears twice. Fewer than two positions
/// produce an empty polyline.
pub fn render_polyline(positions: &[GeoPoint], samples_per_segment: usize) -> Vec<GeoPoint> {
    positions
        .windows(2)
        .flat_map(|leg| interpolate_arc(leg[0], leg[1], samples_per_segment))
        .collect()
}

/// Render the polyline for a path of airport codes.
pub fn render_route_arc(
    registry: &AirportRegistry,
    path: &[String],
    samples_per_segment: usize,
) -> Result<Vec<GeoPoint>> {
    let positions = path
        .iter()
        .map(|code| registry.lookup(code).map(|airport| airport.position))
        .collect::<Result<Vec<_>>>()?;
    Ok(render_polyline(&positions, samples_per_segment))
}
