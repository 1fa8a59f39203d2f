//! Great-circle primitives on a spherical Earth.
//!
//! Distances use the haversine formula; arc sampling uses spherical linear
//! interpolation (slerp) between Cartesian unit vectors so that every sample
//! lies exactly on the great circle through both endpoints.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default number of samples generated per route segment.
pub const DEFAULT_ARC_SAMPLES: usize = 50;

/// Angles below this (radians) are treated as coincident points.
const COINCIDENT_EPSILON: f64 = 1e-12;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(*self, *other)
    }

    fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    fn from_unit_vector(v: [f64; 3]) -> Self {
        let [x, y, z] = v;
        let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
        let lon = y.atan2(x).to_degrees();
        Self { lat, lon }
    }
}

/// Haversine great-circle distance in kilometres.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h marginally outside [0, 1] for near-antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sample `steps` points along the great circle from `a` to `b`, endpoints
/// inclusive.
///
/// `steps == 1` yields only `a`; `steps == 0` yields nothing. Identical
/// endpoints yield `steps` copies of `a`.
pub fn interpolate_arc(a: GeoPoint, b: GeoPoint, steps: usize) -> Vec<GeoPoint> {
    match steps {
        0 => return Vec::new(),
        1 => return vec![a],
        _ => {}
    }

    let va = a.to_unit_vector();
    let vb = b.to_unit_vector();
    let omega = dot(va, vb).clamp(-1.0, 1.0).acos();

    if omega < COINCIDENT_EPSILON {
        return vec![a; steps];
    }

    let last = (steps - 1) as f64;
    let sin_omega = omega.sin();

    if sin_omega < COINCIDENT_EPSILON {
        // Antipodal endpoints: any great circle through both works, so pick
        // the one through a vector orthogonal to `a`.
        let axis = orthogonal_unit(va);
        return (0..steps)
            .map(|i| {
                let theta = std::f64::consts::PI * i as f64 / last;
                let v = add(scale(va, theta.cos()), scale(axis, theta.sin()));
                GeoPoint::from_unit_vector(v)
            })
            .collect();
    }

    (0..steps)
        .map(|i| {
            let t = i as f64 / last;
            let wa = ((1.0 - t) * omega).sin() / sin_omega;
            let wb = (t * omega).sin() / sin_omega;
            GeoPoint::from_unit_vector(add(scale(va, wa), scale(vb, wb)))
        })
        .collect()
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn scale(v: [f64; 3], k: f64) -> [f64; 3] {
    [v[0] * k, v[1] * k, v[2] * k]
}

fn orthogonal_unit(v: [f64; 3]) -> [f64; 3] {
    // Cross with whichever basis axis is least aligned with v.
    let basis = if v[2].abs() < 0.9 {
        [0.0, 0.0, 1.0]
    } else {
        [1.0, 0.0, 0.0]
    };
    let c = [
        v[1] * basis[2] - v[2] * basis[1],
        v[2] * basis[0] - v[0] * basis[2],
        v[0] * basis[1] - v[1] * basis[0],
    ];
    let norm = dot(c, c).sqrt();
    scale(c, 1.0 / norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HKG: GeoPoint = GeoPoint::new(22.3193, 113.9365);
    const JFK: GeoPoint = GeoPoint::new(40.6413, -73.7781);

    #[test]
    fn hkg_to_jfk_distance_is_about_12980_km() {
        let d = distance_km(HKG, JFK);
        assert!((d - 12_980.0).abs() / 12_980.0 < 0.01, "distance was {d}");
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_km(HKG, HKG), 0.0);
    }

    #[test]
    fn arc_endpoints_are_inclusive() {
        let arc = interpolate_arc(HKG, JFK, 50);
        assert_eq!(arc.len(), 50);
        let first = arc.first().unwrap();
        let last = arc.last().unwrap();
        assert!(distance_km(*first, HKG) < 1e-6);
        assert!(distance_km(*last, JFK) < 1e-6);
    }

    #[test]
    fn arc_samples_lie_on_the_great_circle() {
        let total = distance_km(HKG, JFK);
        for point in interpolate_arc(HKG, JFK, 20) {
            let via = distance_km(HKG, point) + distance_km(point, JFK);
            assert!((via - total).abs() < 1e-6, "sample {point:?} off the arc");
        }
    }

    #[test]
    fn arc_samples_are_evenly_spaced() {
        let arc = interpolate_arc(HKG, JFK, 11);
        let expected = distance_km(HKG, JFK) / 10.0;
        for pair in arc.windows(2) {
            let step = distance_km(pair[0], pair[1]);
            assert!((step - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn identical_points_yield_copies() {
        let arc = interpolate_arc(HKG, HKG, 7);
        assert_eq!(arc, vec![HKG; 7]);
    }

    #[test]
    fn degenerate_step_counts() {
        assert!(interpolate_arc(HKG, JFK, 0).is_empty());
        assert_eq!(interpolate_arc(HKG, JFK, 1), vec![HKG]);
    }

    #[test]
    fn antipodal_arc_reaches_the_far_side() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let arc = interpolate_arc(a, b, 5);
        assert_eq!(arc.len(), 5);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance_km(a, arc[4]) - half).abs() < 1e-6);
        assert!((distance_km(a, arc[2]) - half / 2.0).abs() < 1e-6);
    }
}
