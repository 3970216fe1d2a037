//! Great-circle distance on a spherical earth and human-readable lengths.

use crate::models::Coordinate;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points, in meters.
///
/// The intermediate term is clamped to `[0, 1]` so near-antipodal points
/// never yield `NaN` from rounding.
///
/// ```
/// use pipegeo_core::{distance, Coordinate};
///
/// let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
/// assert!((d - 111_195.0).abs() < 1_112.0);
/// ```
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Format a length for display.
///
/// Values of 1000 m or more render in kilometers with two decimals,
/// smaller values as whole meters.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn test_identity_is_zero() {
        let p = Coordinate::new(32.0853, 34.7818);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_longitude_at_equator() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!(approx(d, 111_195.0, 111_195.0 * 0.01), "got {}", d);
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!(approx(d, 111_195.0, 111_195.0 * 0.01), "got {}", d);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(32.0853, 34.7818);
        let b = Coordinate::new(32.1093, 34.8555);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_antipodal_is_finite() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!(d.is_finite());
        assert!(approx(d, std::f64::consts::PI * EARTH_RADIUS_M, 1.0));
    }

    #[test]
    fn test_longitude_is_irrelevant_at_pole() {
        let d = distance(Coordinate::new(90.0, 0.0), Coordinate::new(90.0, 123.0));
        assert!(d < 1e-3, "got {}", d);
        let south = distance(Coordinate::new(-90.0, -45.0), Coordinate::new(-90.0, 170.0));
        assert!(south < 1e-3, "got {}", south);
    }

    #[test]
    fn test_pole_to_pole() {
        let d = distance(Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0));
        assert!(approx(d, std::f64::consts::PI * EARTH_RADIUS_M, 1.0), "got {}", d);
    }

    #[test]
    fn test_short_hop_across_antimeridian() {
        let east = Coordinate::new(10.0, 179.9);
        let west = Coordinate::new(10.0, -179.9);
        let d = distance(east, west);
        assert!(approx(d, 21_900.0, 100.0), "got {}", d);
        assert_eq!(d, distance(west, east));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
        assert_eq!(format_distance(1234.567), "1.23 km");
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(42.6), "43 m");
    }

    #[test]
    fn test_format_just_below_threshold_rounds_up_in_meters() {
        // Not yet a kilometer, so it stays in meters even after rounding.
        assert_eq!(format_distance(999.6), "1000 m");
    }
}
