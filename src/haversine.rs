//! Haversine leg provider (fallback when OSRM is unavailable).
//!
//! Estimates legs from great-circle distance and an assumed speed. Less
//! accurate than a road network (the geometry is a straight segment) but
//! always available, which also makes it the natural provider for tests.

use crate::polyline::Polyline;
use crate::traits::{Leg, LegProvider, LegQueryError};

/// Average driving speed assumption for duration estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle leg provider.
#[derive(Debug, Clone)]
pub struct HaversineProvider {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineProvider {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineProvider {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Haversine distance between two (lat, lng) points in kilometers.
    fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

impl LegProvider for HaversineProvider {
    fn leg(&self, from: (f64, f64), to: (f64, f64)) -> Result<Leg, LegQueryError> {
        let distance_km = Self::haversine_km(from, to);
        let duration_secs = distance_km / self.speed_kmh * 3600.0;

        Ok(Leg {
            distance_km,
            duration_secs,
            geometry: Polyline::new(vec![from, to]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let dist = HaversineProvider::haversine_km((42.36, -71.06), (42.36, -71.06));
        assert!(dist < 0.001, "same point should have ~0 distance");
    }

    #[test]
    fn test_known_distance() {
        // Boston (42.3601, -71.0589) to New York (40.7128, -74.0060),
        // great-circle distance ~306 km.
        let dist = HaversineProvider::haversine_km((42.3601, -71.0589), (40.7128, -74.0060));
        assert!(dist > 290.0 && dist < 320.0, "Boston to NYC should be ~306km, got {}", dist);
    }

    #[test]
    fn test_leg_is_symmetric() {
        let provider = HaversineProvider::default();
        let a = (42.3601, -71.0589);
        let b = (42.3554, -71.0640);
        let forward = provider.leg(a, b).unwrap();
        let reverse = provider.leg(b, a).unwrap();
        assert_eq!(forward.distance_km, reverse.distance_km);
    }

    #[test]
    fn test_duration_from_speed() {
        let provider = HaversineProvider::new(40.0);
        // Pick two points ~1 degree of latitude apart (~111 km); duration
        // should be distance / 40 km/h.
        let leg = provider.leg((42.0, -71.0), (43.0, -71.0)).unwrap();
        let expected = leg.distance_km / 40.0 * 3600.0;
        assert!((leg.duration_secs - expected).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_is_straight_segment() {
        let provider = HaversineProvider::default();
        let leg = provider.leg((42.0, -71.0), (43.0, -72.0)).unwrap();
        assert_eq!(leg.geometry.points(), &[(42.0, -71.0), (43.0, -72.0)]);
    }
}
