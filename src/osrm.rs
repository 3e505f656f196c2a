//! OSRM HTTP adapter for point-to-point legs.

use serde::Deserialize;

use crate::polyline::Polyline;
use crate::traits::{Leg, LegProvider, LegQueryError};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl LegProvider for OsrmClient {
    fn leg(&self, from: (f64, f64), to: (f64, f64)) -> Result<Leg, LegQueryError> {
        validate_coordinate(from)?;
        validate_coordinate(to)?;

        // OSRM takes lng,lat order on the wire.
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url, self.config.profile, from.1, from.0, to.1, to.0
        );

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        if body.code != "Ok" {
            return Err(LegQueryError::Provider(format!(
                "OSRM returned code {}",
                body.code
            )));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| LegQueryError::Provider("OSRM returned no routes".to_string()))?;

        let points = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| (lat, lng))
            .collect();

        Ok(Leg {
            distance_km: route.distance / 1000.0,
            duration_secs: route.duration,
            geometry: Polyline::new(points),
        })
    }
}

fn validate_coordinate((lat, lng): (f64, f64)) -> Result<(), LegQueryError> {
    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return Err(LegQueryError::MalformedCoordinates(format!(
            "({}, {}) is not a valid lat/lng pair",
            lat, lng
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: OsrmGeometry,
}

/// GeoJSON LineString, coordinates in (lng, lat) order.
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
