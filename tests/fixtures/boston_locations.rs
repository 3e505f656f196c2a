//! Real Boston-area locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. These are real, routable
//! locations that work with OSRM Massachusetts data.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Downtown and nearby landmarks, spread enough that leg costs differ.
pub const LANDMARKS: &[Location] = &[
    Location::new("Boston Common", 42.3550, -71.0656),
    Location::new("Faneuil Hall", 42.3600, -71.0568),
    Location::new("Fenway Park", 42.3467, -71.0972),
    Location::new("Bunker Hill Monument", 42.3764, -71.0608),
    Location::new("Museum of Fine Arts", 42.3394, -71.0940),
    Location::new("Harvard Square", 42.3732, -71.1190),
    Location::new("Castle Island", 42.3376, -71.0108),
];
