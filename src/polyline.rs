//! Polyline representation for leg and route geometries.
//!
//! Stores decoded coordinate sequences directly. Encoding to/from compact
//! wire formats happens at API boundaries (when receiving from OSRM or
//! handing the stitched route to a consumer), not inside the core.

use serde::{Deserialize, Serialize};

/// A route geometry as a decoded (lat, lng) point sequence.
///
/// Legs stitched in tour order concatenate into a single polyline covering
/// the whole route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a polyline from decoded (lat, lng) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// A polyline with no points.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends another polyline's points, preserving order.
    pub fn extend_from(&mut self, other: &Polyline) {
        self.points.extend_from_slice(&other.points);
    }
}
