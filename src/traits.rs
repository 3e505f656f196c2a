//! Core domain traits for the route optimizer.
//!
//! These are intentionally minimal and domain-agnostic. Concrete apps should
//! implement them for their own data models.

use std::fmt;
use std::hash::Hash;

use crate::polyline::Polyline;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A stop selected by the user to be visited on the route.
///
/// The core only ever reads identity and position; any display metadata
/// lives in the implementing type.
pub trait Waypoint {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng).
    fn location(&self) -> (f64, f64);
}

/// A routed segment between two waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Travel distance in kilometers.
    pub distance_km: f64,
    /// Travel time in seconds.
    pub duration_secs: f64,
    /// Path between the two endpoints, as (lat, lng) points.
    pub geometry: Polyline,
}

/// Provides point-to-point legs from an external routing service.
///
/// This is the only suspension point in the pipeline; everything else is
/// pure computation over the returned legs.
pub trait LegProvider {
    fn leg(&self, from: (f64, f64), to: (f64, f64)) -> Result<Leg, LegQueryError>;
}

impl<P: LegProvider + ?Sized> LegProvider for &P {
    fn leg(&self, from: (f64, f64), to: (f64, f64)) -> Result<Leg, LegQueryError> {
        (**self).leg(from, to)
    }
}

/// A single leg query failed.
#[derive(Debug)]
pub enum LegQueryError {
    /// Transport-level failure reaching the provider.
    Http(reqwest::Error),
    /// The provider answered but refused or returned no usable route.
    Provider(String),
    /// Coordinates outside valid lat/lng ranges, or non-finite.
    MalformedCoordinates(String),
}

impl From<reqwest::Error> for LegQueryError {
    fn from(err: reqwest::Error) -> Self {
        LegQueryError::Http(err)
    }
}

impl fmt::Display for LegQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegQueryError::Http(err) => write!(f, "leg query transport error: {}", err),
            LegQueryError::Provider(msg) => write!(f, "routing provider error: {}", msg),
            LegQueryError::MalformedCoordinates(msg) => {
                write!(f, "malformed coordinates: {}", msg)
            }
        }
    }
}

impl std::error::Error for LegQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LegQueryError::Http(err) => Some(err),
            _ => None,
        }
    }
}
