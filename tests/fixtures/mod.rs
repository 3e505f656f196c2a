//! Test fixtures for tour-planner.
//!
//! Real Boston-area locations (from OpenStreetMap) for realistic waypoint
//! sets.

pub mod boston_locations;

pub use boston_locations::*;
