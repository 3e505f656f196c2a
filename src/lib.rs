//! tour-planner core
//!
//! Exact route ordering over small waypoint sets: pairwise leg costs from a
//! routing provider, bitmask-DP TSP, and leg-by-leg path assembly.

pub mod traits;
pub mod solver;
pub mod matrix;
pub mod assembler;
pub mod pipeline;
pub mod osrm;
pub mod osrm_data;
pub mod haversine;
pub mod polyline;
