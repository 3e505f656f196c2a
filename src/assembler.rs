//! Route assembly: re-query the solved order leg by leg and stitch the
//! geometries into one path.

use tracing::warn;

use crate::polyline::Polyline;
use crate::solver::{PreconditionError, Tour};
use crate::traits::{LegProvider, Waypoint};

/// The published artifact of one full pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult<Id> {
    /// Waypoint identities in visiting order (each waypoint once).
    pub order: Vec<Id>,
    /// All successfully retrieved leg geometries, concatenated in tour order.
    pub geometry: Polyline,
    /// Sum of the successfully retrieved leg durations, in seconds.
    pub total_duration_secs: f64,
    /// Optimal closed-cycle cost from the solver, in kilometers. Includes
    /// the closing leg back to the start even though the stitched path is
    /// open; see `assemble`.
    pub total_cost_km: f64,
}

impl<Id> RouteResult<Id> {
    /// The cleared result published while fewer than two waypoints exist.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            geometry: Polyline::empty(),
            total_duration_secs: 0.0,
            total_cost_km: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Stitches the solved tour into a route result.
///
/// Only the N-1 outward legs are queried and stitched: users want a path
/// through their stops, not a forced return to the first one, so the
/// closing leg stays in `total_cost_km` but contributes no geometry and no
/// duration.
///
/// A failed leg query is logged and skipped; assembly is best-effort and
/// the remaining legs still make it into the result.
pub fn assemble<W, P>(
    provider: &P,
    waypoints: &[W],
    tour: &Tour,
) -> Result<RouteResult<W::Id>, PreconditionError>
where
    W: Waypoint,
    P: LegProvider,
{
    let n = waypoints.len();
    if tour.order.len() != n + 1 || tour.order.iter().any(|&idx| idx >= n) {
        // A tour from an earlier waypoint generation must never be replayed.
        return Err(PreconditionError::TourMismatch {
            tour_len: tour.order.len(),
            waypoint_count: n,
        });
    }

    let mut geometry = Polyline::empty();
    let mut total_duration_secs = 0.0;

    for window in tour.order[..n].windows(2) {
        let (from_idx, to_idx) = (window[0], window[1]);
        let from = waypoints[from_idx].location();
        let to = waypoints[to_idx].location();

        match provider.leg(from, to) {
            Ok(leg) => {
                geometry.extend_from(&leg.geometry);
                total_duration_secs += leg.duration_secs;
            }
            Err(err) => {
                warn!(from = from_idx, to = to_idx, error = %err, "leg query failed, skipping leg");
            }
        }
    }

    let order = tour.order[..n]
        .iter()
        .map(|&idx| waypoints[idx].id().clone())
        .collect();

    Ok(RouteResult {
        order,
        geometry,
        total_duration_secs,
        total_cost_km: tour.total_cost,
    })
}
