//! Cost matrix construction from pairwise leg queries.

use rayon::prelude::*;
use tracing::debug;

use crate::traits::{LegProvider, LegQueryError, Waypoint};

/// Builds the symmetric pairwise distance matrix for the waypoint set.
///
/// Each unordered pair is queried once and mirrored into both cells, so a
/// build issues N(N-1)/2 leg queries. Pair queries are independent and run
/// in parallel; the aggregate is identical to a sequential build.
///
/// Any failed leg aborts the whole build: a matrix with missing entries
/// would silently corrupt the solver's optimum.
pub fn build_matrix<W, P>(provider: &P, waypoints: &[W]) -> Result<Vec<Vec<f64>>, LegQueryError>
where
    W: Waypoint + Sync,
    P: LegProvider + Sync,
{
    let n = waypoints.len();
    let mut matrix = vec![vec![0.0; n]; n];
    if n < 2 {
        return Ok(matrix);
    }

    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }

    let costs = pairs
        .par_iter()
        .map(|&(i, j)| {
            let leg = provider.leg(waypoints[i].location(), waypoints[j].location())?;
            Ok((i, j, leg.distance_km))
        })
        .collect::<Result<Vec<_>, LegQueryError>>()?;

    for (i, j, distance_km) in costs {
        matrix[i][j] = distance_km;
        matrix[j][i] = distance_km;
    }

    debug!(waypoints = n, legs = pairs.len(), "cost matrix built");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::Polyline;
    use crate::traits::Leg;

    struct Stop {
        id: u32,
        location: (f64, f64),
    }

    impl Waypoint for Stop {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn location(&self) -> (f64, f64) {
            self.location
        }
    }

    struct ManhattanProvider;

    impl LegProvider for ManhattanProvider {
        fn leg(&self, from: (f64, f64), to: (f64, f64)) -> Result<Leg, LegQueryError> {
            let distance_km = (from.0 - to.0).abs() + (from.1 - to.1).abs();
            Ok(Leg {
                distance_km,
                duration_secs: distance_km * 60.0,
                geometry: Polyline::new(vec![from, to]),
            })
        }
    }

    fn stops(locations: &[(f64, f64)]) -> Vec<Stop> {
        locations
            .iter()
            .enumerate()
            .map(|(i, &location)| Stop { id: i as u32, location })
            .collect()
    }

    #[test]
    fn test_trivial_inputs_issue_no_queries() {
        let matrix = build_matrix(&ManhattanProvider, &stops(&[])).unwrap();
        assert!(matrix.is_empty());

        let matrix = build_matrix(&ManhattanProvider, &stops(&[(1.0, 1.0)])).unwrap();
        assert_eq!(matrix, vec![vec![0.0]]);
    }

    #[test]
    fn test_symmetric_with_zero_diagonal() {
        let waypoints = stops(&[(0.0, 0.0), (1.0, 0.0), (1.0, 2.0)]);
        let matrix = build_matrix(&ManhattanProvider, &waypoints).unwrap();

        for i in 0..3 {
            assert_eq!(matrix[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
        assert_eq!(matrix[0][1], 1.0);
        assert_eq!(matrix[0][2], 3.0);
        assert_eq!(matrix[1][2], 2.0);
    }
}
