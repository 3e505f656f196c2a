//! Exact TSP solver over a pairwise cost matrix.
//!
//! Bitmask dynamic programming: state is (visited set, current position),
//! memoized in an `N x 2^N` table. Exact for the small interactive waypoint
//! counts this crate targets; there is deliberately no heuristic fallback
//! for larger N.

use std::fmt;

/// Hard ceiling on solvable matrix size.
///
/// The memo table holds `N * 2^N` entries, so the method stops being
/// interactive well before memory runs out. 16 keeps the table under a few
/// tens of megabytes.
pub const MAX_WAYPOINTS: usize = 16;

/// An optimal closed tour over the matrix index space.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Cost of the full cycle, including the closing leg back to index 0.
    pub total_cost: f64,
    /// Visiting order of length N+1, starting and ending at index 0, with
    /// every index appearing exactly once in between.
    pub order: Vec<usize>,
}

/// Contract violation in the input handed to the solver or assembler.
///
/// These indicate orchestration bugs (a missing N<2 gate, a tour replayed
/// against a newer waypoint set), never recoverable runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    MatrixTooSmall { size: usize },
    MatrixTooLarge { size: usize, max: usize },
    MatrixNotSquare { row: usize, len: usize, size: usize },
    TourMismatch { tour_len: usize, waypoint_count: usize },
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::MatrixTooSmall { size } => {
                write!(f, "cost matrix of size {} has no tour to solve", size)
            }
            PreconditionError::MatrixTooLarge { size, max } => {
                write!(f, "cost matrix of size {} exceeds the solver ceiling {}", size, max)
            }
            PreconditionError::MatrixNotSquare { row, len, size } => {
                write!(f, "cost matrix row {} has {} entries, expected {}", row, len, size)
            }
            PreconditionError::TourMismatch { tour_len, waypoint_count } => {
                write!(
                    f,
                    "tour of length {} does not fit {} waypoints",
                    tour_len, waypoint_count
                )
            }
        }
    }
}

impl std::error::Error for PreconditionError {}

/// Solves the minimum-cost Hamiltonian cycle starting and ending at index 0.
///
/// Deterministic: equal-cost alternatives resolve to the lowest city index,
/// because the scan keeps only the first strict improvement.
pub fn solve(matrix: &[Vec<f64>]) -> Result<Tour, PreconditionError> {
    let n = matrix.len();
    if n < 2 {
        return Err(PreconditionError::MatrixTooSmall { size: n });
    }
    if n > MAX_WAYPOINTS {
        return Err(PreconditionError::MatrixTooLarge { size: n, max: MAX_WAYPOINTS });
    }
    for (row, costs) in matrix.iter().enumerate() {
        if costs.len() != n {
            return Err(PreconditionError::MatrixNotSquare { row, len: costs.len(), size: n });
        }
    }

    let full: u32 = (1 << n) - 1;
    let mut memo: Vec<Vec<Option<f64>>> = vec![vec![None; 1 << n]; n];

    // Start at city 0 with only city 0 visited.
    let total_cost = best_cost(matrix, &mut memo, 1, 0, full);
    let order = reconstruct(matrix, &memo, full, n);

    Ok(Tour { total_cost, order })
}

/// Cost to finish a tour that has visited exactly `mask`, stands at `pos`,
/// and eventually returns to city 0.
fn best_cost(
    matrix: &[Vec<f64>],
    memo: &mut [Vec<Option<f64>>],
    mask: u32,
    pos: usize,
    full: u32,
) -> f64 {
    if mask == full {
        return matrix[pos][0];
    }
    if let Some(cost) = memo[pos][mask as usize] {
        return cost;
    }

    let mut best = f64::INFINITY;
    for city in 0..matrix.len() {
        if mask & (1 << city) == 0 {
            let cost = matrix[pos][city] + best_cost(matrix, memo, mask | (1 << city), city, full);
            if cost < best {
                best = cost;
            }
        }
    }

    memo[pos][mask as usize] = Some(best);
    best
}

/// Walks the populated memo table forward to recover the visiting order.
fn reconstruct(matrix: &[Vec<f64>], memo: &[Vec<Option<f64>>], full: u32, n: usize) -> Vec<usize> {
    let mut mask: u32 = 1;
    let mut pos = 0;
    let mut order = Vec::with_capacity(n + 1);
    order.push(0);

    while mask != full {
        let mut best = f64::INFINITY;
        let mut best_city = 0;
        for city in 0..n {
            if mask & (1 << city) != 0 {
                continue;
            }
            let next_mask = mask | (1 << city);
            // Full-mask states are base cases and never memoized.
            let tail = if next_mask == full {
                matrix[city][0]
            } else {
                memo[city][next_mask as usize].unwrap_or(f64::INFINITY)
            };
            let cost = matrix[pos][city] + tail;
            if cost < best {
                best = cost;
                best_city = city;
            }
        }

        order.push(best_city);
        mask |= 1 << best_city;
        pos = best_city;
    }

    // Close the cycle.
    order.push(0);
    order
}
