//! Orchestration: waypoint-set changes drive matrix build, solve, and
//! assembly, with generation-tagged publication.
//!
//! Every effective waypoint mutation bumps a generation counter and reruns
//! the pipeline against a snapshot of the set. Publication is
//! last-writer-wins: output tagged with a stale generation is discarded, so
//! a published result never mixes waypoint sets.

use std::fmt;

use tracing::{debug, warn};

use crate::assembler::{self, RouteResult};
use crate::matrix;
use crate::solver::{self, PreconditionError};
use crate::traits::{LegProvider, LegQueryError, Waypoint};

/// Why a pipeline run aborted without publishing.
#[derive(Debug)]
pub enum PipelineError {
    /// A leg query failed while building the cost matrix. No partial matrix
    /// is ever fed to the solver.
    LegQuery(LegQueryError),
    /// The solver or assembler rejected its input; indicates a gating bug
    /// or a waypoint count above the solver ceiling.
    Precondition(PreconditionError),
}

impl From<LegQueryError> for PipelineError {
    fn from(err: LegQueryError) -> Self {
        PipelineError::LegQuery(err)
    }
}

impl From<PreconditionError> for PipelineError {
    fn from(err: PreconditionError) -> Self {
        PipelineError::Precondition(err)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::LegQuery(err) => write!(f, "matrix build aborted: {}", err),
            PipelineError::Precondition(err) => write!(f, "pipeline contract violated: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::LegQuery(err) => Some(err),
            PipelineError::Precondition(err) => Some(err),
        }
    }
}

/// One full pipeline pass: cost matrix, exact solve, leg-by-leg assembly.
///
/// Fewer than two waypoints short-circuits to the empty result without
/// touching the provider.
pub fn run_route<W, P>(provider: &P, waypoints: &[W]) -> Result<RouteResult<W::Id>, PipelineError>
where
    W: Waypoint + Sync,
    P: LegProvider + Sync,
{
    if waypoints.len() < 2 {
        return Ok(RouteResult::empty());
    }

    let matrix = matrix::build_matrix(provider, waypoints)?;
    let tour = solver::solve(&matrix)?;
    let result = assembler::assemble(provider, waypoints, &tour)?;
    Ok(result)
}

/// Owns the waypoint set and the single published route result.
///
/// The embedded reactive mode (`add_waypoint`/`remove_waypoint`) runs the
/// pipeline synchronously on each effective mutation. Callers that run
/// passes on worker threads instead take a `snapshot()` and hand the tagged
/// output back through `publish()`.
pub struct RoutePipeline<W: Waypoint, P> {
    provider: P,
    waypoints: Vec<W>,
    generation: u64,
    published: RouteResult<W::Id>,
}

impl<W, P> RoutePipeline<W, P>
where
    W: Waypoint + Sync,
    P: LegProvider + Sync,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            waypoints: Vec::new(),
            generation: 0,
            published: RouteResult::empty(),
        }
    }

    pub fn waypoints(&self) -> &[W] {
        &self.waypoints
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The most recently published route result.
    pub fn published(&self) -> &RouteResult<W::Id> {
        &self.published
    }

    /// Adds a waypoint and reruns. Duplicate ids are no-ops.
    pub fn add_waypoint(&mut self, waypoint: W) {
        if self.waypoints.iter().any(|w| w.id() == waypoint.id()) {
            return;
        }
        self.waypoints.push(waypoint);
        self.rerun();
    }

    /// Removes a waypoint by id and reruns. Unknown ids are no-ops.
    pub fn remove_waypoint(&mut self, id: &W::Id) {
        let before = self.waypoints.len();
        self.waypoints.retain(|w| w.id() != id);
        if self.waypoints.len() != before {
            self.rerun();
        }
    }

    /// Snapshot of the waypoint set tagged with the current generation, for
    /// runs executed off the mutating thread.
    pub fn snapshot(&self) -> (u64, Vec<W>)
    where
        W: Clone,
    {
        (self.generation, self.waypoints.clone())
    }

    /// Publishes the output of the run tagged `generation`.
    ///
    /// Returns false and leaves the current result in place when a newer
    /// waypoint-set change has superseded that run.
    pub fn publish(&mut self, generation: u64, result: RouteResult<W::Id>) -> bool {
        if generation < self.generation {
            debug!(run = generation, current = self.generation, "discarding stale route result");
            return false;
        }
        self.published = result;
        true
    }

    fn rerun(&mut self) {
        self.generation += 1;
        let generation = self.generation;

        match run_route(&self.provider, &self.waypoints) {
            Ok(result) => {
                self.publish(generation, result);
            }
            Err(err) => {
                // Previously published result stays in place.
                warn!(run = generation, error = %err, "route run aborted");
            }
        }
    }
}
