//! Heuristic estimators.
//!
//! Every estimator answers one question for the search loop: how far is
//! this state from the goal. [`Cost::INFINITY`] marks a dead end.

mod basic;
mod critical_path;
mod delete_relaxation;

pub use basic::{GoalCountHeuristic, ZeroHeuristic};
pub use critical_path::CriticalPathHeuristic;
pub use delete_relaxation::DeleteRelaxationHeuristic;

use crate::cost::Cost;
use crate::error::HeuristicResult;
use crate::state::State;

/// A cost-to-goal estimator.
///
/// Instances are single-threaded; give each search worker its own.
pub trait Heuristic {
    /// Estimate the remaining cost from `state`.
    ///
    /// # Errors
    /// Only fails if the domain turns out to be malformed.
    fn compute(&mut self, state: &State) -> HeuristicResult<Cost>;

    /// Registry key of this estimator, e.g. `delete_relaxation/h_add`.
    fn name(&self) -> String;
}
