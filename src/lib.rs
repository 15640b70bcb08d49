//! # relaxed_heuristics - cost-to-goal estimates for classical planners
//!
//! The heuristic core of a STRIPS/PDDL-style planner. Given a grounded
//! domain, a goal and a state, it answers "how far is the goal from here"
//! for a best-first search loop. It never searches itself.
//!
//! ## Core Concepts
//!
//! - **Fact**: a ground proposition with structural identity
//! - **Delete relaxation**: actions only add facts, so reachability is monotone
//! - **Fixpoint engine**: propagates minimal relaxed costs until the goal holds
//!   or nothing changes
//! - **Estimators**: zero, goal count, h_add / h_max and h^m (m ≤ 3)
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use relaxed_heuristics::{
//!     Action, Cost, Domain, Fact, GroundedProblem, Heuristic, HeuristicKind, State,
//! };
//!
//! let a: Fact = "(a)".parse().unwrap();
//! let b: Fact = "(b)".parse().unwrap();
//! let problem = GroundedProblem::new(
//!     Domain::new(vec![Action::strips("act1", [a.clone()], [b.clone()], [])], vec![]),
//!     State::new([a.clone()]),
//!     vec![b],
//! );
//!
//! let mut h = HeuristicKind::from_key("delete_relaxation/h_max")
//!     .build(Arc::new(problem))
//!     .unwrap();
//! assert_eq!(h.compute(&State::new([a])).unwrap(), Cost::ONE);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Planning data
pub mod domain;
pub mod error;
pub mod fact;
pub mod planner;
pub mod state;

// Relaxation
pub mod cost;
pub mod precompute;
pub mod relax;

// Estimators
pub mod heuristic;
pub mod registry;

// Re-export primary types at crate root for convenience
pub use cost::{AggregationPolicy, Cost};
pub use domain::{Action, Axiom, Domain, Effect, EffectDiff, EffectItem};
pub use error::{DomainError, HeuristicError, HeuristicResult, ValidationError};
pub use fact::{Fact, Literal};
pub use heuristic::{
    CriticalPathHeuristic, DeleteRelaxationHeuristic, GoalCountHeuristic, Heuristic, ZeroHeuristic,
};
pub use planner::{GroundedProblem, PlanningContext};
pub use precompute::{DomainCache, LazyDomainCache, RelaxedAxiom};
pub use registry::{AnyHeuristic, HeuristicConfig, HeuristicKind};
pub use relax::{relax, FactCosts, FixpointEngine, RelaxationOutcome, RoundOutcome};
pub use state::{State, TypeContext};
