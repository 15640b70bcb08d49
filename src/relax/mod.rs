//! Relaxed planning graph fixpoint.
//!
//! Shared by the delete-relaxation and critical-path heuristics; only the
//! aggregation policy and the final aggregation over goals differ.

mod costs;
mod engine;

pub use costs::{propagate_action, propagate_axiom, FactCosts};
pub use engine::{relax, FixpointEngine, RelaxationOutcome, RoundOutcome};
