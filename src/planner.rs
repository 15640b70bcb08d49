//! The planner-facing seam.
//!
//! Heuristics never search. They ask the surrounding planner for the
//! domain, the goal, applicable actions and goal tests through
//! [`PlanningContext`]. [`GroundedProblem`] is the in-memory reference
//! implementation used by embedded planners and tests.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, Domain};
use crate::fact::{Fact, Literal};
use crate::state::State;

/// Read-only view of the planning problem.
///
/// Implementations must be cheap to share: every heuristic instance holds
/// an `Arc` to its context.
pub trait PlanningContext: Send + Sync {
    /// Grounded domain.
    fn domain(&self) -> &Domain;

    /// Goal facts, in declaration order.
    fn goals(&self) -> &[Fact];

    /// Actions whose precondition holds in `state`.
    fn available_actions<'a>(&'a self, state: &State) -> Vec<&'a Action>;

    /// Returns true if every goal fact holds in `state`.
    fn satisfies(&self, goals: &[Fact], state: &State) -> bool {
        goals.iter().all(|g| self.state_has_term(state, g))
    }

    /// Single-fact membership test.
    fn state_has_term(&self, state: &State, fact: &Fact) -> bool {
        state.has_fact(fact)
    }
}

fn literal_holds(state: &State, literal: &Literal) -> bool {
    state.has_fact(&literal.fact) == literal.positive
}

/// A fully grounded problem held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundedProblem {
    /// Grounded actions and axioms.
    pub domain: Domain,

    /// Initial state.
    #[serde(default)]
    pub init: State,

    /// Goal facts.
    #[serde(default)]
    pub goals: Vec<Fact>,
}

impl GroundedProblem {
    /// Create a problem.
    #[must_use]
    pub fn new(domain: Domain, init: State, goals: Vec<Fact>) -> Self {
        Self { domain, init, goals }
    }

    /// Returns true if `action` is applicable in `state`.
    #[must_use]
    pub fn is_applicable(action: &Action, state: &State) -> bool {
        action.precondition.iter().all(|l| literal_holds(state, l))
    }
}

impl PlanningContext for GroundedProblem {
    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn goals(&self) -> &[Fact] {
        &self.goals
    }

    fn available_actions<'a>(&'a self, state: &State) -> Vec<&'a Action> {
        self.domain
            .actions
            .iter()
            .filter(|a| Self::is_applicable(a, state))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(s: &str) -> Fact {
        s.parse().unwrap()
    }

    fn problem() -> GroundedProblem {
        let pick = Action::new(
            "pick",
            vec![Literal::pos(f("(handempty)")), Literal::neg(f("(holding x)"))],
            crate::domain::Effect::strips([f("(holding x)")], [f("(handempty)")]),
        );
        let drop = Action::strips("drop", [f("(holding x)")], [f("(handempty)")], [f("(holding x)")]);
        GroundedProblem::new(
            Domain::new(vec![pick, drop], vec![]),
            State::new([f("(handempty)")]),
            vec![f("(holding x)")],
        )
    }

    #[test]
    fn available_actions_respect_negative_preconditions() {
        let p = problem();
        let names: Vec<&str> = p.available_actions(&p.init).iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["pick"]);

        let both = State::new([f("(handempty)"), f("(holding x)")]);
        let names: Vec<&str> = p.available_actions(&both).iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["drop"]);
    }

    #[test]
    fn satisfies_is_conjunctive() {
        let p = problem();
        assert!(!p.satisfies(p.goals(), &p.init));
        assert!(p.satisfies(&[], &p.init));
        assert!(p.satisfies(p.goals(), &State::new([f("(holding x)")])));
        assert!(p.state_has_term(&p.init, &f("(handempty)")));
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "domain": {
                "actions": [
                    {"name": "act1", "precondition": [{"fact": "(a)"}], "effect": [{"add": "(b)"}]}
                ]
            },
            "init": {"facts": ["(a)"]},
            "goals": ["(b)"]
        }"#;
        let p: GroundedProblem = serde_json::from_str(json).unwrap();
        assert_eq!(p.goals, vec![f("(b)")]);
        assert_eq!(p.available_actions(&p.init).len(), 1);
    }
}
