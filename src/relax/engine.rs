use crate::cost::AggregationPolicy;
use crate::planner::PlanningContext;
use crate::precompute::DomainCache;
use crate::state::{State, TypeContext};

use super::costs::{propagate_action, propagate_axiom, FactCosts};

/// What one propagation round found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The goal holds in the relaxed state; no propagation was done.
    GoalReached,

    /// At least one fact became reachable or cheaper.
    Progress,

    /// Nothing changed and the goal does not hold.
    Exhausted,
}

/// Result of running the fixpoint to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelaxationOutcome {
    /// The goal became true in the relaxed state.
    GoalReachable(FactCosts),

    /// The relaxed state space was exhausted without reaching the goal.
    Unreachable(FactCosts),
}

impl RelaxationOutcome {
    /// Returns true if the goal was reached.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Self::GoalReachable(_))
    }

    /// Fact costs at the point the fixpoint stopped.
    #[must_use]
    pub const fn costs(&self) -> &FactCosts {
        match self {
            Self::GoalReachable(costs) | Self::Unreachable(costs) => costs,
        }
    }
}

/// Delete-relaxed cost propagation from one initial state.
///
/// Each round derives the relaxed state from the current costs, stops if
/// the goal holds there, and otherwise pushes costs through every firing
/// axiom and every applicable action. Costs never increase, so the loop
/// stops once a round changes nothing.
pub struct FixpointEngine<'a, P: PlanningContext + ?Sized> {
    context: &'a P,
    cache: &'a DomainCache,
    policy: AggregationPolicy,
    types: TypeContext,
    costs: FactCosts,
    rounds: usize,
}

impl<'a, P: PlanningContext + ?Sized> FixpointEngine<'a, P> {
    /// Seed an engine with the facts of `initial` at cost zero.
    #[must_use]
    pub fn new(context: &'a P, cache: &'a DomainCache, initial: &State, policy: AggregationPolicy) -> Self {
        Self {
            context,
            cache,
            policy,
            types: initial.types.clone(),
            costs: FactCosts::seed(&initial.facts),
            rounds: 0,
        }
    }

    /// Current fact costs.
    #[must_use]
    pub fn costs(&self) -> &FactCosts {
        &self.costs
    }

    /// Propagation rounds run so far.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Aggregation policy in use.
    #[must_use]
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Run a single round.
    pub fn round(&mut self) -> RoundOutcome {
        let context = self.context;
        let reached = self.costs.reached_state(&self.types);
        if context.satisfies(context.goals(), &reached) {
            return RoundOutcome::GoalReached;
        }

        let mut changed = false;
        for axiom in self.cache.axioms() {
            changed |= propagate_axiom(&mut self.costs, &reached, axiom, self.policy);
        }
        for action in context.available_actions(&reached) {
            changed |= propagate_action(&mut self.costs, action, self.cache, self.policy);
        }

        self.rounds += 1;
        tracing::trace!(
            round = self.rounds,
            reached = self.costs.len(),
            changed,
            "relaxation round"
        );

        if changed {
            RoundOutcome::Progress
        } else {
            RoundOutcome::Exhausted
        }
    }

    /// Run rounds until the goal holds or nothing changes.
    #[must_use]
    pub fn run(mut self) -> RelaxationOutcome {
        loop {
            match self.round() {
                RoundOutcome::Progress => {}
                RoundOutcome::GoalReached => {
                    tracing::debug!(
                        rounds = self.rounds,
                        reached = self.costs.len(),
                        policy = %self.policy,
                        "relaxed goal reached"
                    );
                    return RelaxationOutcome::GoalReachable(self.costs);
                }
                RoundOutcome::Exhausted => {
                    tracing::debug!(
                        rounds = self.rounds,
                        reached = self.costs.len(),
                        policy = %self.policy,
                        "relaxed state space exhausted"
                    );
                    return RelaxationOutcome::Unreachable(self.costs);
                }
            }
        }
    }
}

/// Run the fixpoint from `initial` to completion.
#[must_use]
pub fn relax<P: PlanningContext + ?Sized>(
    context: &P,
    cache: &DomainCache,
    initial: &State,
    policy: AggregationPolicy,
) -> RelaxationOutcome {
    FixpointEngine::new(context, cache, initial, policy).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Cost;
    use crate::domain::{Action, Axiom, Domain};
    use crate::fact::Fact;
    use crate::planner::GroundedProblem;

    fn f(s: &str) -> Fact {
        s.parse().unwrap()
    }

    fn chain(goal: &str) -> GroundedProblem {
        GroundedProblem::new(
            Domain::new(
                vec![
                    Action::strips("ab", [f("(a)")], [f("(b)")], [f("(a)")]),
                    Action::strips("bc", [f("(b)")], [f("(c)")], []),
                    Action::strips("ac", [f("(a)")], [f("(c)")], []).with_cost(5.0),
                ],
                vec![Axiom::new(f("(done)"), [f("(c)")])],
            ),
            State::new([f("(a)")]),
            vec![f(goal)],
        )
    }

    #[test]
    fn goal_in_initial_state_stops_before_any_round() {
        let p = chain("(a)");
        let cache = DomainCache::build(&p.domain).unwrap();
        let mut engine = FixpointEngine::new(&p, &cache, &p.init, AggregationPolicy::Sum);
        assert_eq!(engine.round(), RoundOutcome::GoalReached);
        assert_eq!(engine.rounds(), 0);
        assert_eq!(engine.costs().cost(&f("(a)")), Cost::ZERO);
    }

    #[test]
    fn deletes_are_ignored() {
        let p = chain("(c)");
        let cache = DomainCache::build(&p.domain).unwrap();
        let outcome = relax(&p, &cache, &p.init, AggregationPolicy::Sum);
        assert!(outcome.is_reachable());
        // (a) stays reached even though ab deletes it.
        assert_eq!(outcome.costs().cost(&f("(a)")), Cost::ZERO);
    }

    #[test]
    fn cheaper_derivation_wins_when_run_to_fixpoint() {
        let p = chain("(unreachable)");
        let cache = DomainCache::build(&p.domain).unwrap();
        let outcome = relax(&p, &cache, &p.init, AggregationPolicy::Sum);
        assert!(!outcome.is_reachable());
        let costs = outcome.costs();
        assert_eq!(costs.cost(&f("(b)")), Cost::ONE);
        assert_eq!(costs.cost(&f("(c)")), Cost::from_count(2));
        assert_eq!(costs.cost(&f("(done)")), Cost::from_count(2));
    }

    #[test]
    fn axioms_derive_goal_facts_at_zero_cost() {
        let p = chain("(done)");
        let cache = DomainCache::build(&p.domain).unwrap();
        let outcome = relax(&p, &cache, &p.init, AggregationPolicy::Max);
        assert!(outcome.is_reachable());
        // Derived from (c) via ac before bc found the cheaper route; the
        // early exit keeps that value.
        assert_eq!(outcome.costs().cost(&f("(done)")), Cost::from_count(5));
        assert_eq!(outcome.costs().cost(&f("(c)")), Cost::from_count(2));
    }

    #[test]
    fn exhaustion_terminates() {
        let p = chain("(unreachable)");
        let cache = DomainCache::build(&p.domain).unwrap();
        let mut engine = FixpointEngine::new(&p, &cache, &p.init, AggregationPolicy::Max);
        let mut outcome = engine.round();
        while outcome == RoundOutcome::Progress {
            outcome = engine.round();
        }
        assert_eq!(outcome, RoundOutcome::Exhausted);
        assert!(engine.rounds() <= 5);
    }
}
