use std::collections::HashSet;
use std::sync::Arc;

use itertools::Itertools;

use crate::cost::{AggregationPolicy, Cost};
use crate::error::HeuristicResult;
use crate::fact::Fact;
use crate::planner::PlanningContext;
use crate::precompute::LazyDomainCache;
use crate::relax::{relax, FactCosts, RelaxationOutcome};
use crate::state::State;

use super::Heuristic;

/// h^m over goal tuples of size 1, 2 or 3.
///
/// Facts are costed with the max policy. A tuple costs the sum of its
/// members' costs and the estimate is the most expensive tuple, floored at
/// zero.
pub struct CriticalPathHeuristic {
    context: Arc<dyn PlanningContext>,
    level: usize,
    cache: LazyDomainCache,
}

impl CriticalPathHeuristic {
    /// Smallest supported tuple size.
    pub const MIN_LEVEL: usize = 1;

    /// Largest supported tuple size.
    pub const MAX_LEVEL: usize = 3;

    /// Build the heuristic. `level` outside `[1, 3]` is clamped with a warning.
    ///
    /// # Errors
    /// Fails if the domain is malformed.
    pub fn new(context: Arc<dyn PlanningContext>, level: i64) -> HeuristicResult<Self> {
        let level = Self::clamp_level(level);
        let mut cache = LazyDomainCache::new();
        cache.ensure_ready(context.domain())?;
        Ok(Self {
            context,
            level,
            cache,
        })
    }

    pub(crate) fn clamp_level(level: i64) -> usize {
        match usize::try_from(level) {
            Ok(l) if l > Self::MAX_LEVEL => {
                tracing::warn!(
                    requested = level,
                    "critical path level is only implemented up to {}, using {}",
                    Self::MAX_LEVEL,
                    Self::MAX_LEVEL
                );
                Self::MAX_LEVEL
            }
            Ok(l) if l >= Self::MIN_LEVEL => l,
            _ => {
                tracing::warn!(
                    requested = level,
                    "critical path level has to be at least {}, using {}",
                    Self::MIN_LEVEL,
                    Self::MIN_LEVEL
                );
                Self::MIN_LEVEL
            }
        }
    }

    /// Effective tuple size.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The domain cache.
    #[must_use]
    pub fn cache(&self) -> &LazyDomainCache {
        &self.cache
    }

    /// Drop the domain cache; it is rebuilt on the next `compute`.
    pub fn reset(&mut self) {
        self.cache.reset();
    }

    fn hardest_tuple(&self, goals: &[Fact], costs: &FactCosts) -> Cost {
        let mut seen = HashSet::with_capacity(goals.len());
        let goal_costs: Vec<Cost> = goals
            .iter()
            .filter(|g| seen.insert(*g) && costs.is_reached(g))
            .map(|g| costs.cost(g))
            .collect();

        goal_costs
            .iter()
            .copied()
            .combinations(self.level)
            .map(|tuple| AggregationPolicy::Sum.aggregate(tuple))
            .fold(Cost::ZERO, Cost::max)
    }
}

impl Heuristic for CriticalPathHeuristic {
    fn compute(&mut self, state: &State) -> HeuristicResult<Cost> {
        let context = Arc::clone(&self.context);
        let cache = self.cache.ensure_ready(context.domain())?;
        match relax(&*context, cache, state, AggregationPolicy::Max) {
            RelaxationOutcome::GoalReachable(costs) => Ok(self.hardest_tuple(context.goals(), &costs)),
            RelaxationOutcome::Unreachable(_) => Ok(Cost::INFINITY),
        }
    }

    fn name(&self) -> String {
        format!("critical_path/{}", self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, Domain};
    use crate::planner::GroundedProblem;

    fn f(s: &str) -> Fact {
        s.parse().unwrap()
    }

    /// Goals (p), (q), (r) at max-costs 1, 2 and 3.
    fn staircase(goals: &[&str]) -> Arc<dyn PlanningContext> {
        Arc::new(GroundedProblem::new(
            Domain::new(
                vec![
                    Action::strips("p", [f("(a)")], [f("(p)")], []),
                    Action::strips("q", [f("(p)")], [f("(q)")], []),
                    Action::strips("r", [f("(q)")], [f("(r)")], []),
                ],
                vec![],
            ),
            State::new([f("(a)")]),
            goals.iter().map(|g| f(g)).collect(),
        ))
    }

    fn value(level: i64, goals: &[&str]) -> Cost {
        let mut h = CriticalPathHeuristic::new(staircase(goals), level).unwrap();
        h.compute(&State::new([f("(a)")])).unwrap()
    }

    #[test]
    fn level_one_is_h_max() {
        assert_eq!(value(1, &["(p)", "(q)", "(r)"]), Cost::from_count(3));
    }

    #[test]
    fn level_two_takes_most_expensive_pair() {
        assert_eq!(value(2, &["(p)", "(q)", "(r)"]), Cost::from_count(5));
    }

    #[test]
    fn level_three_sums_triple() {
        assert_eq!(value(3, &["(p)", "(q)", "(r)"]), Cost::from_count(6));
    }

    #[test]
    fn repeated_goal_facts_do_not_form_tuples() {
        assert_eq!(value(2, &["(r)", "(r)"]), Cost::ZERO);
        assert_eq!(value(2, &["(r)", "(r)", "(p)"]), Cost::from_count(4));
    }

    #[test]
    fn empty_goal_is_zero() {
        assert_eq!(value(3, &[]), Cost::ZERO);
    }

    #[test]
    fn unreachable_goal_is_infinite() {
        assert!(value(2, &["(p)", "(z)"]).is_infinite());
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(CriticalPathHeuristic::clamp_level(0), 1);
        assert_eq!(CriticalPathHeuristic::clamp_level(-4), 1);
        assert_eq!(CriticalPathHeuristic::clamp_level(2), 2);
        assert_eq!(CriticalPathHeuristic::clamp_level(5), 3);

        let h = CriticalPathHeuristic::new(staircase(&["(p)"]), 7).unwrap();
        assert_eq!(h.level(), 3);
        assert_eq!(h.name(), "critical_path/3");
    }
}
