use std::sync::Arc;

use crate::cost::{AggregationPolicy, Cost};
use crate::error::HeuristicResult;
use crate::planner::PlanningContext;
use crate::precompute::LazyDomainCache;
use crate::relax::{relax, RelaxationOutcome};
use crate::state::State;

use super::Heuristic;

/// h_add (sum policy) and h_max (max policy).
///
/// Runs the relaxed fixpoint from the evaluated state and aggregates the
/// costs of the goal facts with the same policy used for propagation.
pub struct DeleteRelaxationHeuristic {
    context: Arc<dyn PlanningContext>,
    policy: AggregationPolicy,
    cache: LazyDomainCache,
}

impl DeleteRelaxationHeuristic {
    /// Build the heuristic and its domain cache.
    ///
    /// # Errors
    /// Fails if the domain is malformed.
    pub fn new(context: Arc<dyn PlanningContext>, policy: AggregationPolicy) -> HeuristicResult<Self> {
        let mut cache = LazyDomainCache::new();
        cache.ensure_ready(context.domain())?;
        Ok(Self {
            context,
            policy,
            cache,
        })
    }

    /// Additive heuristic.
    ///
    /// # Errors
    /// Fails if the domain is malformed.
    pub fn h_add(context: Arc<dyn PlanningContext>) -> HeuristicResult<Self> {
        Self::new(context, AggregationPolicy::Sum)
    }

    /// Max heuristic.
    ///
    /// # Errors
    /// Fails if the domain is malformed.
    pub fn h_max(context: Arc<dyn PlanningContext>) -> HeuristicResult<Self> {
        Self::new(context, AggregationPolicy::Max)
    }

    /// Aggregation policy.
    #[must_use]
    pub fn policy(&self) -> AggregationPolicy {
        self.policy
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
}

impl Heuristic for DeleteRelaxationHeuristic {
    fn compute(&mut self, state: &State) -> HeuristicResult<Cost> {
        let context = &*self.context;
        let cache = self.cache.ensure_ready(context.domain())?;
        match relax(context, cache, state, self.policy) {
            RelaxationOutcome::GoalReachable(costs) => Ok(self.policy.aggregate(
                context
                    .goals()
                    .iter()
                    .filter(|g| costs.is_reached(g))
                    .map(|g| costs.cost(g)),
            )),
            RelaxationOutcome::Unreachable(_) => Ok(Cost::INFINITY),
        }
    }

    fn name(&self) -> String {
        match self.policy {
            AggregationPolicy::Sum => "delete_relaxation/h_add".to_string(),
            AggregationPolicy::Max => "delete_relaxation/h_max".to_string(),
        }
    }
}
