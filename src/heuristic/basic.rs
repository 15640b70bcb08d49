use std::sync::Arc;

use crate::cost::Cost;
use crate::error::HeuristicResult;
use crate::planner::PlanningContext;
use crate::state::State;

use super::Heuristic;

/// Always zero. Admissible and uninformed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn compute(&mut self, _state: &State) -> HeuristicResult<Cost> {
        Ok(Cost::ZERO)
    }

    fn name(&self) -> String {
        "basic/zero".to_string()
    }
}

/// Number of goal facts not true in the state. Cheap but inadmissible.
#[derive(Clone)]
pub struct GoalCountHeuristic {
    context: Arc<dyn PlanningContext>,
}

impl GoalCountHeuristic {
    /// Count unsatisfied goals of `context`.
    #[must_use]
    pub fn new(context: Arc<dyn PlanningContext>) -> Self {
        Self { context }
    }
}

impl Heuristic for GoalCountHeuristic {
    fn compute(&mut self, state: &State) -> HeuristicResult<Cost> {
        let missing = self
            .context
            .goals()
            .iter()
            .filter(|g| !self.context.state_has_term(state, g))
            .count();
        Ok(Cost::from_count(missing))
    }

    fn name(&self) -> String {
        "basic/goal_count".to_string()
    }
}
