use std::collections::HashMap;

use crate::cost::{AggregationPolicy, Cost};
use crate::domain::Action;
use crate::fact::Fact;
use crate::precompute::{DomainCache, RelaxedAxiom};
use crate::state::{State, TypeContext};

/// Minimal known relaxed cost per fact.
///
/// Facts absent from the mapping are unreached (+∞). Recorded costs only
/// ever decrease.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactCosts {
    costs: HashMap<Fact, Cost>,
}

impl FactCosts {
    /// Every fact in `facts` at cost zero.
    #[must_use]
    pub fn seed<'a>(facts: impl IntoIterator<Item = &'a Fact>) -> Self {
        Self {
            costs: facts.into_iter().map(|f| (f.clone(), Cost::ZERO)).collect(),
        }
    }

    /// Cost of `fact`, +∞ if unreached.
    #[must_use]
    pub fn cost(&self, fact: &Fact) -> Cost {
        self.costs.get(fact).copied().unwrap_or(Cost::INFINITY)
    }

    /// Returns true if `fact` has a finite cost.
    #[must_use]
    pub fn is_reached(&self, fact: &Fact) -> bool {
        self.costs.contains_key(fact)
    }

    /// Record `cost` for `fact` if it is cheaper than what is known.
    ///
    /// Returns true if the mapping changed.
    pub fn relax(&mut self, fact: &Fact, cost: Cost) -> bool {
        if cost.is_infinite() || cost >= self.cost(fact) {
            return false;
        }
        self.costs.insert(fact.clone(), cost);
        true
    }

    /// Aggregate the costs of `facts` under `policy`.
    #[must_use]
    pub fn aggregate<'a>(&self, facts: impl IntoIterator<Item = &'a Fact>, policy: AggregationPolicy) -> Cost {
        policy.aggregate(facts.into_iter().map(|f| self.cost(f)))
    }

    /// The relaxed state: every reached fact is true.
    #[must_use]
    pub fn reached_state(&self, types: &TypeContext) -> State {
        State::new(self.costs.keys().cloned()).with_types(types.clone())
    }

    /// Number of reached facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns true if no fact is reached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Reached facts and their costs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Fact, Cost)> {
        self.costs.iter().map(|(f, c)| (f, *c))
    }
}

/// One propagation step through a relaxed axiom.
///
/// Fires only when every body fact is in `reached`; the head costs the
/// aggregated body cost. Returns true if the head's cost decreased.
pub fn propagate_axiom(
    costs: &mut FactCosts,
    reached: &State,
    axiom: &RelaxedAxiom,
    policy: AggregationPolicy,
) -> bool {
    if !axiom.body.iter().all(|f| reached.has_fact(f)) {
        return false;
    }
    let cost = costs.aggregate(&axiom.body, policy);
    costs.relax(&axiom.head, cost)
}

/// One propagation step through an applicable action's additive effect.
///
/// Every added fact costs the aggregated precondition cost plus the
/// action's own cost. Returns true if any added fact's cost decreased.
pub fn propagate_action(
    costs: &mut FactCosts,
    action: &Action,
    cache: &DomainCache,
    policy: AggregationPolicy,
) -> bool {
    let Some(additions) = cache.additions(&action.name) else {
        tracing::warn!(action = %action.name, "action missing from relaxation cache, skipping");
        return false;
    };
    let precondition_cost = match cache.preconditions(&action.name) {
        Some(pre) => costs.aggregate(pre, policy),
        None => costs.aggregate(action.positive_preconditions(), policy),
    };
    let cost = precondition_cost + Cost::new(action.cost).unwrap_or(Cost::INFINITY);

    let mut changed = false;
    for fact in additions {
        changed |= costs.relax(fact, cost);
    }
    changed
}
