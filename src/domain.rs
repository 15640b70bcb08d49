//! Grounded planning domain: actions and derivation axioms.
//!
//! The domain is produced by an external grounder and is read-only to the
//! heuristic core.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::fact::{Fact, Literal};

/// A single effect item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectItem {
    /// Makes the fact true.
    Add(Fact),

    /// Makes the fact false. Ignored by the delete relaxation.
    Delete(Fact),
}

/// Add and delete lists of an effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectDiff {
    /// Facts the effect can make true, first occurrence order.
    pub add: Vec<Fact>,

    /// Facts the effect can make false, first occurrence order.
    pub delete: Vec<Fact>,
}

/// An action effect: an ordered list of additions and deletions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Effect(Vec<EffectItem>);

impl Effect {
    /// Create an effect from explicit items.
    #[must_use]
    pub fn new(items: Vec<EffectItem>) -> Self {
        Self(items)
    }

    /// STRIPS-style effect from add and delete lists.
    #[must_use]
    pub fn strips(add: impl IntoIterator<Item = Fact>, delete: impl IntoIterator<Item = Fact>) -> Self {
        let mut items: Vec<EffectItem> = add.into_iter().map(EffectItem::Add).collect();
        items.extend(delete.into_iter().map(EffectItem::Delete));
        Self(items)
    }

    /// Items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[EffectItem] {
        &self.0
    }

    /// Returns true if the effect changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into deduplicated add and delete lists.
    #[must_use]
    pub fn diff(&self) -> EffectDiff {
        let mut seen_add = HashSet::new();
        let mut seen_del = HashSet::new();
        let mut diff = EffectDiff::default();
        for item in &self.0 {
            match item {
                EffectItem::Add(f) => {
                    if seen_add.insert(f) {
                        diff.add.push(f.clone());
                    }
                }
                EffectItem::Delete(f) => {
                    if seen_del.insert(f) {
                        diff.delete.push(f.clone());
                    }
                }
            }
        }
        diff
    }
}

const fn default_action_cost() -> f64 {
    1.0
}

/// A grounded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique ground name, e.g. `move-a-b`.
    pub name: String,

    /// Conjunctive precondition.
    #[serde(default)]
    pub precondition: Vec<Literal>,

    /// Effect.
    pub effect: Effect,

    /// Action cost; unit cost unless stated.
    #[serde(default = "default_action_cost")]
    pub cost: f64,
}

impl Action {
    /// Create a unit-cost action.
    #[must_use]
    pub fn new(name: impl Into<String>, precondition: Vec<Literal>, effect: Effect) -> Self {
        Self {
            name: name.into(),
            precondition,
            effect,
            cost: default_action_cost(),
        }
    }

    /// Create a unit-cost STRIPS action with positive preconditions.
    #[must_use]
    pub fn strips(
        name: impl Into<String>,
        precondition: impl IntoIterator<Item = Fact>,
        add: impl IntoIterator<Item = Fact>,
        delete: impl IntoIterator<Item = Fact>,
    ) -> Self {
        Self::new(
            name,
            precondition.into_iter().map(Literal::pos).collect(),
            Effect::strips(add, delete),
        )
    }

    /// Override the action cost.
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Positive precondition facts.
    pub fn positive_preconditions(&self) -> impl Iterator<Item = &Fact> {
        self.precondition
            .iter()
            .filter(|l| l.positive)
            .map(|l| &l.fact)
    }
}

/// Derivation rule: when every body literal holds, `head` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axiom {
    /// Derived fact.
    pub head: Fact,

    /// Conjunctive body.
    #[serde(default)]
    pub body: Vec<Literal>,
}

impl Axiom {
    /// Create an axiom from positive body facts.
    #[must_use]
    pub fn new(head: Fact, body: impl IntoIterator<Item = Fact>) -> Self {
        Self {
            head,
            body: body.into_iter().map(Literal::pos).collect(),
        }
    }
}

/// Grounded actions and axioms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Grounded actions.
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Derivation axioms.
    #[serde(default)]
    pub axioms: Vec<Axiom>,
}

impl Domain {
    /// Create a domain.
    #[must_use]
    pub fn new(actions: Vec<Action>, axioms: Vec<Axiom>) -> Self {
        Self { actions, axioms }
    }

    /// Look up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(s: &str) -> Fact {
        s.parse().unwrap()
    }

    #[test]
    fn effect_diff_splits_and_dedups() {
        let effect = Effect::new(vec![
            EffectItem::Add(f("(b)")),
            EffectItem::Delete(f("(a)")),
            EffectItem::Add(f("(c)")),
            EffectItem::Add(f("(B)")),
        ]);
        let diff = effect.diff();
        assert_eq!(diff.add, vec![f("(b)"), f("(c)")]);
        assert_eq!(diff.delete, vec![f("(a)")]);
    }

    #[test]
    fn action_json_defaults() {
        let json = r#"{
            "name": "act1",
            "precondition": [{"fact": "(a)"}],
            "effect": [{"add": "(b)"}, {"delete": "(a)"}]
        }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert!((action.cost - 1.0).abs() < f64::EPSILON);
        assert_eq!(action.positive_preconditions().count(), 1);
        assert_eq!(action.effect.diff().add, vec![f("(b)")]);
    }

    #[test]
    fn domain_lookup() {
        let domain = Domain::new(
            vec![Action::strips("act1", [f("(a)")], [f("(b)")], []).with_cost(2.0)],
            vec![],
        );
        assert!(domain.action("act1").is_some());
        assert!(domain.action("act2").is_none());
    }
}
