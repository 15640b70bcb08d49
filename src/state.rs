//! World states as seen by the heuristic core.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::fact::Fact;

/// Object name to type name.
pub type TypeContext = BTreeMap<String, String>;

/// A world state: the set of true facts plus the object type context.
///
/// Facts not in the set are false (closed world).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// True facts.
    pub facts: HashSet<Fact>,

    /// Object types, carried through relaxed states unchanged.
    #[serde(default)]
    pub types: TypeContext,
}

impl State {
    /// Create a state with an empty type context.
    #[must_use]
    pub fn new(facts: impl IntoIterator<Item = Fact>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
            types: TypeContext::new(),
        }
    }

    /// Replace the type context.
    #[must_use]
    pub fn with_types(mut self, types: TypeContext) -> Self {
        self.types = types;
        self
    }

    /// Returns true if `fact` holds in this state.
    #[must_use]
    pub fn has_fact(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// Number of true facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if no fact holds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FromIterator<Fact> for State {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        Self::new(iter)
    }
}
