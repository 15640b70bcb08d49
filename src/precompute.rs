//! Domain precomputation for the delete relaxation.
//!
//! Built once per heuristic instance and reused by every `compute` call:
//! relaxed axioms, the additive-effects index and the global precondition
//! index.

use std::collections::{HashMap, HashSet};

use crate::domain::{Axiom, Domain};
use crate::error::{DomainError, HeuristicError, HeuristicResult};
use crate::fact::Fact;

/// An axiom with its negative body literals dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxedAxiom {
    /// Derived fact.
    pub head: Fact,

    /// Positive body facts.
    pub body: Vec<Fact>,
}

impl RelaxedAxiom {
    fn from_axiom(axiom: &Axiom) -> Result<Self, DomainError> {
        let body: Vec<Fact> = axiom
            .body
            .iter()
            .filter(|l| l.positive)
            .map(|l| l.fact.clone())
            .collect();
        if body.contains(&axiom.head) {
            return Err(DomainError::MalformedAxiom {
                head: axiom.head.to_string(),
                reason: "head appears in its own body".to_string(),
            });
        }
        Ok(Self {
            head: axiom.head.clone(),
            body,
        })
    }
}

/// Relaxation structures derived from a [`Domain`].
#[derive(Debug, Clone, Default)]
pub struct DomainCache {
    axioms: Vec<RelaxedAxiom>,
    additions: HashMap<String, Vec<Fact>>,
    preconditions: HashMap<String, Vec<Fact>>,
}

impl DomainCache {
    /// Derive the cache from a domain.
    ///
    /// # Errors
    /// Fails on duplicate action names, invalid action costs, actions with
    /// no effect and self-referential axioms.
    pub fn build(domain: &Domain) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(domain.actions.len());
        let mut additions = HashMap::with_capacity(domain.actions.len());
        let mut preconditions = HashMap::with_capacity(domain.actions.len());

        for action in &domain.actions {
            if !seen.insert(action.name.as_str()) {
                return Err(DomainError::DuplicateAction {
                    action: action.name.clone(),
                });
            }
            if !action.cost.is_finite() || action.cost < 0.0 {
                return Err(DomainError::InvalidActionCost {
                    action: action.name.clone(),
                    cost: action.cost,
                });
            }
            if action.effect.is_empty() {
                return Err(DomainError::EmptyEffect {
                    action: action.name.clone(),
                });
            }

            additions.insert(action.name.clone(), action.effect.diff().add);
            preconditions.insert(
                action.name.clone(),
                action.positive_preconditions().cloned().collect(),
            );
        }

        let axioms = domain
            .axioms
            .iter()
            .map(RelaxedAxiom::from_axiom)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            actions = additions.len(),
            axioms = axioms.len(),
            "built relaxation cache"
        );

        Ok(Self {
            axioms,
            additions,
            preconditions,
        })
    }

    /// Relaxed derivation axioms.
    #[must_use]
    pub fn axioms(&self) -> &[RelaxedAxiom] {
        &self.axioms
    }

    /// Facts the named action can add.
    #[must_use]
    pub fn additions(&self, action: &str) -> Option<&[Fact]> {
        self.additions.get(action).map(Vec::as_slice)
    }

    /// Positive precondition facts of the named action.
    #[must_use]
    pub fn preconditions(&self, action: &str) -> Option<&[Fact]> {
        self.preconditions.get(action).map(Vec::as_slice)
    }
}

#[derive(Debug, Default)]
enum CacheState {
    #[default]
    Uninitialized,
    Ready(DomainCache),
}

/// A [`DomainCache`] built on first use and kept until [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct LazyDomainCache {
    state: CacheState,
    builds: usize,
}

impl LazyDomainCache {
    /// An uninitialized cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cache if needed and return it. A no-op when already built.
    ///
    /// # Errors
    /// Propagates [`DomainError`] from [`DomainCache::build`].
    pub fn ensure_ready(&mut self, domain: &Domain) -> HeuristicResult<&DomainCache> {
        if matches!(self.state, CacheState::Uninitialized) {
            self.state = CacheState::Ready(DomainCache::build(domain)?);
            self.builds += 1;
        }
        match &self.state {
            CacheState::Ready(cache) => Ok(cache),
            CacheState::Uninitialized => Err(HeuristicError::internal("domain cache not built")),
        }
    }

    /// The cache, if built.
    #[must_use]
    pub fn get(&self) -> Option<&DomainCache> {
        match &self.state {
            CacheState::Ready(cache) => Some(cache),
            CacheState::Uninitialized => None,
        }
    }

    /// Returns true once the cache has been built.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, CacheState::Ready(_))
    }

    /// Drop the cache; the next [`ensure_ready`](Self::ensure_ready) rebuilds it.
    pub fn reset(&mut self) {
        self.state = CacheState::Uninitialized;
    }

    /// How many times the cache has been built.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds
    }
}
