//! Error types for the heuristic core.
//!
//! All errors are strongly typed using thiserror. Unreachable goals are
//! not errors: they surface as [`Cost::INFINITY`](crate::Cost::INFINITY).

use thiserror::Error;

/// Validation errors that occur while building facts, costs and configs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Fact '{input}' is malformed: {reason}")]
    MalformedFact {
        input: String,
        reason: String,
    },

    #[error("Predicate cannot be empty")]
    EmptyPredicate,

    #[error("Cost value {value} must be non-negative and not NaN")]
    InvalidCost {
        value: f64,
    },

    #[error("Invalid heuristic configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Domain malformation detected while precomputing relaxation structures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Action '{action}' has no effect")]
    EmptyEffect {
        action: String,
    },

    #[error("Action '{action}' is defined more than once")]
    DuplicateAction {
        action: String,
    },

    #[error("Action '{action}' has invalid cost {cost}")]
    InvalidActionCost {
        action: String,
        cost: f64,
    },

    #[error("Axiom deriving {head} is malformed: {reason}")]
    MalformedAxiom {
        head: String,
        reason: String,
    },
}

/// Top-level error type for heuristic construction and evaluation.
#[derive(Debug, Error)]
pub enum HeuristicError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl HeuristicError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a domain malformation error.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for heuristic operations.
pub type HeuristicResult<T> = Result<T, HeuristicError>;
