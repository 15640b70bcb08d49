//! Cost lattice.
//!
//! Costs are non-negative numbers extended with +∞ for "unreached". The
//! aggregation policy decides how precondition costs combine (sum for
//! h_add, max for h_max); the minimum over alternative derivations is the
//! same under both policies.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A relaxed achievement cost or heuristic value.
///
/// Never NaN and never negative, which makes the ordering total.
#[derive(Debug, Clone, Copy)]
pub struct Cost(f64);

impl Cost {
    /// Cost of facts already true.
    pub const ZERO: Self = Self(0.0);

    /// Default cost of a single action.
    pub const ONE: Self = Self(1.0);

    /// Cost of something that cannot be reached; the dead-end signal.
    pub const INFINITY: Self = Self(f64::INFINITY);

    /// Create a validated cost.
    ///
    /// # Errors
    /// Returns an error for NaN or negative values. `f64::INFINITY` is
    /// accepted.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() || value < 0.0 {
            return Err(ValidationError::InvalidCost { value });
        }
        // Adding +0.0 turns -0.0 into +0.0 so equality stays structural.
        Ok(Self(value + 0.0))
    }

    /// Cost equal to a count of items.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_count(count: usize) -> Self {
        Self(count as f64)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns true for any cost other than +∞.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns true for the +∞ cost.
    #[must_use]
    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            write!(f, "inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<f64> for Cost {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How costs of several facts are combined into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Add costs together (h_add). Not admissible in general.
    Sum,

    /// Take the largest cost (h_max). Admissible.
    Max,
}

impl AggregationPolicy {
    /// Neutral element: the aggregate of nothing.
    #[must_use]
    pub const fn identity(self) -> Cost {
        Cost::ZERO
    }

    /// Combine two costs.
    #[must_use]
    pub fn combine(self, a: Cost, b: Cost) -> Cost {
        match self {
            Self::Sum => a + b,
            Self::Max => a.max(b),
        }
    }

    /// Fold a sequence of costs. Empty input yields [`Self::identity`].
    #[must_use]
    pub fn aggregate<I>(self, costs: I) -> Cost
    where
        I: IntoIterator<Item = Cost>,
    {
        costs
            .into_iter()
            .fold(self.identity(), |acc, c| self.combine(acc, c))
    }

    /// Short stable identifier suitable for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(v: f64) -> Cost {
        Cost::new(v).unwrap()
    }

    #[test]
    fn cost_rejects_nan_and_negative() {
        assert!(Cost::new(f64::NAN).is_err());
        assert!(Cost::new(-0.5).is_err());
        assert!(Cost::new(f64::INFINITY).unwrap().is_infinite());
        assert!(Cost::try_from(2.0).is_ok());
    }

    #[test]
    fn cost_ordering_places_infinity_last() {
        let mut costs = vec![Cost::INFINITY, c(3.0), Cost::ZERO, c(1.5)];
        costs.sort();
        assert_eq!(costs, vec![Cost::ZERO, c(1.5), c(3.0), Cost::INFINITY]);
    }

    #[test]
    fn cost_display() {
        assert_eq!(Cost::INFINITY.to_string(), "inf");
        assert_eq!(c(2.0).to_string(), "2");
        assert_eq!(Cost::from_count(3), c(3.0));
    }

    #[test]
    fn sum_policy() {
        let p = AggregationPolicy::Sum;
        assert_eq!(p.combine(c(1.0), c(2.0)), c(3.0));
        assert_eq!(p.aggregate([c(1.0), c(2.0), c(4.0)]), c(7.0));
        assert_eq!(p.aggregate(std::iter::empty()), Cost::ZERO);
        assert!(p.combine(c(1.0), Cost::INFINITY).is_infinite());
    }

    #[test]
    fn max_policy() {
        let p = AggregationPolicy::Max;
        assert_eq!(p.combine(c(1.0), c(2.0)), c(2.0));
        assert_eq!(p.aggregate([c(1.0), c(5.0), c(4.0)]), c(5.0));
        assert_eq!(p.aggregate(std::iter::empty()), Cost::ZERO);
        assert!(p.aggregate([c(1.0), Cost::INFINITY]).is_infinite());
    }

    #[test]
    fn policy_serde_names() {
        let p: AggregationPolicy = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(p, AggregationPolicy::Max);
        assert_eq!(serde_json::to_string(&AggregationPolicy::Sum).unwrap(), "\"sum\"");
        assert_eq!(AggregationPolicy::Sum.to_string(), "sum");
    }
}
