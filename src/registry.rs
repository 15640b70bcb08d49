//! Heuristic selection.
//!
//! Keys have the form `family/name`:
//!
//! | key                        | estimator                     |
//! |----------------------------|-------------------------------|
//! | `basic/zero`               | [`ZeroHeuristic`]             |
//! | `basic/goal_count`         | [`GoalCountHeuristic`]        |
//! | `delete_relaxation/h_add`  | [`DeleteRelaxationHeuristic`] |
//! | `delete_relaxation/h_max`  | [`DeleteRelaxationHeuristic`] |
//! | `critical_path/<1..=3>`    | [`CriticalPathHeuristic`]     |
//!
//! Unknown keys never fail: a warning is logged and the family default is
//! used instead (`basic/goal_count` for `basic/*` and unknown families,
//! `delete_relaxation/h_add` for `delete_relaxation/*`, level 1 for a
//! critical-path level that is not a number).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cost::{AggregationPolicy, Cost};
use crate::error::{HeuristicResult, ValidationError};
use crate::heuristic::{
    CriticalPathHeuristic, DeleteRelaxationHeuristic, GoalCountHeuristic, Heuristic, ZeroHeuristic,
};
use crate::planner::PlanningContext;
use crate::state::State;

const BASIC: &str = "basic";
const DELETE_RELAXATION: &str = "delete_relaxation";
const CRITICAL_PATH: &str = "critical_path";

/// The closed set of available estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    /// `basic/zero`
    Zero,
    /// `basic/goal_count`
    GoalCount,
    /// `delete_relaxation/h_add`
    HAdd,
    /// `delete_relaxation/h_max`
    HMax,
    /// `critical_path/<level>`, level already clamped to `[1, 3]`.
    CriticalPath(usize),
}

impl HeuristicKind {
    /// Fallback for the `basic` family and for unknown families.
    pub const BASIC_DEFAULT: Self = Self::GoalCount;

    /// Fallback for the `delete_relaxation` family.
    pub const RELAXATION_DEFAULT: Self = Self::HAdd;

    /// Resolve a registry key, falling back with a warning when unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let normalized = key.trim().to_ascii_lowercase();
        let (family, name) = normalized.split_once('/').unwrap_or((normalized.as_str(), ""));

        match (family, name) {
            (BASIC, "zero") => Self::Zero,
            (BASIC, "goal_count") => Self::GoalCount,
            (DELETE_RELAXATION, "h_add") => Self::HAdd,
            (DELETE_RELAXATION, "h_max") => Self::HMax,
            (CRITICAL_PATH, level) => match level.parse::<i64>() {
                Ok(level) => Self::CriticalPath(CriticalPathHeuristic::clamp_level(level)),
                Err(_) => Self::fallback(key, Self::CriticalPath(CriticalPathHeuristic::MIN_LEVEL)),
            },
            (DELETE_RELAXATION, _) => Self::fallback(key, Self::RELAXATION_DEFAULT),
            _ => Self::fallback(key, Self::BASIC_DEFAULT),
        }
    }

    fn fallback(key: &str, default: Self) -> Self {
        tracing::warn!(
            requested = key,
            "heuristic key isn't registered, forcing it to [{}]",
            default.key()
        );
        default
    }

    /// Canonical registry key.
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::Zero => format!("{BASIC}/zero"),
            Self::GoalCount => format!("{BASIC}/goal_count"),
            Self::HAdd => format!("{DELETE_RELAXATION}/h_add"),
            Self::HMax => format!("{DELETE_RELAXATION}/h_max"),
            Self::CriticalPath(level) => format!("{CRITICAL_PATH}/{level}"),
        }
    }

    /// Returns true if this estimator runs the relaxed fixpoint.
    #[must_use]
    pub const fn uses_relaxation(self) -> bool {
        !matches!(self, Self::Zero | Self::GoalCount)
    }

    /// Instantiate the estimator over `context`.
    ///
    /// # Errors
    /// Relaxation-based estimators fail if the domain is malformed.
    pub fn build(self, context: Arc<dyn PlanningContext>) -> HeuristicResult<AnyHeuristic> {
        Ok(match self {
            Self::Zero => AnyHeuristic::Zero(ZeroHeuristic),
            Self::GoalCount => AnyHeuristic::GoalCount(GoalCountHeuristic::new(context)),
            Self::HAdd => AnyHeuristic::DeleteRelaxation(DeleteRelaxationHeuristic::new(
                context,
                AggregationPolicy::Sum,
            )?),
            Self::HMax => AnyHeuristic::DeleteRelaxation(DeleteRelaxationHeuristic::new(
                context,
                AggregationPolicy::Max,
            )?),
            Self::CriticalPath(level) => {
                let level = i64::try_from(level).unwrap_or(i64::MAX);
                AnyHeuristic::CriticalPath(CriticalPathHeuristic::new(context, level)?)
            }
        })
    }
}

impl Default for HeuristicKind {
    fn default() -> Self {
        Self::BASIC_DEFAULT
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Heuristic selection as it appears in planner configuration.
///
/// ```
/// use relaxed_heuristics::{HeuristicConfig, HeuristicKind};
///
/// let cfg = HeuristicConfig::from_json(r#"{"key": "critical_path", "critical_path_level": 2}"#).unwrap();
/// assert_eq!(cfg.kind(), HeuristicKind::CriticalPath(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Registry key, e.g. `delete_relaxation/h_max`.
    pub key: String,

    /// Tuple size used when `key` is the bare `critical_path` family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_path_level: Option<i64>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            key: HeuristicKind::BASIC_DEFAULT.key(),
            critical_path_level: None,
        }
    }
}

impl HeuristicConfig {
    /// Parse a JSON configuration object.
    ///
    /// # Errors
    /// Returns an error if the JSON is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Resolve to an estimator kind, applying fallbacks and clamping.
    #[must_use]
    pub fn kind(&self) -> HeuristicKind {
        match self.critical_path_level {
            Some(level) if self.key.trim().eq_ignore_ascii_case(CRITICAL_PATH) => {
                HeuristicKind::CriticalPath(CriticalPathHeuristic::clamp_level(level))
            }
            _ => HeuristicKind::from_key(&self.key),
        }
    }

    /// Resolve and instantiate.
    ///
    /// # Errors
    /// Relaxation-based estimators fail if the domain is malformed.
    pub fn build(&self, context: Arc<dyn PlanningContext>) -> HeuristicResult<AnyHeuristic> {
        self.kind().build(context)
    }
}

/// Any registered estimator.
pub enum AnyHeuristic {
    /// Always zero.
    Zero(ZeroHeuristic),
    /// Unsatisfied goal count.
    GoalCount(GoalCountHeuristic),
    /// h_add or h_max.
    DeleteRelaxation(DeleteRelaxationHeuristic),
    /// h^m.
    CriticalPath(CriticalPathHeuristic),
}

impl AnyHeuristic {
    /// The kind this estimator was built from.
    #[must_use]
    pub fn kind(&self) -> HeuristicKind {
        match self {
            Self::Zero(_) => HeuristicKind::Zero,
            Self::GoalCount(_) => HeuristicKind::GoalCount,
            Self::DeleteRelaxation(h) => match h.policy() {
                AggregationPolicy::Sum => HeuristicKind::HAdd,
                AggregationPolicy::Max => HeuristicKind::HMax,
            },
            Self::CriticalPath(h) => HeuristicKind::CriticalPath(h.level()),
        }
    }
}

impl Heuristic for AnyHeuristic {
    fn compute(&mut self, state: &State) -> HeuristicResult<Cost> {
        match self {
            Self::Zero(h) => h.compute(state),
            Self::GoalCount(h) => h.compute(state),
            Self::DeleteRelaxation(h) => h.compute(state),
            Self::CriticalPath(h) => h.compute(state),
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Zero(h) => h.name(),
            Self::GoalCount(h) => h.name(),
            Self::DeleteRelaxation(h) => h.name(),
            Self::CriticalPath(h) => h.name(),
        }
    }
}

impl fmt::Debug for AnyHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyHeuristic").field(&self.kind()).finish()
    }
}
