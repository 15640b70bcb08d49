//! Ground facts.
//!
//! A fact is a predicate applied to object constants, e.g. `(on a b)`.
//! Identity is structural: the predicate plus the ordered argument list,
//! both normalized on construction, so two facts that differ only in
//! whitespace or letter case are the same fact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

fn normalize_name(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// A ground atomic proposition.
///
/// # Examples
///
/// ```
/// use relaxed_heuristics::Fact;
///
/// let a: Fact = "(On A  B)".parse().unwrap();
/// let b = Fact::new("on", ["a", "b"]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "(on a b)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fact {
    predicate: String,
    args: Vec<String>,
}

impl Fact {
    /// Build a fact from a predicate name and its arguments.
    ///
    /// Names are trimmed and lowercased. An empty predicate or argument is
    /// rejected.
    pub fn new<I, S>(predicate: impl AsRef<str>, args: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let predicate = normalize_name(predicate.as_ref());
        if predicate.is_empty() {
            return Err(ValidationError::EmptyPredicate);
        }

        let mut normalized = Vec::new();
        for arg in args {
            let arg = normalize_name(arg.as_ref());
            if arg.is_empty() {
                return Err(ValidationError::MalformedFact {
                    input: predicate,
                    reason: "empty argument".to_string(),
                });
            }
            normalized.push(arg);
        }

        Ok(Self {
            predicate,
            args: normalized,
        })
    }

    /// Build a fact with no arguments, e.g. `(handempty)`.
    pub fn atom(predicate: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::new(predicate, std::iter::empty::<&str>())
    }

    /// Predicate name.
    #[must_use]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Ordered object arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.predicate)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

impl FromStr for Fact {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| ValidationError::MalformedFact {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| malformed("expected a parenthesized expression"))?;

        if inner.contains(['(', ')']) {
            return Err(malformed("nested or unbalanced parentheses"));
        }

        let mut tokens = inner.split_whitespace();
        let predicate = tokens.next().ok_or_else(|| malformed("missing predicate"))?;
        Self::new(predicate, tokens)
    }
}

impl Serialize for Fact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A possibly negated fact appearing in a condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The underlying fact.
    pub fact: Fact,

    /// `false` for a negated literal `(not ...)`.
    #[serde(default = "default_positive")]
    pub positive: bool,
}

const fn default_positive() -> bool {
    true
}

impl Literal {
    /// A positive literal.
    #[must_use]
    pub const fn pos(fact: Fact) -> Self {
        Self { fact, positive: true }
    }

    /// A negated literal.
    #[must_use]
    pub const fn neg(fact: Fact) -> Self {
        Self {
            fact,
            positive: false,
        }
    }
}

impl From<Fact> for Literal {
    fn from(fact: Fact) -> Self {
        Self::pos(fact)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.fact)
        } else {
            write!(f, "(not {})", self.fact)
        }
    }
}
