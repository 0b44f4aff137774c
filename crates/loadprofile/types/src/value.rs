use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Question tier — controls whether a field is always, sometimes, or rarely
/// shown, and how its absence is penalized in confidence scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionTier {
    Essential,
    Standard,
    Detailed,
}

impl std::fmt::Display for QuestionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Essential => write!(f, "essential"),
            Self::Standard => write!(f, "standard"),
            Self::Detailed => write!(f, "detailed"),
        }
    }
}

/// Where a normalized value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Supplied by the user through the wizard
    User,
    /// Filled in from the catalog default
    Default,
}

impl Provenance {
    pub fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// A typed questionnaire value after normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedValue {
    Number(f64),
    Bool(bool),
    /// Single enum selection
    Tag(String),
    /// Multi-select enum; ordered set for deterministic iteration
    Tags(BTreeSet<String>),
}

impl TypedValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::Tag(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Tags(t) => Some(t),
            _ => None,
        }
    }
}
