//! Catalog References
//!
//! Opaque references from strategy catalog entries to things the actor
//! resolves on its own: researched techs or civics, and actor kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a tech or civic, resolved by the owning actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechOrCivicRef {
    Tech(String),
    Civic(String),
}

impl TechOrCivicRef {
    pub fn tech(name: impl Into<String>) -> Self {
        TechOrCivicRef::Tech(name.into())
    }

    pub fn civic(name: impl Into<String>) -> Self {
        TechOrCivicRef::Civic(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            TechOrCivicRef::Tech(name) | TechOrCivicRef::Civic(name) => name,
        }
    }
}

impl fmt::Display for TechOrCivicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechOrCivicRef::Tech(name) => write!(f, "tech:{}", name),
            TechOrCivicRef::Civic(name) => write!(f, "civic:{}", name),
        }
    }
}

/// Which kinds of actor may run a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Major and minor actors alike
    #[default]
    Any,
    /// Minor actors are excluded
    MajorOnly,
    /// Only minor actors may run it
    MinorOnly,
}

impl Eligibility {
    /// Builds the eligibility from the two catalog flags.
    ///
    /// Returns `None` when the flags contradict each other (a strategy that is
    /// both major-only and minor-only, or major-only yet minor-eligible).
    pub fn from_flags(minor_actor_eligible: bool, major_actor_only: bool, minor_actor_only: bool) -> Option<Self> {
        match (minor_actor_eligible, major_actor_only, minor_actor_only) {
            (true, false, false) => Some(Eligibility::Any),
            (false, true, false) => Some(Eligibility::MajorOnly),
            (true, false, true) => Some(Eligibility::MinorOnly),
            _ => None,
        }
    }

    pub fn minor_actor_eligible(self) -> bool {
        self != Eligibility::MajorOnly
    }

    pub fn major_actor_only(self) -> bool {
        self == Eligibility::MajorOnly
    }

    pub fn minor_actor_only(self) -> bool {
        self == Eligibility::MinorOnly
    }

    /// Returns true if an actor of the given kind may run the strategy.
    pub fn permits(self, is_minor_actor: bool) -> bool {
        match self {
            Eligibility::Any => true,
            Eligibility::MajorOnly => !is_minor_actor,
            Eligibility::MinorOnly => is_minor_actor,
        }
    }
}
