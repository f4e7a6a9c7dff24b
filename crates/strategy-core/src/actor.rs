//! Collaborator traits
//!
//! The engine never looks at actors or the world directly. Everything it
//! needs comes through these traits, implemented by the domain layer.

use std::fmt;
use std::hash::Hash;

use strategy_types::{FlavorType, TechOrCivicRef, Turn};

/// Stable identity of one strategy within a layer (military, economic, city).
///
/// Implemented by a fieldless enum per layer. `all()` lists every variant and
/// `name()` gives the snake_case key used in catalog files and logs.
pub trait StrategyId: Copy + Ord + Hash + fmt::Debug + fmt::Display + 'static {
    fn all() -> &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.name() == name)
    }
}

/// Flags an actor can be queried for when resolving eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EligibilityFlag {
    /// The actor is a minor actor (city state)
    MinorActor,
}

/// The actor whose strategies are evaluated.
pub trait StrategyActor {
    fn is_minor_actor(&self) -> bool;

    fn has_tech_or_civic(&self, reference: &TechOrCivicRef) -> bool;

    /// Standing preference of the actor on one axis (its personality).
    fn personal_preference(&self, flavor: FlavorType) -> i32;

    fn is_eligibility_flag_set(&self, flag: EligibilityFlag) -> bool {
        match flag {
            EligibilityFlag::MinorActor => self.is_minor_actor(),
        }
    }
}

/// Read access to the world state the engine needs.
pub trait TurnWorld {
    fn current_turn(&self) -> Turn;
}
