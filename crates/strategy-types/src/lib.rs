//! Shared data types for the strategy engine.
//!
//! This crate contains pure data structures with no decision logic.
//! It is a dependency for all other crates in the workspace.

pub mod flavor;
pub mod reference;
pub mod turn;

// Re-export flavor types
pub use flavor::{Flavor, FlavorType, FlavorVector, ParseFlavorError, FLAVOR_COUNT};

// Re-export reference types
pub use reference::{Eligibility, TechOrCivicRef};

// Re-export turn helpers
pub use turn::{is_periodic, turns_since, Turn, NEVER, NO_RECHECK};
