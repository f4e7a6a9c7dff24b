//! Strategy engine: turn-gated adoption, flavor aggregation, weighted choice.
//!
//! Each actor owns one [`StrategyAdoptionRegistry`] per strategy layer. Every
//! turn the registry re-evaluates its strategies against the layer's
//! [`PredicateTable`] and rebuilds the aggregate flavors, which downstream
//! planners turn into a [`WeightedChoiceSet`] for the [`ProductionSelector`].

pub mod actor;
pub mod adoption;
pub mod catalog;
pub mod catalogs;
pub mod choice;
pub mod config;
pub mod discount;
pub mod error;
pub mod hooks;
pub mod modifier;
pub mod predicate;
pub mod registry;
pub mod rng;
pub mod selector;
pub mod turn_loop;

pub use actor::{EligibilityFlag, StrategyActor, StrategyId, TurnWorld};
pub use adoption::{Pending, StrategyAdoptionState, Transition, TransitionInputs};
pub use catalog::{StrategyCatalog, StrategyCatalogBuilder, StrategyCatalogEntry, StrategyCatalogEntryBuilder};
pub use catalogs::{CityStrategy, EconomicStrategy, MilitaryStrategy};
pub use choice::{SlotBlock, SlotDistribution, WeightedChoiceSet};
pub use config::{default_config_toml, ConfigError, EngineConfig, PersonalityConfig};
pub use discount::{production_time_discount, reweight_by_turns};
pub use error::{CatalogError, PredicateError, StrategyError};
pub use hooks::AdoptionHooks;
pub use modifier::{weight_threshold_modifier, Personality};
pub use predicate::{PredicateContext, PredicateFn, PredicateTable};
pub use registry::{StrategyAdoptionRegistry, TurnReport};
pub use rng::{RandomSource, ScriptedDraws, SimRng};
pub use selector::{ProductionSelector, DISTRIBUTION_SLOTS, TOP_CHOICES};
pub use turn_loop::{ActorFailure, TurnLoop, TurnParticipant, TurnSummary};
