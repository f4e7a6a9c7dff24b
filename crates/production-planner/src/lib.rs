//! Settlement production planning driven by adopted strategies.
//!
//! The planner turns an actor's personality and the aggregate flavors of its
//! adopted strategies into weights over a production menu, then draws one
//! item with the strategy engine's selector.
//!
//! # Modules
//!
//! - [`buildable`]: Production menu items
//! - [`weights`]: Flavor-biased base weights
//! - [`planner`]: Candidate weighting, caps and selection
//! - [`config`]: Planner configuration
//! - [`sim`]: Turn simulation over the three strategy layers

pub mod buildable;
pub mod config;
pub mod planner;
pub mod sim;
pub mod weights;

pub use buildable::{starter_buildables, Buildable, BuildableError, BuildableKind, BuildableList, UnitTask};
pub use config::{default_config_toml, CapsConfig, PlannerConfig, PlannerConfigError, WeightsConfig};
pub use planner::{PlanningContext, ProductionPlanner};
pub use sim::{leader_presets, ActorState, SimActor, SimCommand, SimError, SimRules, SimWorld};
pub use weights::ProductionWeights;
