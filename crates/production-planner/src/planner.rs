//! Production Planner
//!
//! Turns a production menu into a weighted candidate set and picks one item.
//!
//! Weighting per item:
//! 1. Base weight from the item's flavors and the leader's combined flavors.
//! 2. Caps zero out settlers and builders once enough are on the map.
//! 3. A unit requested by an operation gets a flat army bonus scaled by
//!    offense and difficulty.
//! 4. The result is discounted by the item's turns to complete.

use serde::{Deserialize, Serialize};
use strategy_core::{
    reweight_by_turns, Personality, ProductionSelector, RandomSource, WeightedChoiceSet,
};
use strategy_types::{FlavorType, FlavorVector};
use tracing::debug;

use crate::buildable::{Buildable, UnitTask};
use crate::config::PlannerConfig;
use crate::weights::ProductionWeights;

/// Per-settlement inputs to one planning decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningContext {
    pub personality: Personality,
    /// Aggregate flavors of the actor's adopted strategies
    pub strategy_flavors: FlavorVector,
    pub settlers_on_map: u32,
    pub builders_on_map: u32,
    pub cities: u32,
    /// Difficulty level of the actor
    pub difficulty: i32,
    /// Unit an active operation asked this settlement to build
    pub operation_unit: Option<String>,
}

impl PlanningContext {
    pub fn new(personality: Personality, strategy_flavors: FlavorVector) -> Self {
        Self {
            personality,
            strategy_flavors,
            settlers_on_map: 0,
            builders_on_map: 0,
            cities: 1,
            difficulty: 1,
            operation_unit: None,
        }
    }

    pub fn leader_flavor(&self, flavor_type: FlavorType) -> i32 {
        ProductionWeights::leader_flavor(&self.personality, &self.strategy_flavors, flavor_type)
    }
}

/// Settlement production planner.
#[derive(Debug, Clone, Default)]
pub struct ProductionPlanner {
    config: PlannerConfig,
    selector: ProductionSelector,
}

impl ProductionPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            selector: ProductionSelector::new(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn settler_capped(&self, ctx: &PlanningContext) -> bool {
        ctx.settlers_on_map >= self.config.caps.max_settlers_on_map
    }

    fn builder_capped(&self, ctx: &PlanningContext) -> bool {
        ctx.builders_on_map > ctx.cities * self.config.caps.max_builders_per_city
    }

    /// Bonus for a unit requested by an operation.
    pub fn operation_bonus(&self, ctx: &PlanningContext) -> f64 {
        let weights = &self.config.weights;
        let difficulty_factor = (ctx.difficulty - weights.difficulty_bonus_offset).max(1);
        weights.army_unit_base
            + weights.operation_unit_flavor_multiplier
                * f64::from(ctx.leader_flavor(FlavorType::Offense))
                * f64::from(difficulty_factor)
    }

    /// Weight of a single item before the time discount.
    pub fn raw_weight(&self, ctx: &PlanningContext, item: &Buildable) -> f64 {
        if (item.is_settler() && self.settler_capped(ctx)) || (item.is_builder() && self.builder_capped(ctx)) {
            return 0.0;
        }

        let mut weight = ProductionWeights::base_weight(item, &ctx.personality, &ctx.strategy_flavors);
        if ctx.operation_unit.as_deref() == Some(item.name.as_str()) {
            weight += self.operation_bonus(ctx);
        }
        weight
    }

    /// Discounted weights of every item, keyed by name.
    pub fn candidates(&self, ctx: &PlanningContext, items: &[Buildable]) -> WeightedChoiceSet<String> {
        let raw: WeightedChoiceSet<String> = items
            .iter()
            .map(|item| (item.name.clone(), self.raw_weight(ctx, item)))
            .collect();
        reweight_by_turns(&raw, |name| {
            items
                .iter()
                .find(|item| &item.name == name)
                .map_or(1, |item| item.turns_to_complete)
        })
    }

    /// Draws one item to build. `None` means nothing worth building this turn.
    pub fn choose<R: RandomSource + ?Sized>(
        &self,
        ctx: &PlanningContext,
        items: &[Buildable],
        rng: &mut R,
    ) -> Option<Buildable> {
        let choices = self.candidates(ctx, items);
        let Some(name) = self.selector.choose(&choices, rng) else {
            debug!(items = items.len(), "no production candidate");
            return None;
        };
        debug!(item = %name, weight = choices.weight(&name), "production chosen");
        items.iter().find(|item| item.name == name).cloned()
    }

    /// Heaviest item for `task`, without drawing.
    pub fn recommend_best(&self, ctx: &PlanningContext, items: &[Buildable], task: UnitTask) -> Option<Buildable> {
        let matching: Vec<Buildable> = items
            .iter()
            .filter(|item| item.task == Some(task))
            .cloned()
            .collect();
        let choices = self.candidates(ctx, &matching);
        let best = choices.best()?;
        matching.iter().find(|item| &item.name == best).cloned()
    }
}
