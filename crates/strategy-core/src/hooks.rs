//! Adoption Hooks
//!
//! Predicates only answer whether a strategy should be active. World actions
//! that go with a strategy (launching a settle operation when expansion is
//! adopted, sending a trade route to a city state) are registered here and
//! dispatched from the turn report once transitions have settled.

use std::collections::BTreeMap;

use crate::actor::StrategyId;
use crate::registry::TurnReport;

/// Boxed adoption action producing an optional command.
pub type HookFn<A, W, C> = Box<dyn Fn(&A, &W) -> Option<C>>;

/// Per-strategy actions run when the strategy is adopted.
pub struct AdoptionHooks<S: StrategyId, A, W, C> {
    on_adopt: BTreeMap<S, Vec<HookFn<A, W, C>>>,
}

impl<S: StrategyId, A, W, C> Default for AdoptionHooks<S, A, W, C> {
    fn default() -> Self {
        Self {
            on_adopt: BTreeMap::new(),
        }
    }
}

impl<S: StrategyId, A, W, C> AdoptionHooks<S, A, W, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action run every time `id` is adopted.
    pub fn on_adopt<F>(mut self, id: S, action: F) -> Self
    where
        F: Fn(&A, &W) -> Option<C> + 'static,
    {
        self.on_adopt.entry(id).or_default().push(Box::new(action));
        self
    }

    /// Collects the commands of every strategy adopted in `report`, in
    /// adoption order.
    pub fn dispatch(&self, report: &TurnReport<S>, actor: &A, world: &W) -> Vec<C> {
        report
            .adopted()
            .filter_map(|id| self.on_adopt.get(&id))
            .flat_map(|actions| actions.iter().filter_map(move |action| action(actor, world)))
            .collect()
    }
}
