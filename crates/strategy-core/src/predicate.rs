//! Activation Predicates
//!
//! One boxed predicate per strategy, looked up by identity.

use std::collections::BTreeMap;

use strategy_types::{FlavorType, Turn};

use crate::actor::{StrategyActor, StrategyId};
use crate::catalog::{StrategyCatalog, StrategyCatalogEntry};
use crate::error::{PredicateError, StrategyError};
use crate::registry::StrategyAdoptionRegistry;

/// Boxed activation predicate.
pub type PredicateFn<S, A, W> =
    Box<dyn Fn(&PredicateContext<'_, S, A, W>) -> Result<bool, PredicateError>>;

/// Everything a predicate may read while deciding whether its strategy
/// should be active.
pub struct PredicateContext<'a, S: StrategyId, A, W> {
    pub strategy: S,
    pub entry: &'a StrategyCatalogEntry,
    pub actor: &'a A,
    pub world: &'a W,
    pub turn: Turn,
    registry: &'a StrategyAdoptionRegistry<S>,
}

impl<'a, S: StrategyId, A, W> PredicateContext<'a, S, A, W> {
    pub fn new(
        strategy: S,
        entry: &'a StrategyCatalogEntry,
        actor: &'a A,
        world: &'a W,
        turn: Turn,
        registry: &'a StrategyAdoptionRegistry<S>,
    ) -> Self {
        Self {
            strategy,
            entry,
            actor,
            world,
            turn,
            registry,
        }
    }

    pub fn is_adopted(&self, other: S) -> Result<bool, StrategyError> {
        self.registry.is_adopted(other)
    }

    /// Aggregate flavor as of the previous turn.
    pub fn flavor_value(&self, flavor_type: FlavorType) -> i32 {
        self.registry.flavor_value(flavor_type)
    }
}

impl<'a, S: StrategyId, A: StrategyActor, W> PredicateContext<'a, S, A, W> {
    /// Threshold of the evaluated strategy scaled by the actor's personality.
    pub fn weight_threshold(&self) -> i32 {
        self.entry.effective_weight_threshold(self.actor)
    }
}

/// Predicates keyed by strategy identity.
pub struct PredicateTable<S: StrategyId, A, W> {
    predicates: BTreeMap<S, PredicateFn<S, A, W>>,
}

impl<S: StrategyId, A, W> Default for PredicateTable<S, A, W> {
    fn default() -> Self {
        Self {
            predicates: BTreeMap::new(),
        }
    }
}

impl<S: StrategyId, A, W> PredicateTable<S, A, W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `predicate` for `id`, replacing any previous one.
    pub fn register<F>(mut self, id: S, predicate: F) -> Self
    where
        F: Fn(&PredicateContext<'_, S, A, W>) -> Result<bool, PredicateError> + 'static,
    {
        self.insert(id, predicate);
        self
    }

    pub fn insert<F>(&mut self, id: S, predicate: F)
    where
        F: Fn(&PredicateContext<'_, S, A, W>) -> Result<bool, PredicateError> + 'static,
    {
        self.predicates.insert(id, Box::new(predicate));
    }

    /// Registers a predicate that always returns `value`.
    pub fn always(self, id: S, value: bool) -> Self {
        self.register(id, move |_| Ok(value))
    }

    pub fn get(&self, id: S) -> Option<&PredicateFn<S, A, W>> {
        self.predicates.get(&id)
    }

    pub fn contains(&self, id: S) -> bool {
        self.predicates.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Checks every catalog strategy has a predicate.
    pub fn validate(&self, catalog: &StrategyCatalog<S>) -> Result<(), StrategyError> {
        match catalog.ids().find(|id| !self.contains(*id)) {
            Some(missing) => Err(StrategyError::MissingPredicate(missing.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::military::MilitaryStrategy;

    #[test]
    fn test_validate_reports_missing() {
        let catalog = MilitaryStrategy::catalog().unwrap();
        let table: PredicateTable<MilitaryStrategy, (), ()> = PredicateTable::new()
            .always(MilitaryStrategy::NeedRanged, true);
        let error = table.validate(&catalog).unwrap_err();
        assert!(matches!(error, StrategyError::MissingPredicate(_)));
    }

    #[test]
    fn test_validate_complete_table() {
        let catalog = MilitaryStrategy::catalog().unwrap();
        let table = MilitaryStrategy::all()
            .iter()
            .fold(PredicateTable::<MilitaryStrategy, (), ()>::new(), |table, id| {
                table.always(*id, false)
            });
        assert_eq!(table.len(), MilitaryStrategy::all().len());
        assert!(table.validate(&catalog).is_ok());
    }

    #[test]
    fn test_register_replaces() {
        let table: PredicateTable<MilitaryStrategy, (), ()> = PredicateTable::new()
            .always(MilitaryStrategy::AtWar, true)
            .always(MilitaryStrategy::AtWar, false);
        assert_eq!(table.len(), 1);
    }
}
