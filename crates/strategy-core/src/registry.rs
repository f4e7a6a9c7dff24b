//! Strategy Adoption Registry
//!
//! Owns the adoption record of every tracked strategy for one actor and the
//! aggregate flavor vector derived from them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use strategy_types::{FlavorType, FlavorVector, Turn};
use tracing::debug;

use crate::actor::{StrategyActor, StrategyId, TurnWorld};
use crate::adoption::{StrategyAdoptionState, Transition, TransitionInputs};
use crate::catalog::StrategyCatalog;
use crate::error::StrategyError;
use crate::predicate::{PredicateContext, PredicateTable};

/// Transitions that fired during one `evaluate_turn` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport<S> {
    pub turn: Turn,
    /// Adopt and abandon transitions, in evaluation order
    pub transitions: Vec<(S, Transition)>,
    /// Number of predicates actually called
    pub predicates_evaluated: usize,
}

impl<S: StrategyId> TurnReport<S> {
    pub fn new(turn: Turn) -> Self {
        Self {
            turn,
            transitions: Vec::new(),
            predicates_evaluated: 0,
        }
    }

    fn record(&mut self, id: S, transition: Transition) {
        if transition != Transition::Unchanged {
            self.transitions.push((id, transition));
        }
    }

    pub fn adopted(&self) -> impl Iterator<Item = S> + '_ {
        self.of_kind(Transition::Adopt)
    }

    pub fn abandoned(&self) -> impl Iterator<Item = S> + '_ {
        self.of_kind(Transition::Abandon)
    }

    /// No strategy changed state.
    pub fn is_quiet(&self) -> bool {
        self.transitions.is_empty()
    }

    fn of_kind(&self, kind: Transition) -> impl Iterator<Item = S> + '_ {
        self.transitions
            .iter()
            .filter(move |(_, transition)| *transition == kind)
            .map(|(id, _)| *id)
    }
}

/// Adoption state of one actor's strategies in one layer.
#[derive(Debug, Clone)]
pub struct StrategyAdoptionRegistry<S: StrategyId> {
    catalog: Arc<StrategyCatalog<S>>,
    states: BTreeMap<S, StrategyAdoptionState>,
    flavors: FlavorVector,
}

impl<S: StrategyId> StrategyAdoptionRegistry<S> {
    /// Tracks every strategy of the layer.
    pub fn new(catalog: Arc<StrategyCatalog<S>>) -> Result<Self, StrategyError> {
        Self::with_strategies(catalog, S::all().iter().copied())
    }

    /// Tracks only `ids`. Each must have a catalog entry.
    pub fn with_strategies(
        catalog: Arc<StrategyCatalog<S>>,
        ids: impl IntoIterator<Item = S>,
    ) -> Result<Self, StrategyError> {
        let mut states = BTreeMap::new();
        for id in ids {
            catalog.entry(id)?;
            states.insert(id, StrategyAdoptionState::default());
        }
        Ok(Self {
            catalog,
            states,
            flavors: FlavorVector::new(),
        })
    }

    pub fn catalog(&self) -> &Arc<StrategyCatalog<S>> {
        &self.catalog
    }

    pub fn state(&self, id: S) -> Result<&StrategyAdoptionState, StrategyError> {
        self.states
            .get(&id)
            .ok_or_else(|| StrategyError::UnknownStrategy(id.to_string()))
    }

    fn state_mut(&mut self, id: S) -> Result<&mut StrategyAdoptionState, StrategyError> {
        self.states
            .get_mut(&id)
            .ok_or_else(|| StrategyError::UnknownStrategy(id.to_string()))
    }

    pub fn is_adopted(&self, id: S) -> Result<bool, StrategyError> {
        Ok(self.state(id)?.adopted)
    }

    /// Turn the strategy was adopted, or [`NEVER`](strategy_types::NEVER).
    pub fn turn_of_adoption(&self, id: S) -> Result<Turn, StrategyError> {
        Ok(self.state(id)?.turn_adopted)
    }

    /// Forces the strategy adopted as of `turn`.
    pub fn adopt(&mut self, id: S, turn: Turn) -> Result<(), StrategyError> {
        self.state_mut(id)?.adopt(turn);
        self.recompute_flavors();
        Ok(())
    }

    /// Forces the strategy abandoned.
    pub fn abandon(&mut self, id: S) -> Result<(), StrategyError> {
        self.state_mut(id)?.abandon();
        self.recompute_flavors();
        Ok(())
    }

    /// Tracked strategies, in identity order.
    pub fn tracked(&self) -> impl Iterator<Item = S> + '_ {
        self.states.keys().copied()
    }

    /// Currently adopted strategies, in identity order.
    pub fn adopted(&self) -> impl Iterator<Item = S> + '_ {
        self.states
            .iter()
            .filter(|(_, state)| state.adopted)
            .map(|(id, _)| *id)
    }

    pub fn flavors(&self) -> &FlavorVector {
        &self.flavors
    }

    pub fn flavor_value(&self, flavor_type: FlavorType) -> i32 {
        self.flavors.value(flavor_type)
    }

    /// Rebuilds the aggregate from the adopted strategies' catalog flavors.
    pub fn recompute_flavors(&mut self) {
        let catalog = &self.catalog;
        self.flavors = FlavorVector::sum_of(
            self.states
                .iter()
                .filter(|(_, state)| state.adopted)
                .filter_map(|(id, _)| catalog.get(*id))
                .map(|entry| &entry.flavors),
        );
    }

    /// Runs the transition rules for every tracked strategy, then rebuilds the
    /// aggregate flavors.
    ///
    /// Strategies are evaluated in identity order and see the transitions of
    /// earlier ones. A failing predicate aborts the rest of the turn; the
    /// aggregate still reflects the transitions applied so far.
    pub fn evaluate_turn<A, W>(
        &mut self,
        actor: &A,
        world: &W,
        predicates: &PredicateTable<S, A, W>,
    ) -> Result<TurnReport<S>, StrategyError>
    where
        A: StrategyActor,
        W: TurnWorld,
    {
        let result = self.transition_all(actor, world, predicates);
        self.recompute_flavors();
        result
    }

    fn transition_all<A, W>(
        &mut self,
        actor: &A,
        world: &W,
        predicates: &PredicateTable<S, A, W>,
    ) -> Result<TurnReport<S>, StrategyError>
    where
        A: StrategyActor,
        W: TurnWorld,
    {
        let turn = world.current_turn();
        let catalog = Arc::clone(&self.catalog);
        let ids: Vec<S> = self.states.keys().copied().collect();
        let mut report = TurnReport::new(turn);

        for id in ids {
            let entry = catalog.entry(id)?;
            let state = *self.state(id)?;
            let inputs = TransitionInputs::resolve(entry, actor, turn);
            let pending = state.pending(entry, &inputs);
            if pending.is_idle() {
                continue;
            }

            let predicate_result = if inputs.obsolete {
                false
            } else {
                let predicate = predicates
                    .get(id)
                    .ok_or_else(|| StrategyError::MissingPredicate(id.to_string()))?;
                report.predicates_evaluated += 1;
                let context = PredicateContext::new(id, entry, actor, world, turn, self);
                predicate(&context).map_err(|source| StrategyError::Predicate {
                    strategy: id.to_string(),
                    source,
                })?
            };

            let transition = pending.decide(predicate_result);
            match transition {
                Transition::Adopt => debug!(strategy = %id, turn, "strategy adopted"),
                Transition::Abandon => debug!(strategy = %id, turn, "strategy abandoned"),
                Transition::Unchanged => {}
            }
            self.state_mut(id)?.apply(transition, turn);
            report.record(id, transition);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::military::MilitaryStrategy;
    use crate::error::PredicateError;
    use crate::catalog::StrategyCatalogEntry;
    use std::collections::BTreeSet;
    use strategy_types::{TechOrCivicRef, NEVER};

    struct Leader {
        minor: bool,
    }

    impl StrategyActor for Leader {
        fn is_minor_actor(&self) -> bool {
            self.minor
        }

        fn has_tech_or_civic(&self, _reference: &TechOrCivicRef) -> bool {
            false
        }

        fn personal_preference(&self, _flavor: FlavorType) -> i32 {
            5
        }
    }

    struct World(Turn);

    impl TurnWorld for World {
        fn current_turn(&self) -> Turn {
            self.0
        }
    }

    type Table = PredicateTable<MilitaryStrategy, Leader, World>;

    fn registry() -> StrategyAdoptionRegistry<MilitaryStrategy> {
        StrategyAdoptionRegistry::new(Arc::new(MilitaryStrategy::catalog().unwrap())).unwrap()
    }

    fn all_false() -> Table {
        MilitaryStrategy::all()
            .iter()
            .fold(Table::new(), |table, id| table.always(*id, false))
    }

    #[test]
    fn test_new_tracks_everything_unadopted() {
        let registry = registry();
        assert_eq!(registry.tracked().count(), MilitaryStrategy::all().len());
        assert_eq!(registry.adopted().count(), 0);
        assert_eq!(registry.turn_of_adoption(MilitaryStrategy::AtWar).unwrap(), NEVER);
        assert!(registry.flavors().is_zero());
    }

    #[test]
    fn test_missing_catalog_entry_is_fatal() {
        let catalog = StrategyCatalog::builder()
            .entry(
                MilitaryStrategy::AtWar,
                crate::catalog::StrategyCatalogEntry::builder("At War").build().unwrap(),
            )
            .build()
            .unwrap();
        let result = StrategyAdoptionRegistry::new(Arc::new(catalog));
        assert!(matches!(result, Err(StrategyError::MissingCatalogEntry(_))));
    }

    #[test]
    fn test_unknown_strategy_fails_loudly() {
        let catalog = Arc::new(MilitaryStrategy::catalog().unwrap());
        let mut registry =
            StrategyAdoptionRegistry::with_strategies(catalog, [MilitaryStrategy::AtWar]).unwrap();
        assert!(matches!(
            registry.is_adopted(MilitaryStrategy::NeedRanged),
            Err(StrategyError::UnknownStrategy(name)) if name == "need_ranged"
        ));
        assert!(registry.adopt(MilitaryStrategy::NeedRanged, 3).is_err());
        assert!(registry.abandon(MilitaryStrategy::NeedRanged).is_err());
        assert!(registry.turn_of_adoption(MilitaryStrategy::NeedRanged).is_err());
    }

    #[test]
    fn test_adopt_and_abandon_update_flavors() {
        let mut registry = registry();
        registry.adopt(MilitaryStrategy::AtWar, 12).unwrap();
        assert!(registry.is_adopted(MilitaryStrategy::AtWar).unwrap());
        assert_eq!(registry.turn_of_adoption(MilitaryStrategy::AtWar).unwrap(), 12);
        assert_eq!(registry.flavor_value(FlavorType::Offense), 15);
        assert_eq!(registry.flavor_value(FlavorType::Wonder), -10);

        registry.adopt(MilitaryStrategy::WinningWars, 12).unwrap();
        assert_eq!(registry.flavor_value(FlavorType::Offense), 20);
        assert_eq!(registry.flavor_value(FlavorType::Defense), 10);

        registry.abandon(MilitaryStrategy::AtWar).unwrap();
        assert_eq!(registry.flavor_value(FlavorType::Offense), 5);
        assert_eq!(registry.adopted().collect::<Vec<_>>(), vec![MilitaryStrategy::WinningWars]);
    }

    #[test]
    fn test_evaluate_turn_adopts_and_aggregates() {
        let mut registry = registry();
        let predicates = all_false().always(MilitaryStrategy::AtWar, true);
        let report = registry
            .evaluate_turn(&Leader { minor: false }, &World(3), &predicates)
            .unwrap();
        assert_eq!(report.adopted().collect::<Vec<_>>(), vec![MilitaryStrategy::AtWar]);
        assert_eq!(registry.flavor_value(FlavorType::CityDefense), 10);
    }

    #[test]
    fn test_evaluate_turn_skips_idle_predicates() {
        let mut registry = registry();
        // Every catalog entry with a turn floor above 10 stays idle
        let report = registry
            .evaluate_turn(&Leader { minor: false }, &World(10), &all_false())
            .unwrap();
        assert!(report.is_quiet());
        let expected = MilitaryStrategy::catalog()
            .unwrap()
            .iter()
            .filter(|(_, entry)| entry.not_before_turn <= 10)
            .count();
        assert_eq!(report.predicates_evaluated, expected);
    }

    #[test]
    fn test_minor_actor_skips_major_only() {
        let mut registry = registry();
        let predicates = MilitaryStrategy::all()
            .iter()
            .fold(Table::new(), |table, id| table.always(*id, true));
        registry
            .evaluate_turn(&Leader { minor: true }, &World(60), &predicates)
            .unwrap();
        assert!(!registry.is_adopted(MilitaryStrategy::AtWar).unwrap());
        assert!(registry.is_adopted(MilitaryStrategy::NeedRanged).unwrap());
    }

    #[test]
    fn test_predicate_sees_earlier_transitions() {
        let mut registry = registry();
        // AtWar sorts before WinningWars and is adopted first
        let predicates = all_false()
            .always(MilitaryStrategy::AtWar, true)
            .register(MilitaryStrategy::WinningWars, |ctx| {
                Ok(ctx.is_adopted(MilitaryStrategy::AtWar)?)
            });
        registry
            .evaluate_turn(&Leader { minor: false }, &World(1), &predicates)
            .unwrap();
        assert!(registry.is_adopted(MilitaryStrategy::WinningWars).unwrap());
    }

    #[test]
    fn test_predicate_error_aborts_turn() {
        let mut registry = registry();
        let predicates = all_false()
            .always(MilitaryStrategy::NeedRanged, true)
            .register(MilitaryStrategy::AtWar, |_| Err(PredicateError::new("no world")));
        let error = registry
            .evaluate_turn(&Leader { minor: false }, &World(30), &predicates)
            .unwrap_err();
        assert!(matches!(error, StrategyError::Predicate { ref strategy, .. } if strategy == "at_war"));
    }

    #[test]
    fn test_missing_predicate() {
        let mut registry = registry();
        let error = registry
            .evaluate_turn(&Leader { minor: false }, &World(30), &Table::new())
            .unwrap_err();
        assert!(matches!(error, StrategyError::MissingPredicate(_)));
    }

    struct Researcher {
        known: BTreeSet<String>,
    }

    impl StrategyActor for Researcher {
        fn is_minor_actor(&self) -> bool {
            false
        }

        fn has_tech_or_civic(&self, reference: &TechOrCivicRef) -> bool {
            self.known.contains(reference.name())
        }

        fn personal_preference(&self, _flavor: FlavorType) -> i32 {
            5
        }
    }

    type ResearchTable = PredicateTable<MilitaryStrategy, Researcher, World>;

    fn gated_registry(id: MilitaryStrategy, entry: StrategyCatalogEntry) -> StrategyAdoptionRegistry<MilitaryStrategy> {
        let catalog = StrategyCatalog::builder().entry(id, entry).build().unwrap();
        StrategyAdoptionRegistry::with_strategies(Arc::new(catalog), [id]).unwrap()
    }

    #[test]
    fn test_prerequisite_gates_adoption() {
        let entry = StrategyCatalogEntry::builder("At War")
            .prerequisite(TechOrCivicRef::tech("bronze_working"))
            .build()
            .unwrap();
        let mut registry = gated_registry(MilitaryStrategy::AtWar, entry);
        let predicates = ResearchTable::new().always(MilitaryStrategy::AtWar, true);
        let mut actor = Researcher { known: BTreeSet::new() };

        let report = registry.evaluate_turn(&actor, &World(0), &predicates).unwrap();
        assert!(report.is_quiet());
        assert_eq!(report.predicates_evaluated, 0);
        assert!(!registry.is_adopted(MilitaryStrategy::AtWar).unwrap());

        actor.known.insert("bronze_working".to_string());
        let report = registry.evaluate_turn(&actor, &World(1), &predicates).unwrap();
        assert_eq!(report.adopted().collect::<Vec<_>>(), vec![MilitaryStrategy::AtWar]);
        assert_eq!(report.predicates_evaluated, 1);
        assert_eq!(registry.turn_of_adoption(MilitaryStrategy::AtWar).unwrap(), 1);
    }

    #[test]
    fn test_obsolete_strategy_abandoned_at_recheck_without_predicate() {
        let entry = StrategyCatalogEntry::builder("Winning Wars")
            .recheck_interval(2)
            .minimum_adoption(2)
            .obsoleted_by(TechOrCivicRef::tech("gunpowder"))
            .flavor(FlavorType::Offense, 5)
            .build()
            .unwrap();
        let mut registry = gated_registry(MilitaryStrategy::WinningWars, entry);
        let mut actor = Researcher { known: BTreeSet::new() };

        let adopting = ResearchTable::new().always(MilitaryStrategy::WinningWars, true);
        registry.evaluate_turn(&actor, &World(0), &adopting).unwrap();
        assert!(registry.is_adopted(MilitaryStrategy::WinningWars).unwrap());
        assert_eq!(registry.flavor_value(FlavorType::Offense), 5);

        actor.known.insert("gunpowder".to_string());
        // Any call would abort the turn
        let failing = ResearchTable::new().register(MilitaryStrategy::WinningWars, |_| {
            Err(PredicateError::new("obsolete strategy evaluated"))
        });

        // Between re-checks nothing is evaluated
        let report = registry.evaluate_turn(&actor, &World(1), &failing).unwrap();
        assert!(report.is_quiet());
        assert_eq!(report.predicates_evaluated, 0);
        assert!(registry.is_adopted(MilitaryStrategy::WinningWars).unwrap());

        let report = registry.evaluate_turn(&actor, &World(2), &failing).unwrap();
        assert_eq!(report.abandoned().collect::<Vec<_>>(), vec![MilitaryStrategy::WinningWars]);
        assert_eq!(report.predicates_evaluated, 0);
        assert!(!registry.is_adopted(MilitaryStrategy::WinningWars).unwrap());
        assert!(registry.flavors().is_zero());

        // Never re-adopted while obsolete
        let report = registry.evaluate_turn(&actor, &World(3), &failing).unwrap();
        assert!(report.is_quiet());
        assert_eq!(report.predicates_evaluated, 0);
        assert!(!registry.is_adopted(MilitaryStrategy::WinningWars).unwrap());
    }
}
