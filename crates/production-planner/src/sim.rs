//! Turn Simulation
//!
//! A small actor model that drives the three strategy layers and the
//! production planner turn by turn. Actors keep counters for the things the
//! predicates look at (cities, settlers, builders, units) and every turn:
//!
//! 1. grow the capital,
//! 2. evaluate economic, military and city strategies,
//! 3. run the adoption hooks of newly adopted economic strategies,
//! 4. choose and complete one production item.

use std::collections::BTreeSet;
use std::ops::Range;
use std::rc::Rc;
use std::sync::Arc;

use strategy_core::{
    AdoptionHooks, CatalogError, CityStrategy, EconomicStrategy, MilitaryStrategy, Personality,
    PersonalityConfig, PredicateContext, PredicateError, PredicateTable, SimRng, StrategyActor,
    StrategyAdoptionRegistry, StrategyCatalog, StrategyError, StrategyId, TurnParticipant, TurnReport,
    TurnWorld,
};
use strategy_types::{Flavor, FlavorType, FlavorVector, TechOrCivicRef, Turn};
use thiserror::Error;
use tracing::{debug, info};

use crate::buildable::{Buildable, UnitTask};
use crate::planner::{PlanningContext, ProductionPlanner};

/// Capital population grows by one every this many turns.
const GROWTH_INTERVAL: Turn = 6;

/// Error raised while assembling the simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),
}

/// World state shared by every actor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimWorld {
    turn: Turn,
    war: Option<Range<Turn>>,
}

impl SimWorld {
    pub fn new(turn: Turn) -> Self {
        Self { turn, war: None }
    }

    /// Every actor is at war during `turns`.
    pub fn with_war(mut self, turns: Range<Turn>) -> Self {
        self.war = Some(turns);
        self
    }

    /// Every actor is at war for `turns` turns from `start`. The end turn
    /// saturates at the last representable turn.
    pub fn with_war_from(self, start: Turn, turns: i32) -> Self {
        self.with_war(start..start.saturating_add(turns.max(0)))
    }

    pub fn at_war(&self) -> bool {
        self.war.as_ref().is_some_and(|war| war.contains(&self.turn))
    }

    pub fn advance(&mut self) {
        self.turn += 1;
    }
}

impl TurnWorld for SimWorld {
    fn current_turn(&self) -> Turn {
        self.turn
    }
}

/// Everything strategy predicates may read about one actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    pub personality: Personality,
    pub minor: bool,
    pub techs: BTreeSet<String>,
    pub civics: BTreeSet<String>,
    pub difficulty: i32,
    pub cities: u32,
    pub capital_population: u32,
    pub coastal: bool,
    pub settlers: u32,
    pub builders: u32,
    pub scouts: u32,
    pub military_units: u32,
}

impl ActorState {
    pub fn new(personality: Personality, minor: bool) -> Self {
        Self {
            personality,
            minor,
            techs: BTreeSet::new(),
            civics: BTreeSet::new(),
            difficulty: 1,
            cities: 1,
            capital_population: 1,
            coastal: false,
            settlers: 0,
            builders: 0,
            scouts: 0,
            military_units: 0,
        }
    }

    /// Adds a finished item to the actor's counters.
    pub fn complete(&mut self, item: &Buildable) {
        match item.task {
            Some(UnitTask::Settle) => self.settlers += 1,
            Some(UnitTask::Work) => self.builders += 1,
            Some(UnitTask::Explore) => self.scouts += 1,
            Some(UnitTask::Attack | UnitTask::Defend) => self.military_units += 1,
            None => {}
        }
    }
}

impl StrategyActor for ActorState {
    fn is_minor_actor(&self) -> bool {
        self.minor
    }

    fn has_tech_or_civic(&self, reference: &TechOrCivicRef) -> bool {
        match reference {
            TechOrCivicRef::Tech(name) => self.techs.contains(name),
            TechOrCivicRef::Civic(name) => self.civics.contains(name),
        }
    }

    fn personal_preference(&self, flavor: FlavorType) -> i32 {
        self.personality.value(flavor)
    }
}

/// World action requested by an adopted strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCommand {
    /// Turn one settler into a city
    FoundCity,
}

type Predicates<S> = PredicateTable<S, ActorState, SimWorld>;

/// Registers an always-false predicate for every strategy without one.
fn with_defaults<S: StrategyId>(table: Predicates<S>) -> Predicates<S> {
    let missing: Vec<S> = S::all().iter().copied().filter(|id| !table.contains(*id)).collect();
    missing.into_iter().fold(table, |table, id| table.always(id, false))
}

pub fn economic_predicates() -> Predicates<EconomicStrategy> {
    use EconomicStrategy::*;

    with_defaults(
        Predicates::new()
            .register(NeedRecon, |ctx| {
                Ok(ctx.actor.scouts == 0 && !ctx.is_adopted(EnoughRecon)?)
            })
            .register(EnoughRecon, |ctx| Ok(ctx.actor.scouts >= 2))
            .register(EarlyExpansion, |ctx| {
                Ok(i64::from(ctx.actor.cities) < i64::from(ctx.weight_threshold()))
            })
            .register(FoundCity, |ctx| Ok(ctx.actor.settlers > 0))
            .register(ExpandLikeCrazy, |ctx| {
                Ok(ctx.actor.personal_preference(FlavorType::Expansion) >= ctx.weight_threshold())
            })
            .register(ExpandToOtherContinents, |ctx| {
                Ok(ctx.actor.coastal && ctx.actor.cities >= 3)
            })
            .register(NeedHappiness, |ctx| {
                Ok(i64::from(ctx.actor.cities) > i64::from(ctx.weight_threshold()))
            })
            .register(TooManyUnits, |ctx| {
                Ok(ctx.actor.military_units > ctx.actor.cities * 4)
            }),
    )
}

pub fn military_predicates() -> Predicates<MilitaryStrategy> {
    use MilitaryStrategy::*;

    with_defaults(
        Predicates::new()
            .register(NeedMilitaryUnits, |ctx| {
                Ok(ctx.actor.military_units < ctx.actor.cities)
            })
            .register(EnoughMilitaryUnits, |ctx| {
                Ok(ctx.actor.military_units >= ctx.actor.cities * 3)
            })
            .register(AtWar, |ctx| Ok(ctx.world.at_war()))
            // Evaluated after AtWar, so it sees this turn's declaration
            .register(WarMobilization, |ctx| {
                Ok(ctx.is_adopted(AtWar)? && ctx.actor.military_units < ctx.actor.cities * 2)
            }),
    )
}

fn size_band(ctx: &PredicateContext<'_, CityStrategy, ActorState, SimWorld>) -> Result<bool, PredicateError> {
    Ok(CityStrategy::size_band(ctx.actor.capital_population) == ctx.strategy)
}

/// City strategies of the actor's capital.
pub fn city_predicates() -> Predicates<CityStrategy> {
    use CityStrategy::*;

    with_defaults(
        Predicates::new()
            .register(TinyCity, size_band)
            .register(SmallCity, size_band)
            .register(MediumCity, size_band)
            .register(LargeCity, size_band)
            .register(CoastCity, |ctx| Ok(ctx.actor.coastal))
            .register(LandLocked, |ctx| Ok(!ctx.actor.coastal))
            .register(NeedTileImprovers, |ctx| Ok(ctx.actor.builders < ctx.actor.cities))
            .register(EnoughTileImprovers, |ctx| {
                Ok(ctx.actor.builders >= ctx.actor.cities * 2)
            })
            .register(CapitalNeedSettler, |ctx| {
                Ok(ctx.actor.cities < 3 && ctx.actor.capital_population >= 3)
            }),
    )
}

/// Catalogs, predicates, hooks and the planner shared by every actor.
pub struct SimRules {
    economic_catalog: Arc<StrategyCatalog<EconomicStrategy>>,
    military_catalog: Arc<StrategyCatalog<MilitaryStrategy>>,
    city_catalog: Arc<StrategyCatalog<CityStrategy>>,
    economic: Predicates<EconomicStrategy>,
    military: Predicates<MilitaryStrategy>,
    city: Predicates<CityStrategy>,
    hooks: AdoptionHooks<EconomicStrategy, ActorState, SimWorld, SimCommand>,
    planner: ProductionPlanner,
    menu: Vec<Buildable>,
}

impl SimRules {
    /// Built-in catalogs and predicates.
    pub fn new(planner: ProductionPlanner, menu: Vec<Buildable>) -> Result<Self, SimError> {
        let rules = Self {
            economic_catalog: Arc::new(EconomicStrategy::catalog()?),
            military_catalog: Arc::new(MilitaryStrategy::catalog()?),
            city_catalog: Arc::new(CityStrategy::catalog()?),
            economic: economic_predicates(),
            military: military_predicates(),
            city: city_predicates(),
            hooks: AdoptionHooks::new().on_adopt(EconomicStrategy::FoundCity, |actor: &ActorState, _| {
                (actor.settlers > 0).then_some(SimCommand::FoundCity)
            }),
            planner,
            menu,
        };
        rules.economic.validate(&rules.economic_catalog)?;
        rules.military.validate(&rules.military_catalog)?;
        rules.city.validate(&rules.city_catalog)?;
        Ok(rules)
    }

    pub fn planner(&self) -> &ProductionPlanner {
        &self.planner
    }

    pub fn menu(&self) -> &[Buildable] {
        &self.menu
    }
}

/// One simulated actor.
pub struct SimActor {
    name: String,
    state: ActorState,
    economic: StrategyAdoptionRegistry<EconomicStrategy>,
    military: StrategyAdoptionRegistry<MilitaryStrategy>,
    city: StrategyAdoptionRegistry<CityStrategy>,
    rules: Rc<SimRules>,
    rng: SimRng,
    built: Vec<String>,
}

impl SimActor {
    pub fn new(name: impl Into<String>, state: ActorState, rules: Rc<SimRules>, seed: u64) -> Result<Self, SimError> {
        Ok(Self {
            name: name.into(),
            state,
            economic: StrategyAdoptionRegistry::new(Arc::clone(&rules.economic_catalog))?,
            military: StrategyAdoptionRegistry::new(Arc::clone(&rules.military_catalog))?,
            city: StrategyAdoptionRegistry::new(Arc::clone(&rules.city_catalog))?,
            rules,
            rng: SimRng::seed_from_u64(seed),
            built: Vec::new(),
        })
    }

    /// Seeds the actor's personality from a leader's base flavors.
    pub fn from_leader(
        name: impl Into<String>,
        leader: &FlavorVector,
        minor: bool,
        config: &PersonalityConfig,
        rules: Rc<SimRules>,
        seed: u64,
    ) -> Result<Self, SimError> {
        let mut rng = SimRng::seed_from_u64(seed);
        let personality = Personality::from_config(leader, config, &mut rng);
        Self::new(name, ActorState::new(personality, minor), rules, seed.wrapping_add(1))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &ActorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ActorState {
        &mut self.state
    }

    pub fn economic(&self) -> &StrategyAdoptionRegistry<EconomicStrategy> {
        &self.economic
    }

    pub fn military(&self) -> &StrategyAdoptionRegistry<MilitaryStrategy> {
        &self.military
    }

    pub fn city(&self) -> &StrategyAdoptionRegistry<CityStrategy> {
        &self.city
    }

    /// Names of completed items, oldest first.
    pub fn built(&self) -> &[String] {
        &self.built
    }

    /// Combined flavors of every adopted strategy.
    pub fn strategy_flavors(&self) -> FlavorVector {
        let mut flavors = *self.economic.flavors();
        flavors += self.military.flavors();
        flavors += self.city.flavors();
        flavors
    }

    /// Planner inputs for the capital this turn.
    pub fn planning_context(&self) -> Result<PlanningContext, StrategyError> {
        let operation_unit = if self.military.is_adopted(MilitaryStrategy::AtWar)? {
            self.rules
                .planner
                .recommend_best(&self.base_context(), &self.rules.menu, UnitTask::Attack)
                .map(|item| item.name)
        } else {
            None
        };
        Ok(PlanningContext {
            operation_unit,
            ..self.base_context()
        })
    }

    fn base_context(&self) -> PlanningContext {
        PlanningContext {
            settlers_on_map: self.state.settlers,
            builders_on_map: self.state.builders,
            cities: self.state.cities,
            difficulty: self.state.difficulty,
            ..PlanningContext::new(self.state.personality, self.strategy_flavors())
        }
    }

    fn apply(&mut self, command: SimCommand) {
        match command {
            SimCommand::FoundCity => {
                if self.state.settlers > 0 {
                    self.state.settlers -= 1;
                    self.state.cities += 1;
                    info!(actor = %self.name, cities = self.state.cities, "city founded");
                }
            }
        }
    }
}

impl TurnParticipant<SimWorld> for SimActor {
    fn id(&self) -> &str {
        &self.name
    }

    fn take_turn(&mut self, world: &SimWorld) -> Result<(), StrategyError> {
        let turn = world.current_turn();
        if turn > 0 && turn % GROWTH_INTERVAL == 0 {
            self.state.capital_population += 1;
        }

        let rules = Rc::clone(&self.rules);
        let report = self.economic.evaluate_turn(&self.state, world, &rules.economic)?;
        let military = self.military.evaluate_turn(&self.state, world, &rules.military)?;
        let city = self.city.evaluate_turn(&self.state, world, &rules.city)?;
        if !(report.is_quiet() && military.is_quiet() && city.is_quiet()) {
            debug!(
                actor = %self.name,
                turn,
                economic = %describe_changes(&report),
                military = %describe_changes(&military),
                city = %describe_changes(&city),
                "strategies changed"
            );
        }

        for command in rules.hooks.dispatch(&report, &self.state, world) {
            self.apply(command);
        }

        let ctx = self.planning_context()?;
        match rules.planner.choose(&ctx, &rules.menu, &mut self.rng) {
            Some(item) => {
                debug!(actor = %self.name, turn, item = %item.name, "production completed");
                self.state.complete(&item);
                self.built.push(item.name);
            }
            None => debug!(actor = %self.name, turn, "nothing to build"),
        }
        Ok(())
    }
}

/// Transitions of one layer as `+adopted` and `-abandoned` names.
fn describe_changes<S: StrategyId>(report: &TurnReport<S>) -> String {
    report
        .adopted()
        .map(|id| format!("+{}", id.name()))
        .chain(report.abandoned().map(|id| format!("-{}", id.name())))
        .collect::<Vec<_>>()
        .join(",")
}

/// Built-in leaders as `(name, base flavors, minor actor)`.
pub fn leader_presets() -> Vec<(&'static str, FlavorVector, bool)> {
    use FlavorType::*;

    let flavors = |values: &[(FlavorType, i32)]| -> FlavorVector {
        values.iter().map(|&(axis, value)| Flavor::new(axis, value)).collect()
    };

    vec![
        (
            "rome",
            flavors(&[
                (Expansion, 8),
                (Offense, 6),
                (Defense, 5),
                (Production, 6),
                (Growth, 5),
                (TileImprovement, 5),
                (Recon, 4),
                (Culture, 4),
                (Science, 4),
                (Gold, 4),
            ]),
            false,
        ),
        (
            "greece",
            flavors(&[
                (Culture, 8),
                (Science, 7),
                (Wonder, 6),
                (Growth, 5),
                (Expansion, 5),
                (Defense, 5),
                (Ranged, 4),
                (TileImprovement, 4),
                (Recon, 3),
            ]),
            false,
        ),
        (
            "geneva",
            flavors(&[
                (Gold, 7),
                (Science, 6),
                (Growth, 5),
                (Defense, 5),
                (Ranged, 4),
                (TileImprovement, 3),
            ]),
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildable::starter_buildables;
    use crate::config::PlannerConfig;
    use strategy_core::Transition;

    fn rules() -> Rc<SimRules> {
        Rc::new(SimRules::new(ProductionPlanner::new(PlannerConfig::default()), starter_buildables()).unwrap())
    }

    fn actor(minor: bool) -> SimActor {
        let (_, leader, _) = leader_presets().remove(0);
        SimActor::new("rome", ActorState::new(Personality::new(leader), minor), rules(), 3).unwrap()
    }

    #[test]
    fn test_world_war_range() {
        let mut world = SimWorld::new(9).with_war(10..12);
        assert!(!world.at_war());
        world.advance();
        assert!(world.at_war());
        world.advance();
        world.advance();
        assert!(!world.at_war());
    }

    #[test]
    fn test_war_from_saturates_at_last_turn() {
        let mut world = SimWorld::new(i32::MAX - 1).with_war_from(i32::MAX - 1, 10);
        assert!(world.at_war());
        world.advance();
        // The saturated range is half-open
        assert!(!world.at_war());

        let world = SimWorld::new(4).with_war_from(4, -3);
        assert!(!world.at_war());
    }

    #[test]
    fn test_describe_changes() {
        let mut report = TurnReport::new(7);
        assert_eq!(describe_changes(&report), "");
        report.transitions.push((MilitaryStrategy::WinningWars, Transition::Abandon));
        report.transitions.push((MilitaryStrategy::AtWar, Transition::Adopt));
        assert_eq!(describe_changes(&report), "+at_war,-winning_wars");
    }

    #[test]
    fn test_tables_cover_catalogs() {
        assert_eq!(economic_predicates().len(), EconomicStrategy::all().len());
        assert_eq!(military_predicates().len(), MilitaryStrategy::all().len());
        assert_eq!(city_predicates().len(), CityStrategy::all().len());
    }

    #[test]
    fn test_size_band_adopted_on_first_turn() {
        let mut actor = actor(false);
        actor.take_turn(&SimWorld::new(0)).unwrap();
        assert!(actor.city().is_adopted(CityStrategy::TinyCity).unwrap());
        assert!(!actor.city().is_adopted(CityStrategy::SmallCity).unwrap());
        assert!(actor.city().is_adopted(CityStrategy::LandLocked).unwrap());
    }

    #[test]
    fn test_early_expansion_shapes_flavors() {
        let mut actor = actor(false);
        actor.take_turn(&SimWorld::new(0)).unwrap();
        assert!(actor.economic().is_adopted(EconomicStrategy::EarlyExpansion).unwrap());
        assert_eq!(actor.strategy_flavors().value(FlavorType::Expansion), 75);
        assert_eq!(actor.built().len(), 1);
    }

    #[test]
    fn test_minor_actor_skips_major_only() {
        let mut actor = actor(true);
        actor.take_turn(&SimWorld::new(0)).unwrap();
        assert!(!actor.economic().is_adopted(EconomicStrategy::EarlyExpansion).unwrap());
    }

    #[test]
    fn test_found_city_hook() {
        let mut actor = actor(false);
        actor.state_mut().settlers = 1;
        actor.take_turn(&SimWorld::new(0)).unwrap();
        assert!(actor.economic().is_adopted(EconomicStrategy::FoundCity).unwrap());
        assert_eq!(actor.state().cities, 2);
    }

    #[test]
    fn test_war_requests_operation_unit() {
        let mut actor = actor(false);
        actor.take_turn(&SimWorld::new(0).with_war(0..10)).unwrap();
        assert!(actor.military().is_adopted(MilitaryStrategy::AtWar).unwrap());
        assert!(actor.military().is_adopted(MilitaryStrategy::WarMobilization).unwrap());
        let ctx = actor.planning_context().unwrap();
        assert_eq!(ctx.operation_unit.as_deref(), Some("warrior"));
    }

    #[test]
    fn test_complete_updates_counters() {
        let mut state = ActorState::new(Personality::default(), false);
        for item in starter_buildables() {
            state.complete(&item);
        }
        assert_eq!(state.settlers, 1);
        assert_eq!(state.builders, 1);
        assert_eq!(state.scouts, 1);
        assert_eq!(state.military_units, 2);
    }

    #[test]
    fn test_tech_prerequisites() {
        let mut state = ActorState::new(Personality::default(), false);
        state.techs.insert("ship_building".to_string());
        assert!(state.has_tech_or_civic(&TechOrCivicRef::tech("ship_building")));
        assert!(!state.has_tech_or_civic(&TechOrCivicRef::civic("ship_building")));
    }
}
