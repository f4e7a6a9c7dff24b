//! Turn simulator
//!
//! Runs a handful of actors through the strategy layers and the production
//! planner, logging adoptions and production choices as it goes.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use production_planner::{
    leader_presets, starter_buildables, BuildableList, PlannerConfig, ProductionPlanner, SimActor, SimRules,
    SimWorld,
};
use strategy_core::{EngineConfig, StrategyId, TurnLoop};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Command line arguments for the turn simulator
#[derive(Parser, Debug)]
#[command(name = "turn_sim")]
#[command(about = "Strategy adoption and production planning over simulated turns")]
struct Args {
    /// Random seed, overrides the engine config
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns, overrides the engine config
    #[arg(long)]
    turns: Option<i32>,

    /// Engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Planner configuration file
    #[arg(long)]
    planner_config: Option<PathBuf>,

    /// Production menu as `[[buildable]]` tables
    #[arg(long)]
    menu: Option<PathBuf>,

    /// Log filter, used when RUST_LOG is unset
    #[arg(long)]
    log_filter: Option<String>,

    /// Number of actors, cycling through the built-in leaders
    #[arg(long, default_value_t = 3)]
    actors: usize,

    /// First turn of a war every actor takes part in
    #[arg(long)]
    war_from: Option<i32>,

    /// Length of that war in turns
    #[arg(long, default_value_t = 10)]
    war_turns: i32,

    /// Print the default configuration files and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_default_config {
        println!("{}", strategy_core::default_config_toml());
        println!("{}", production_planner::default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("turn_sim: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(turns) = args.turns {
        config.simulation.turns = turns;
    }
    if let Some(filter) = &args.log_filter {
        config.logging.filter = filter.clone();
    }

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    let planner_config = match &args.planner_config {
        Some(path) => PlannerConfig::from_file(path)?,
        None => PlannerConfig::default(),
    };
    let menu = match &args.menu {
        Some(path) => BuildableList::from_toml_str(&std::fs::read_to_string(path)?)?.buildable,
        None => starter_buildables(),
    };

    let rules = Rc::new(SimRules::new(ProductionPlanner::new(planner_config), menu)?);
    let presets = leader_presets();
    let mut actors = Vec::with_capacity(args.actors);
    for index in 0..args.actors {
        let (name, leader, minor) = &presets[index % presets.len()];
        let name = if index < presets.len() {
            name.to_string()
        } else {
            format!("{}-{}", name, index / presets.len() + 1)
        };
        let seed = config.simulation.seed.wrapping_add(index as u64 * 1000);
        actors.push(SimActor::from_leader(
            name,
            leader,
            *minor,
            &config.personality,
            Rc::clone(&rules),
            seed,
        )?);
    }

    let mut world = SimWorld::new(config.simulation.first_turn);
    if let Some(start) = args.war_from {
        world = world.with_war_from(start, args.war_turns);
    }

    info!(
        seed = config.simulation.seed,
        turns = config.simulation.turns,
        actors = actors.len(),
        "starting simulation"
    );

    let mut turn_loop = TurnLoop::new();
    for _ in 0..config.simulation.turns {
        let summary = turn_loop.process(&mut actors, &world);
        if !summary.all_completed() {
            warn!(failed = summary.failed.len(), "some actors skipped this turn");
        }
        world.advance();
    }

    for actor in &actors {
        let adopted: Vec<&str> = actor
            .economic()
            .adopted()
            .map(StrategyId::name)
            .chain(actor.military().adopted().map(StrategyId::name))
            .chain(actor.city().adopted().map(StrategyId::name))
            .collect();
        info!(
            actor = actor.name(),
            cities = actor.state().cities,
            built = actor.built().len(),
            adopted = %adopted.join(","),
            "final state"
        );
    }

    info!(turns = turn_loop.turns_processed(), "simulation finished");
    Ok(())
}
