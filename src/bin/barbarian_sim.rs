//! Headless barbarian simulation
//!
//! Generates a random map, seeds a civilized faction and a few encampments,
//! then lets the barbarian AI play N turns. Prints a JSON or text summary.

use std::path::PathBuf;

use barbarian_ai::command::{Command, CommandQueue};
use barbarian_ai::core::config::{load_config, BarbarianConfig};
use barbarian_ai::core::types::{CellId, FactionId, UnitKind};
use barbarian_ai::encampment::{CampCleared, ClearingResponder, EncampmentFactory, EncampmentRegistry};
use barbarian_ai::faction::{FactionCoordinator, TurnReport};
use barbarian_ai::grid::{HexGrid, HexMap};
use barbarian_ai::world::{SimWorld, UnitRoster, UnitRules};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Barbarian Simulation - runs the barbarian AI against idle settlers
#[derive(Parser, Debug)]
#[command(name = "barbarian_sim")]
#[command(about = "Run the barbarian AI for a number of turns and report what it did")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to simulate
    #[arg(long, default_value_t = 50)]
    turns: u32,

    /// Map width in hexes
    #[arg(long, default_value_t = 24)]
    width: u32,

    /// Map height in hexes
    #[arg(long, default_value_t = 16)]
    height: u32,

    /// Civilized units hunting encampments
    #[arg(long, default_value_t = 4)]
    hunters: usize,

    /// Encampments present before the first turn
    #[arg(long, default_value_t = 3)]
    camps: usize,

    /// Balance config (TOML); defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct SimSummary {
    seed: u64,
    turns: Vec<TurnReport>,
    cleared: Vec<CampCleared>,
    encampments_left: usize,
    barbarian_units: usize,
    hunter_gold: f32,
    pillaged: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("barbarian_ai=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BarbarianConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(seed, turns = args.turns, "barbarian simulation starting");

    let mut world = SimWorld::new(HexMap::generate(args.width, args.height, &mut rng));
    let hunters = world.add_faction("Hunters", false);
    let barbs = world.add_faction("Barbarians", true);
    let mut registry = EncampmentRegistry::new();
    seed_world(&mut world, &mut registry, hunters, &args, &mut rng)?;

    let responder = ClearingResponder::new(&config.bounty);
    let mut coordinator = FactionCoordinator::new(config)?;
    let mut queue = CommandQueue::new();
    let mut reports = Vec::with_capacity(args.turns as usize);
    let mut cleared = Vec::new();
    let mut pillaged = 0;

    for _ in 0..args.turns {
        world.begin_turn();
        coordinator.refresh_analysis(&world);

        let mut completed = false;
        let report = coordinator.execute_turn(
            &mut world,
            &mut registry,
            &mut queue,
            &mut rng,
            || completed = true,
        )?;
        if !completed {
            tracing::warn!(turn = report.turn, "command executor did not signal completion");
        }

        for command in queue.take_executed() {
            if matches!(command, Command::Pillage { .. }) {
                pillaged += 1;
            }
            if let Some(entered) = world.apply(&command) {
                cleared.extend(responder.on_unit_entered(entered, &mut registry, &mut world)?);
            }
        }

        for step in hunter_steps(&world, &registry, hunters) {
            if let Some(entered) = world.apply(&step) {
                cleared.extend(responder.on_unit_entered(entered, &mut registry, &mut world)?);
            }
        }

        coordinator.clear();
        reports.push(report);
    }

    let summary = SimSummary {
        seed,
        turns: reports,
        cleared,
        encampments_left: registry.len(),
        barbarian_units: world.units_of(barbs).len(),
        hunter_gold: world.gold(hunters),
        pillaged,
    };

    match args.format.as_str() {
        "text" => print_text(&summary),
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

/// Drop hunters on random land and camps on valid cells
fn seed_world(
    world: &mut SimWorld,
    registry: &mut EncampmentRegistry,
    hunters: FactionId,
    args: &Args,
    rng: &mut ChaCha8Rng,
) -> barbarian_ai::core::error::Result<()> {
    let mut cells = world.cells();
    cells.shuffle(rng);

    let mut placed_hunters = 0;
    for &cell in &cells {
        if placed_hunters == args.hunters {
            break;
        }
        let passable = world.map.tile(cell).is_some_and(|t| t.is_passable());
        if passable && world.units_at(cell).is_empty() {
            world.add_unit(UnitKind::Melee, hunters, cell);
            placed_hunters += 1;
        }
    }

    let camp_cells: Vec<CellId> = cells
        .into_iter()
        .rev()
        .filter(|cell| world.units_at(*cell).is_empty())
        .filter(|cell| registry.can_accept(&world.map, *cell))
        .take(args.camps)
        .collect();
    for cell in camp_cells {
        EncampmentFactory::create(registry, &world.map, Some(cell))?;
    }
    Ok(())
}

/// Hunters step one hex toward the nearest encampment
fn hunter_steps(
    world: &SimWorld,
    registry: &EncampmentRegistry,
    hunters: FactionId,
) -> Vec<Command> {
    let camps = registry.occupied_cells();
    let mut steps = Vec::new();
    for id in world.units_of(hunters) {
        let Some(unit) = world.unit(id) else {
            continue;
        };
        let Some(target) = camps
            .iter()
            .copied()
            .min_by_key(|c| (world.distance(unit.location, *c), *c))
        else {
            break;
        };
        let next = world
            .neighbors(unit.location)
            .into_iter()
            .filter(|n| world.can_occupy(unit, *n))
            .min_by_key(|n| (world.distance(*n, target), *n));
        if let Some(next) = next {
            if world.distance(next, target) < world.distance(unit.location, target) {
                steps.push(Command::move_to(id, next));
            }
        }
    }
    steps
}

fn print_text(summary: &SimSummary) {
    println!("Barbarian Simulation");
    println!("====================");
    println!("Seed: {}", summary.seed);
    println!("Turns: {}", summary.turns.len());
    for report in &summary.turns {
        let by_behavior: Vec<String> = report
            .commands_by_behavior
            .iter()
            .map(|(b, n)| format!("{}={}", b.name(), n))
            .collect();
        println!(
            "  turn {:>3}: units={} idle={} spawned={} placed={} commands [{}]",
            report.turn,
            report.units_considered,
            report.idle_units,
            report.spawn.spawned.len(),
            report.spawn.placed.len(),
            by_behavior.join(", ")
        );
    }
    println!();
    println!("Camps cleared: {}", summary.cleared.len());
    println!("Camps left: {}", summary.encampments_left);
    println!("Barbarian units: {}", summary.barbarian_units);
    println!("Improvements pillaged: {}", summary.pillaged);
    println!("Hunter gold: {:.1}", summary.hunter_gold);
}
