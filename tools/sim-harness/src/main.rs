//! FRONTLINE headless harness.
//!
//! Runs a seeded naval and rocket skirmish for a number of ticks and prints
//! a fingerprint of the final snapshot. Two runs with the same arguments
//! must print the same fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::error::Error;
use std::hash::{Hash, Hasher};

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use frontline_core::config::GameConfig;
use frontline_core::enums::{Terrain, UnitKind};
use frontline_core::types::PlayerId;
use frontline_map::GameMap;
use frontline_sim::executions::{RocketExecution, WarshipExecution};
use frontline_sim::{SimConfig, Simulation, UnitParams};

#[derive(Parser, Debug)]
#[command(name = "sim-harness")]
#[command(about = "Run a deterministic FRONTLINE skirmish", long_about = None)]
struct Args {
    /// Master seed for determinism
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(short, long, default_value = "300")]
    ticks: u64,

    /// JSON file deep-merged over the default game config
    #[arg(short, long)]
    config: Option<String>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

const MAP_WIDTH: u32 = 160;
const MAP_HEIGHT: u32 = 80;
const COAST_X: u32 = 40;

/// Open sea on the west, one continent on the east.
fn skirmish_map() -> Result<GameMap, Box<dyn Error>> {
    let terrain = (0..MAP_WIDTH * MAP_HEIGHT)
        .map(|i| {
            if i % MAP_WIDTH < COAST_X {
                Terrain::Ocean
            } else {
                Terrain::Land
            }
        })
        .collect();
    Ok(GameMap::new(MAP_WIDTH, MAP_HEIGHT, terrain)?)
}

fn setup(sim: &mut Simulation) -> Result<(PlayerId, PlayerId), Box<dyn Error>> {
    let game = sim.game_mut();
    let red = game.add_player("red", 20_000_000, 50_000);
    let blue = game.add_player("blue", 20_000_000, 50_000);

    let map = game.map().clone();
    let at = |x: i32, y: i32| map.tile_ref(x, y).ok_or("tile off map");

    for tile in map.tiles().filter(|&t| map.x(t) >= COAST_X) {
        game.conquer(blue, tile);
    }

    let free = || UnitParams {
        skip_cost: true,
        ..Default::default()
    };
    game.conquer(red, at(40, 10)?);
    game.build_unit(red, UnitKind::Port, at(40, 10)?, free())?;
    game.build_unit(blue, UnitKind::Port, at(40, 60)?, free())?;
    game.build_unit(blue, UnitKind::City, at(100, 40)?, free())?;
    let carrier = game.build_unit(red, UnitKind::MissileShip, at(10, 40)?, free())?;
    let warship = game.build_unit(red, UnitKind::Warship, at(20, 20)?, free())?;
    let escort = game.build_unit(blue, UnitKind::Warship, at(30, 60)?, free())?;
    game.build_unit(blue, UnitKind::TradeShip, at(25, 30)?, free())?;

    sim.add_execution(Box::new(WarshipExecution::for_unit(red, warship)));
    sim.add_execution(Box::new(WarshipExecution::for_unit(red, carrier)));
    sim.add_execution(Box::new(WarshipExecution::for_unit(blue, escort)));
    sim.add_execution(Box::new(WarshipExecution::new(
        blue,
        UnitKind::Warship,
        at(20, 70)?,
    )));
    sim.add_execution(Box::new(RocketExecution::tactical(red, at(100, 40)?, None)));
    sim.add_execution(Box::new(RocketExecution::cluster(red, at(120, 20)?, None)));

    Ok((red, blue))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let game = match &args.config {
        Some(path) => GameConfig::with_overrides(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    info!(seed = args.seed, ticks = args.ticks, "starting skirmish");
    let mut sim = Simulation::new(
        skirmish_map()?,
        SimConfig {
            seed: args.seed,
            game,
        },
    );
    let (red, blue) = setup(&mut sim)?;

    let mut events = 0usize;
    for _ in 0..args.ticks {
        sim.step()?;
        for record in sim.game_mut().drain_events() {
            events += 1;
            debug!(tick = record.tick, event = ?record.event, "event");
        }
        for diagnostic in sim.game_mut().drain_diagnostics() {
            debug!(tick = diagnostic.tick, kind = ?diagnostic.kind, "diagnostic");
        }
    }

    let snapshot = sim.snapshot();
    let json = serde_json::to_string(&snapshot)?;
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);

    for id in [red, blue] {
        if let Some(player) = sim.game().player(id) {
            info!(
                player = player.name(),
                gold = player.gold(),
                troops = player.troops(),
                units = player.units().len(),
                captures = sim.game().stats().captures(id),
                "final standing"
            );
        }
    }
    if events == 0 {
        warn!("no events recorded; check the tick count");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    println!(
        "tick={} events={} fingerprint={:016x}",
        snapshot.tick,
        events,
        hasher.finish()
    );
    Ok(())
}
