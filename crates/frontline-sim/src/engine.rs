//! Execution scheduler.
//!
//! `Simulation` owns the `Game` and every live execution. Each `step`
//! ticks the active executions in insertion order, then initialises the
//! ones queued during the step so they run from the next step on.

use tracing::trace;

use frontline_core::config::GameConfig;
use frontline_core::enums::ExecutionKind;
use frontline_core::state::WorldSnapshot;
use frontline_map::GameMap;

use crate::error::SimError;
use crate::executions::Execution;
use crate::game::Game;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

pub struct Simulation {
    game: Game,
    active: Vec<Box<dyn Execution>>,
    /// Queued but not yet initialised (held back by the spawn phase).
    waiting: Vec<Box<dyn Execution>>,
}

impl Simulation {
    pub fn new(map: GameMap, config: SimConfig) -> Self {
        Self {
            game: Game::new(map, config.game, config.seed),
            active: Vec::new(),
            waiting: Vec::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Queue an execution; it joins the active set at the end of the
    /// next step.
    pub fn add_execution(&mut self, execution: Box<dyn Execution>) {
        self.game.add_execution(execution);
    }

    /// Kinds of the initialised, still-active executions in run order.
    pub fn active_kinds(&self) -> Vec<ExecutionKind> {
        self.active.iter().map(|e| e.kind()).collect()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Advance the world by one tick.
    ///
    /// An `Err` means an invariant broke mid-step; the world is left as it
    /// was when the failing execution returned.
    pub fn step(&mut self) -> Result<(), SimError> {
        let tick = self.game.ticks();
        let spawn_phase = self.game.in_spawn_phase();
        self.game.expire_cooldowns();

        for execution in self.active.iter_mut() {
            if !execution.is_active() {
                continue;
            }
            if spawn_phase && !execution.active_during_spawn_phase() {
                continue;
            }
            execution.tick(&mut self.game, tick)?;
        }
        self.active.retain(|e| e.is_active());

        self.waiting.extend(self.game.take_pending());
        let mut held = Vec::new();
        for mut execution in std::mem::take(&mut self.waiting) {
            if spawn_phase && !execution.active_during_spawn_phase() {
                held.push(execution);
                continue;
            }
            execution.init(&mut self.game, tick)?;
            if execution.is_active() {
                self.active.push(execution);
            }
        }
        self.waiting = held;

        trace!(tick, active = self.active.len(), waiting = self.waiting.len(), "step");
        self.game.end_tick();
        Ok(())
    }

    /// Run `n` steps, stopping at the first error.
    pub fn run(&mut self, n: u64) -> Result<(), SimError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.game.snapshot()
    }
}
