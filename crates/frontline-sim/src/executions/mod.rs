//! Executions: units of ongoing behavior driven by the scheduler.
//!
//! Each variant is constructed with its parameters, initialised once, then
//! ticked every step until it reports inactive.

pub mod blast;
pub mod move_warship;
pub mod rocket;
pub mod shell;
pub mod warship;

pub use move_warship::MoveWarshipExecution;
pub use rocket::RocketExecution;
pub use shell::ShellExecution;
pub use warship::{WarshipExecution, WarshipState};

use frontline_core::enums::ExecutionKind;
use frontline_core::types::{PlayerId, Tick};

use crate::error::SimError;
use crate::game::Game;

pub trait Execution {
    /// Called exactly once before the first `tick`.
    fn init(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError>;

    fn tick(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError>;

    /// Once false, stays false; the scheduler drops the execution.
    fn is_active(&self) -> bool;

    fn owner(&self) -> PlayerId;

    /// Whether this execution may run before the spawn phase ends.
    fn active_during_spawn_phase(&self) -> bool {
        false
    }

    fn kind(&self) -> ExecutionKind;
}
