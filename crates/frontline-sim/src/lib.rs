//! FRONTLINE simulation core.
//!
//! `Simulation` owns the `Game` world model and the active executions, and
//! advances both one tick per `step`. Completely headless and
//! deterministic: the same seed, map and execution sequence always produce
//! the same snapshots.

pub mod engine;
pub mod error;
pub mod executions;
pub mod game;
pub mod player;
pub mod random;
pub mod stats;
pub mod unit;

mod snapshot;


pub use engine::{SimConfig, Simulation};
pub use error::{BuildError, SimError};
pub use executions::Execution;
pub use game::{Game, UnitParams};
pub use random::PseudoRandom;
