//! Simulation error types.

use thiserror::Error;

use frontline_core::enums::UnitKind;
use frontline_core::types::{PlayerId, TileRef};

/// Broken invariants. These abort the current step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("{kind:?} for {player} toward {target} detonated before it was launched")]
    RocketNotLaunched {
        kind: UnitKind,
        player: PlayerId,
        target: TileRef,
    },
}

/// Why a build request was refused. Callers turn these into diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),

    #[error("{kind:?} costs {cost} but only {gold} gold is available")]
    InsufficientGold { kind: UnitKind, cost: u64, gold: u64 },

    #[error("tile {tile} is not on the map")]
    OffMap { tile: TileRef },
}
