//! Events and diagnostics emitted by the simulation.
//!
//! Events describe things that happened (captures, launches, blasts).
//! Diagnostics describe requested things that did not happen because a
//! precondition was unmet; they are ordinary outcomes, not errors.

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::types::{PlayerId, Tick, TileRef, UnitId};

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Ownership of a unit moved to another player.
    UnitCaptured {
        unit: UnitId,
        from: PlayerId,
        to: PlayerId,
    },
    /// A unit was removed from play.
    UnitDestroyed {
        unit: UnitId,
        kind: UnitKind,
        owner: PlayerId,
        by: Option<PlayerId>,
    },
    /// A warship fired a volley.
    VolleyFired {
        unit: UnitId,
        target: UnitId,
        shells: u32,
    },
    RocketLaunched {
        rocket: UnitId,
        kind: UnitKind,
        player: PlayerId,
        target: TileRef,
    },
    RocketDetonated {
        rocket: UnitId,
        kind: UnitKind,
        player: PlayerId,
        centers: Vec<TileRef>,
    },
    ClusterSplit {
        rocket: UnitId,
        player: PlayerId,
        bomblets: u32,
    },
}

/// A `GameEvent` stamped with the tick it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tick: Tick,
    pub event: GameEvent,
}

/// Why a requested behavior silently did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiagnosticKind {
    /// No tile could be found to spawn the unit from.
    NoSpawnTile {
        player: PlayerId,
        kind: UnitKind,
        target: TileRef,
    },
    /// No ready missile ship sits on the launch tile.
    CarrierUnavailable { player: PlayerId, spawn: TileRef },
    /// The missile ship on the launch tile is still reloading.
    CarrierCoolingDown { player: PlayerId, carrier: UnitId },
    /// The build itself was refused (funds, terrain, ownership).
    BuildRejected {
        player: PlayerId,
        kind: UnitKind,
        reason: String,
    },
    UnitNotFound { player: PlayerId, unit: UnitId },
    UnitInactive { player: PlayerId, unit: UnitId },
    NotOwner { player: PlayerId, unit: UnitId },
    /// A naval order named a unit that is not a warship or missile ship.
    NotAWarship {
        player: PlayerId,
        unit: UnitId,
        kind: UnitKind,
    },
    /// A warship could not find any ocean tile to patrol to.
    NoPatrolTile { unit: UnitId },
    /// No water route exists between a ship and its goal.
    PathNotFound { unit: UnitId, goal: TileRef },
}

/// A `DiagnosticKind` stamped with the tick it was raised on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub tick: Tick,
    pub kind: DiagnosticKind,
}
