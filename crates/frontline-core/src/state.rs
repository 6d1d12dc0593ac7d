//! World snapshot: the observable state read by UI layers and replay checks.

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::types::{PlayerId, Tick, TileRef, TrajectoryTile, UnitId};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub in_spawn_phase: bool,
    pub players: Vec<PlayerView>,
    pub units: Vec<UnitView>,
    /// Owner of every tile in index order (`None` = unowned).
    pub ownership: Vec<Option<PlayerId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub gold: u64,
    pub troops: u64,
    pub tiles_owned: u32,
    pub units: Vec<UnitId>,
}

/// Everything a renderer needs to draw one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub owner: PlayerId,
    pub tile: TileRef,
    pub health: u32,
    pub max_health: u32,
    pub active: bool,
    pub targetable: bool,
    pub reached_target: bool,
    pub in_cooldown: bool,
    pub trajectory_index: usize,
    pub trajectory: Vec<TrajectoryTile>,
    /// Blast markers for cluster rockets.
    pub payload_tiles: Vec<TileRef>,
}
