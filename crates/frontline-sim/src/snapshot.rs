//! Snapshot building: reads the world model into serialisable views.

use frontline_core::state::{PlayerView, UnitView, WorldSnapshot};

use crate::game::Game;
use crate::unit::Unit;

impl Game {
    /// Observable state at the current tick.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.ticks(),
            in_spawn_phase: self.in_spawn_phase(),
            players: self
                .players()
                .iter()
                .map(|p| PlayerView {
                    id: p.id(),
                    name: p.name().to_string(),
                    gold: p.gold(),
                    troops: p.troops(),
                    tiles_owned: self.tiles_owned(p.id()),
                    units: p.units().to_vec(),
                })
                .collect(),
            units: self.all_units().iter().map(unit_view).collect(),
            ownership: self.ownership().to_vec(),
        }
    }
}

fn unit_view(unit: &Unit) -> UnitView {
    UnitView {
        id: unit.id(),
        kind: unit.kind(),
        owner: unit.owner(),
        tile: unit.tile(),
        health: unit.health(),
        max_health: unit.max_health(),
        active: unit.is_active(),
        targetable: unit.is_targetable(),
        reached_target: unit.reached_target(),
        in_cooldown: unit.is_in_cooldown(),
        trajectory_index: unit.trajectory_index(),
        trajectory: unit.trajectory().to_vec(),
        payload_tiles: unit.payload_tiles().to_vec(),
    }
}
