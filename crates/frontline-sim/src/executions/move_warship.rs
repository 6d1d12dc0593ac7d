//! Patrol relocation order for a warship.

use tracing::debug;

use frontline_core::enums::{ExecutionKind, UnitKind};
use frontline_core::events::DiagnosticKind;
use frontline_core::types::{PlayerId, Tick, TileRef, UnitId};

use super::Execution;
use crate::error::SimError;
use crate::game::Game;

/// Moves a warship's patrol tile. Applies in `init` and is then done.
pub struct MoveWarshipExecution {
    owner: PlayerId,
    unit: UnitId,
    patrol_tile: TileRef,
    active: bool,
}

impl MoveWarshipExecution {
    pub fn new(owner: PlayerId, unit: UnitId, patrol_tile: TileRef) -> Self {
        Self {
            owner,
            unit,
            patrol_tile,
            active: true,
        }
    }
}

impl Execution for MoveWarshipExecution {
    fn init(&mut self, game: &mut Game, _tick: Tick) -> Result<(), SimError> {
        self.active = false;

        let player = self.owner;
        let unit = self.unit;
        let Some(ship) = game.unit(unit) else {
            game.diagnostic(DiagnosticKind::UnitNotFound { player, unit });
            return Ok(());
        };
        if !ship.is_active() {
            game.diagnostic(DiagnosticKind::UnitInactive { player, unit });
            return Ok(());
        }
        if ship.owner() != player {
            game.diagnostic(DiagnosticKind::NotOwner { player, unit });
            return Ok(());
        }
        let kind = ship.kind();
        if !matches!(kind, UnitKind::Warship | UnitKind::MissileShip) {
            game.diagnostic(DiagnosticKind::NotAWarship { player, unit, kind });
            return Ok(());
        }

        if let Some(ship) = game.unit_mut(unit) {
            ship.set_patrol_tile(Some(self.patrol_tile));
            ship.set_target_tile(None);
        }
        debug!(unit = %unit, patrol = %self.patrol_tile, "patrol tile moved");
        Ok(())
    }

    fn tick(&mut self, _game: &mut Game, _tick: Tick) -> Result<(), SimError> {
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn owner(&self) -> PlayerId {
        self.owner
    }

    fn kind(&self) -> ExecutionKind {
        ExecutionKind::MoveWarship
    }
}
