//! A single warship shell in flight.

use tracing::trace;

use frontline_core::enums::{ExecutionKind, UnitKind};
use frontline_core::types::{PlayerId, Tick, TileRef, UnitId};
use frontline_map::straight_step;

use super::Execution;
use crate::error::SimError;
use crate::game::{Game, UnitParams};
use crate::random::PseudoRandom;

/// Flies from the firing ship toward a target unit and damages it on
/// arrival. Expires harmlessly if the target is lost.
pub struct ShellExecution {
    owner: PlayerId,
    spawn: TileRef,
    source: UnitId,
    target: UnitId,
    shell: Option<UnitId>,
    random: Option<PseudoRandom>,
    fired_at: Tick,
    active: bool,
}

impl ShellExecution {
    pub fn new(owner: PlayerId, spawn: TileRef, source: UnitId, target: UnitId) -> Self {
        Self {
            owner,
            spawn,
            source,
            target,
            shell: None,
            random: None,
            fired_at: 0,
            active: true,
        }
    }

    /// Damage for one hit: base damage scaled by a 1-5 roll to 80%-120%.
    fn damage_roll(&mut self, base: u32) -> i64 {
        let roll = self.random.as_mut().map_or(3, |r| r.next_int(1, 6));
        base as i64 * (175 + 25 * roll) / 250
    }

    fn expire(&mut self, game: &mut Game) {
        if let Some(shell) = self.shell {
            game.delete_unit(shell, None);
        }
        self.active = false;
    }
}

impl Execution for ShellExecution {
    fn init(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        let params = UnitParams {
            skip_cost: true,
            target_unit: Some(self.target),
            ..Default::default()
        };
        match game.build_unit(self.owner, UnitKind::Shell, self.spawn, params) {
            Ok(id) => self.shell = Some(id),
            Err(_) => {
                self.active = false;
                return Ok(());
            }
        }
        self.random = Some(game.fork_random());
        self.fired_at = tick;
        Ok(())
    }

    fn tick(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        let Some(shell) = self.shell else {
            self.active = false;
            return Ok(());
        };
        if !game.is_unit_active(shell) {
            self.active = false;
            return Ok(());
        }

        let config = game.config().shell.clone();
        let range = game.config().warship.targeting_range as u64;
        let target = match game.unit(self.target) {
            Some(t) if t.is_active() && t.owner() != self.owner => t.tile(),
            _ => {
                self.expire(game);
                return Ok(());
            }
        };
        let mut at = game.unit(shell).map_or(self.spawn, |s| s.tile());

        if !game.is_unit_active(self.source)
            || tick.saturating_sub(self.fired_at) > config.lifetime_ticks
            || game.map().euclidean_dist_squared(at, target) > range * range
        {
            trace!(shell = %shell, "shell expired");
            self.expire(game);
            return Ok(());
        }

        for _ in 0..config.steps_per_tick {
            match straight_step(game.map(), at, target) {
                Some(next) => at = next,
                None => break,
            }
        }
        if let Some(unit) = game.unit_mut(shell) {
            unit.move_to(at);
        }

        if at == target {
            let damage = self.damage_roll(config.base_damage);
            trace!(shell = %shell, target = %self.target, damage, "shell hit");
            game.modify_health(self.target, -damage, Some(self.owner));
            self.expire(game);
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn owner(&self) -> PlayerId {
        self.owner
    }

    fn kind(&self) -> ExecutionKind {
        ExecutionKind::Shell
    }
}
