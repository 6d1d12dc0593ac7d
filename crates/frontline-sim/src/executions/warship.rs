//! Warship and missile-ship behavior: healing, piracy, volleys, patrol.

use tracing::debug;

use frontline_core::constants::{PATROL_ATTEMPTS_BEFORE_EXPAND, WATER_SEARCH_LIMIT};
use frontline_core::enums::{ExecutionKind, UnitKind};
use frontline_core::events::{DiagnosticKind, GameEvent};
use frontline_core::types::{PlayerId, Tick, TileRef, UnitId};
use frontline_map::{water_step, WaterStep};

use super::{Execution, ShellExecution};
use crate::error::SimError;
use crate::game::{Game, UnitParams};
use crate::random::PseudoRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarshipState {
    Patrolling,
    Engaging,
    /// Missile ship reloading after a rocket launch.
    OnCooldown,
}

enum Source {
    Build { kind: UnitKind, patrol_tile: TileRef },
    Existing(UnitId),
}

pub struct WarshipExecution {
    owner: PlayerId,
    source: Source,
    unit: Option<UnitId>,
    random: Option<PseudoRandom>,
    last_volley: Option<Tick>,
    /// Trade ship with no water route; skipped when choosing targets.
    unreachable: Option<UnitId>,
    reported_no_patrol: bool,
    state: WarshipState,
    active: bool,
}

impl WarshipExecution {
    /// Build a new ship of `kind` at the owner's nearest port and patrol
    /// around `patrol_tile`.
    pub fn new(owner: PlayerId, kind: UnitKind, patrol_tile: TileRef) -> Self {
        Self::with_source(owner, Source::Build { kind, patrol_tile })
    }

    /// Drive a ship that already exists.
    pub fn for_unit(owner: PlayerId, unit: UnitId) -> Self {
        Self::with_source(owner, Source::Existing(unit))
    }

    fn with_source(owner: PlayerId, source: Source) -> Self {
        Self {
            owner,
            source,
            unit: None,
            random: None,
            last_volley: None,
            unreachable: None,
            reported_no_patrol: false,
            state: WarshipState::Patrolling,
            active: true,
        }
    }

    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    pub fn state(&self) -> WarshipState {
        self.state
    }

    fn build(&mut self, game: &mut Game, kind: UnitKind, patrol_tile: TileRef) -> Option<UnitId> {
        let player = self.owner;
        let Some(spawn) = game.can_build(player, kind, patrol_tile) else {
            game.diagnostic(DiagnosticKind::NoSpawnTile {
                player,
                kind,
                target: patrol_tile,
            });
            return None;
        };
        let params = UnitParams {
            patrol_tile: Some(patrol_tile),
            ..Default::default()
        };
        match game.build_unit(player, kind, spawn, params) {
            Ok(id) => Some(id),
            Err(e) => {
                game.diagnostic(DiagnosticKind::BuildRejected {
                    player,
                    kind,
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    fn adopt(&mut self, game: &mut Game, unit: UnitId) -> Option<UnitId> {
        let player = self.owner;
        let Some(ship) = game.unit(unit) else {
            game.diagnostic(DiagnosticKind::UnitNotFound { player, unit });
            return None;
        };
        if !ship.is_active() {
            game.diagnostic(DiagnosticKind::UnitInactive { player, unit });
            return None;
        }
        if ship.owner() != player {
            game.diagnostic(DiagnosticKind::NotOwner { player, unit });
            return None;
        }
        let kind = ship.kind();
        if !matches!(kind, UnitKind::Warship | UnitKind::MissileShip) {
            game.diagnostic(DiagnosticKind::NotAWarship { player, unit, kind });
            return None;
        }

        let tile = ship.tile();
        if let Some(ship) = game.unit_mut(unit) {
            if ship.patrol_tile().is_none() {
                ship.set_patrol_tile(Some(tile));
            }
        }
        Some(unit)
    }

    /// Best hostile in range: transports, then warships, then missile
    /// ships, then trade ships; nearest first within each class.
    fn find_target(&self, game: &Game, kind: UnitKind, tile: TileRef) -> Option<UnitId> {
        let config = game.config();
        let can_shell = kind == UnitKind::Warship || config.missile_ship.shelling_enabled;
        let can_pirate = kind == UnitKind::Warship && game.has_active_port(self.owner);

        let ships: Vec<UnitKind> = UnitKind::ALL.into_iter().filter(|k| k.is_naval()).collect();
        game
            .nearby_units(tile, config.warship.targeting_range, &ships)
            .into_iter()
            .filter_map(|(id, d2)| {
                let unit = game.unit(id)?;
                if unit.owner() == self.owner || Some(id) == self.unreachable {
                    return None;
                }
                if unit.kind().is_combat_target() && !can_shell {
                    return None;
                }
                let priority = match unit.kind() {
                    UnitKind::TransportShip => 0,
                    UnitKind::Warship => 1,
                    UnitKind::MissileShip => 2,
                    UnitKind::TradeShip if can_pirate && !unit.is_safe_from_pirates() => 3,
                    _ => return None,
                };
                Some((priority, d2, id))
            })
            .min()
            .map(|(_, _, id)| id)
    }

    fn hunt(&mut self, game: &mut Game, ship: UnitId, target: UnitId) {
        let steps = game.config().warship.hunt_steps_per_tick;
        for step in 0..=steps {
            let (Some(at), Some(goal)) = (
                game.unit(ship).map(|u| u.tile()),
                game.unit(target).map(|u| u.tile()),
            ) else {
                return;
            };
            if game.map().euclidean_dist_squared(at, goal) <= 2 {
                debug!(ship = %ship, target = %target, "trade ship intercepted");
                game.capture_unit(target, self.owner);
                return;
            }
            if step == steps {
                return;
            }
            match water_step(game.map(), at, goal, WATER_SEARCH_LIMIT) {
                WaterStep::Next(next) => {
                    if let Some(unit) = game.unit_mut(ship) {
                        unit.move_to(next);
                    }
                }
                WaterStep::Arrived => {}
                WaterStep::NoPath => {
                    self.unreachable = Some(target);
                    game.diagnostic(DiagnosticKind::PathNotFound {
                        unit: ship,
                        goal,
                    });
                    return;
                }
            }
        }
    }

    fn fire(&mut self, game: &mut Game, ship: UnitId, kind: UnitKind, target: UnitId, tick: Tick) {
        let config = game.config();
        let rate = config.warship.shell_attack_rate;
        if self.last_volley.is_some_and(|last| tick.saturating_sub(last) < rate) {
            return;
        }
        let shells = match kind {
            UnitKind::MissileShip => config.missile_ship.volley_size,
            _ => config.warship.volley_size,
        };
        let Some(from) = game.unit(ship).map(|u| u.tile()) else {
            return;
        };

        for _ in 0..shells {
            game.add_execution(Box::new(ShellExecution::new(self.owner, from, ship, target)));
        }
        self.last_volley = Some(tick);
        debug!(tick, ship = %ship, target = %target, shells, "volley fired");
        game.emit(GameEvent::VolleyFired {
            unit: ship,
            target,
            shells,
        });
    }

    fn patrol(&mut self, game: &mut Game, ship: UnitId) {
        let Some(unit) = game.unit(ship) else {
            return;
        };
        let at = unit.tile();
        let center = unit.patrol_tile().unwrap_or(at);

        let goal = match unit.target_tile() {
            Some(goal) if goal != at => goal,
            _ => match self.pick_patrol_tile(game, center) {
                Some(goal) => goal,
                None => {
                    if !self.reported_no_patrol {
                        self.reported_no_patrol = true;
                        game.diagnostic(DiagnosticKind::NoPatrolTile { unit: ship });
                    }
                    return;
                }
            },
        };

        let step = water_step(game.map(), at, goal, WATER_SEARCH_LIMIT);
        if let Some(unit) = game.unit_mut(ship) {
            match step {
                WaterStep::Next(next) => {
                    unit.move_to(next);
                    unit.set_target_tile(Some(goal));
                }
                WaterStep::Arrived | WaterStep::NoPath => unit.set_target_tile(None),
            }
        }
    }

    /// Random ocean tile around `center`, widening the search once if the
    /// configured range turns up nothing.
    fn pick_patrol_tile(&mut self, game: &Game, center: TileRef) -> Option<TileRef> {
        let random = self.random.as_mut()?;
        let map = game.map();
        let (cx, cy) = (map.x(center) as i64, map.y(center) as i64);
        let mut range = game.config().warship.patrol_range.max(1) as i64;

        for attempt in 0..PATROL_ATTEMPTS_BEFORE_EXPAND * 2 {
            if attempt == PATROL_ATTEMPTS_BEFORE_EXPAND {
                range *= 2;
            }
            let x = cx + random.next_int(-range, range + 1);
            let y = cy + random.next_int(-range, range + 1);
            let Some(tile) = map.tile_ref(x as i32, y as i32) else {
                continue;
            };
            if map.is_ocean(tile) {
                return Some(tile);
            }
        }
        None
    }
}

impl Execution for WarshipExecution {
    fn init(&mut self, game: &mut Game, _tick: Tick) -> Result<(), SimError> {
        let unit = match self.source {
            Source::Build { kind, patrol_tile } => self.build(game, kind, patrol_tile),
            Source::Existing(id) => self.adopt(game, id),
        };
        match unit {
            Some(id) => {
                self.unit = Some(id);
                self.random = Some(game.fork_random());
            }
            None => self.active = false,
        }
        Ok(())
    }

    fn tick(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        let Some(ship) = self.unit else {
            self.active = false;
            return Ok(());
        };
        let (kind, tile) = match game.unit(ship) {
            Some(u) if u.is_active() && u.owner() == self.owner => (u.kind(), u.tile()),
            _ => {
                self.active = false;
                return Ok(());
            }
        };

        if game.has_active_port(self.owner) {
            let heal = game.config().warship.heal_per_tick;
            game.modify_health(ship, heal as i64, None);
        }

        let reloading = kind == UnitKind::MissileShip
            && game.unit(ship).is_some_and(|u| u.is_in_cooldown());
        if reloading {
            self.state = WarshipState::OnCooldown;
            if let Some(unit) = game.unit_mut(ship) {
                unit.set_target_unit(None);
            }
            self.patrol(game, ship);
            return Ok(());
        }

        let target = self.find_target(game, kind, tile);
        if let Some(unit) = game.unit_mut(ship) {
            unit.set_target_unit(target);
        }

        match target {
            Some(target) => {
                self.state = WarshipState::Engaging;
                let is_trade = game
                    .unit(target)
                    .is_some_and(|u| u.kind() == UnitKind::TradeShip);
                if is_trade {
                    self.hunt(game, ship, target);
                } else {
                    self.fire(game, ship, kind, target, tick);
                }
            }
            None => {
                self.state = WarshipState::Patrolling;
                self.patrol(game, ship);
            }
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
        ExecutionKind::Warship
    }
}
