//! Guided rockets: tactical strikes, cluster rockets and their bomblets.

use tracing::debug;

use frontline_core::enums::{ExecutionKind, UnitKind};
use frontline_core::events::{DiagnosticKind, GameEvent};
use frontline_core::types::{PlayerId, Tick, TileRef, TrajectoryTile, UnitId};
use frontline_map::{ParabolaPathFinder, PathStep};

use super::blast::{apply_blast, cluster_targets, tactical_centers};
use super::Execution;
use crate::error::SimError;
use crate::game::{Game, UnitParams};
use crate::random::PseudoRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RocketPhase {
    Pending,
    InFlight,
    Detonated,
    Split,
    /// A launch precondition failed; nothing was built.
    Aborted,
}

/// Launch checks a rocket may bypass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub skip_spawn_checks: bool,
    pub skip_cost: bool,
    pub skip_cooldown: bool,
    pub skip_stats: bool,
}

pub struct RocketExecution {
    kind: UnitKind,
    owner: PlayerId,
    src: Option<TileRef>,
    dst: TileRef,
    options: LaunchOptions,
    /// Resolved launch tile, set once the rocket is built.
    origin: Option<TileRef>,
    rocket: Option<UnitId>,
    path: ParabolaPathFinder,
    random: Option<PseudoRandom>,
    phase: RocketPhase,
    active: bool,
}

impl RocketExecution {
    fn new(kind: UnitKind, owner: PlayerId, src: Option<TileRef>, dst: TileRef) -> Self {
        Self {
            kind,
            owner,
            src,
            dst,
            options: LaunchOptions::default(),
            origin: None,
            rocket: None,
            path: ParabolaPathFinder::new(),
            random: None,
            phase: RocketPhase::Pending,
            active: true,
        }
    }

    /// Single-target strike. Without `src`, launches from the owner's
    /// nearest ready missile ship.
    pub fn tactical(owner: PlayerId, dst: TileRef, src: Option<TileRef>) -> Self {
        Self::new(UnitKind::TacticalRocket, owner, src, dst)
    }

    /// Area strike that splits into bomblets over the destination.
    pub fn cluster(owner: PlayerId, dst: TileRef, src: Option<TileRef>) -> Self {
        Self::new(UnitKind::ClusterRocket, owner, src, dst)
    }

    /// Sub-munition released by a cluster split. Free, flat, no carrier;
    /// flies from `origin` to `dst`.
    pub fn bomblet(owner: PlayerId, origin: TileRef, dst: TileRef) -> Self {
        Self::new(UnitKind::ClusterBomblet, owner, Some(origin), dst).with_options(LaunchOptions {
            skip_spawn_checks: true,
            skip_cost: true,
            skip_cooldown: true,
            skip_stats: true,
        })
    }

    pub fn with_options(mut self, options: LaunchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn phase(&self) -> RocketPhase {
        self.phase
    }

    pub fn rocket(&self) -> Option<UnitId> {
        self.rocket
    }

    pub fn destination(&self) -> TileRef {
        self.dst
    }

    pub fn origin(&self) -> Option<TileRef> {
        self.origin
    }

    fn speed(&self, game: &Game) -> u32 {
        match self.kind {
            UnitKind::ClusterBomblet => game.config().rocket.bomblet_speed,
            _ => game.config().rocket.speed,
        }
    }

    fn abort(&mut self, game: &mut Game, kind: DiagnosticKind) {
        game.diagnostic(kind);
        self.phase = RocketPhase::Aborted;
        self.active = false;
    }

    fn not_launched(&self) -> SimError {
        SimError::RocketNotLaunched {
            kind: self.kind,
            player: self.owner,
            target: self.dst,
        }
    }

    fn launch(&mut self, game: &mut Game, tick: Tick) {
        let (player, kind, dst) = (self.owner, self.kind, self.dst);

        let Some(spawn) = self.src.or_else(|| game.can_build(player, kind, dst)) else {
            self.abort(
                game,
                DiagnosticKind::NoSpawnTile {
                    player,
                    kind,
                    target: dst,
                },
            );
            return;
        };

        let carrier = if self.options.skip_spawn_checks {
            None
        } else {
            let found = game
                .units()
                .find(|u| {
                    u.owner() == player && u.kind() == UnitKind::MissileShip && u.tile() == spawn
                })
                .map(|u| (u.id(), u.is_in_cooldown()));
            match found {
                None => {
                    self.abort(game, DiagnosticKind::CarrierUnavailable { player, spawn });
                    return;
                }
                Some((carrier, true)) => {
                    self.abort(game, DiagnosticKind::CarrierCoolingDown { player, carrier });
                    return;
                }
                Some((carrier, false)) => Some(carrier),
            }
        };

        let speed = self.speed(game);
        let ballistic = kind != UnitKind::ClusterBomblet;
        self.path
            .compute_control_points(game.map(), spawn, dst, speed, ballistic);

        let range = game.config().rocket.targetable_range as u64;
        let map = game.map();
        let trajectory: Vec<TrajectoryTile> = self
            .path
            .all_tiles()
            .iter()
            .map(|&tile| TrajectoryTile {
                tile,
                targetable: map.euclidean_dist_squared(tile, dst) <= range * range
                    || map.euclidean_dist_squared(tile, spawn) <= range * range,
            })
            .collect();

        let params = UnitParams {
            skip_cost: self.options.skip_cost,
            target_tile: Some(dst),
            trajectory,
            ..Default::default()
        };
        let rocket = match game.build_unit(player, kind, spawn, params) {
            Ok(id) => id,
            Err(e) => {
                self.abort(
                    game,
                    DiagnosticKind::BuildRejected {
                        player,
                        kind,
                        reason: e.to_string(),
                    },
                );
                return;
            }
        };

        if !self.options.skip_cooldown {
            if let Some(ship) = carrier.and_then(|c| game.unit_mut(c)) {
                ship.launch(tick);
            }
        }
        if !self.options.skip_stats {
            game.stats_mut().bomb_launch(player, kind);
        }

        debug!(tick, rocket = %rocket, ?kind, player = %player, from = %spawn, to = %dst, "rocket launched");
        game.emit(GameEvent::RocketLaunched {
            rocket,
            kind,
            player,
            target: dst,
        });
        self.rocket = Some(rocket);
        self.origin = Some(spawn);
        self.phase = RocketPhase::InFlight;
    }

    fn fly(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        let rocket = self.rocket.ok_or_else(|| self.not_launched())?;
        if !game.is_unit_active(rocket) {
            // shot down
            self.active = false;
            return Ok(());
        }

        let speed = self.speed(game);
        match self.path.next_tile(speed) {
            PathStep::Next(tile) => {
                let index = self.path.current_index();
                if let Some(unit) = game.unit_mut(rocket) {
                    unit.move_to(tile);
                    unit.set_trajectory_index(index);
                    let targetable = unit.trajectory().get(index).is_some_and(|p| p.targetable);
                    unit.set_targetable(targetable);
                }
                Ok(())
            }
            PathStep::Complete => {
                if let Some(unit) = game.unit_mut(rocket) {
                    unit.set_reached_target(true);
                }
                self.detonate(game, tick)
            }
        }
    }

    /// Resolve the rocket at its destination. Cluster rockets split instead
    /// of blasting.
    pub fn detonate(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        if self.kind == UnitKind::ClusterRocket {
            return self.split(game, tick);
        }
        let rocket = self.rocket.ok_or_else(|| self.not_launched())?;
        let (player, kind, dst) = (self.owner, self.kind, self.dst);

        let config = &game.config().rocket;
        let radius = match kind {
            UnitKind::TacticalRocket => config.tactical_blast_radius,
            _ => config.bomblet_blast_radius,
        };
        let random = self.random.get_or_insert_with(|| game.fork_random());
        let centers = match kind {
            UnitKind::TacticalRocket => tactical_centers(game, random, dst),
            _ => vec![dst],
        };

        if let Some(unit) = game.unit_mut(rocket) {
            unit.set_payload_tiles(centers.clone());
        }
        game.delete_unit(rocket, None);
        apply_blast(game, &centers, radius, player, tick);
        if !self.options.skip_stats {
            game.stats_mut().bomb_land(player, kind);
        }

        debug!(tick, rocket = %rocket, ?kind, bursts = centers.len(), "rocket detonated");
        game.emit(GameEvent::RocketDetonated {
            rocket,
            kind,
            player,
            centers,
        });
        self.phase = RocketPhase::Detonated;
        self.active = false;
        Ok(())
    }

    /// Replace a cluster rocket with its bomblets, each launched from the
    /// cluster's own launch tile.
    pub fn split(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        let (Some(rocket), Some(origin)) = (self.rocket, self.origin) else {
            return Err(self.not_launched());
        };
        let (player, dst) = (self.owner, self.dst);

        let random = self.random.get_or_insert_with(|| game.fork_random());
        let targets = cluster_targets(game, random, dst);
        for &target in &targets {
            game.add_execution(Box::new(RocketExecution::bomblet(player, origin, target)));
        }

        if let Some(unit) = game.unit_mut(rocket) {
            unit.set_payload_tiles(targets.clone());
        }
        game.delete_unit(rocket, None);
        if !self.options.skip_stats {
            game.stats_mut().bomb_land(player, self.kind);
        }

        let bomblets = targets.len() as u32;
        debug!(tick, rocket = %rocket, bomblets, "cluster split");
        game.emit(GameEvent::ClusterSplit {
            rocket,
            player,
            bomblets,
        });
        self.phase = RocketPhase::Split;
        self.active = false;
        Ok(())
    }
}

impl Execution for RocketExecution {
    fn init(&mut self, game: &mut Game, _tick: Tick) -> Result<(), SimError> {
        self.random = Some(game.fork_random());
        Ok(())
    }

    fn tick(&mut self, game: &mut Game, tick: Tick) -> Result<(), SimError> {
        match self.phase {
            RocketPhase::Pending => {
                self.launch(game, tick);
                Ok(())
            }
            RocketPhase::InFlight => self.fly(game, tick),
            RocketPhase::Detonated | RocketPhase::Split | RocketPhase::Aborted => {
                self.active = false;
                Ok(())
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn owner(&self) -> PlayerId {
        self.owner
    }

    fn kind(&self) -> ExecutionKind {
        ExecutionKind::Rocket
    }
}
