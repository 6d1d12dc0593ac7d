//! The world model: map, tile ownership, players and units.
//!
//! `Game` is the only place cross-record state changes happen. Units and
//! players live in arenas addressed by `UnitId` / `PlayerId`; ids are
//! never reused, so a deleted unit stays readable for the rest of the game.

use tracing::{debug, warn};

use frontline_core::config::GameConfig;
use frontline_core::enums::UnitKind;
use frontline_core::events::{Diagnostic, DiagnosticKind, EventRecord, GameEvent};
use frontline_core::types::{Owner, PlayerId, Tick, TileRef, TrajectoryTile, UnitId};
use frontline_map::GameMap;

use crate::error::BuildError;
use crate::executions::Execution;
use crate::player::Player;
use crate::random::PseudoRandom;
use crate::stats::Stats;
use crate::unit::Unit;

/// Optional initial state for a freshly built unit.
#[derive(Debug, Clone, Default)]
pub struct UnitParams {
    /// Build without charging the kind's cost.
    pub skip_cost: bool,
    pub patrol_tile: Option<TileRef>,
    pub target_tile: Option<TileRef>,
    pub target_unit: Option<UnitId>,
    pub trajectory: Vec<TrajectoryTile>,
    pub safe_from_pirates: bool,
}

pub struct Game {
    map: GameMap,
    config: GameConfig,
    ownership: Vec<Option<PlayerId>>,
    players: Vec<Player>,
    units: Vec<Unit>,
    ticks: Tick,
    random: PseudoRandom,
    pending: Vec<Box<dyn Execution>>,
    diagnostics: Vec<Diagnostic>,
    events: Vec<EventRecord>,
    stats: Stats,
}

impl Game {
    pub fn new(map: GameMap, config: GameConfig, seed: u64) -> Self {
        Self {
            ownership: vec![None; map.num_tiles()],
            map,
            config,
            players: Vec::new(),
            units: Vec::new(),
            ticks: 0,
            random: PseudoRandom::new(seed),
            pending: Vec::new(),
            diagnostics: Vec::new(),
            events: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    pub fn in_spawn_phase(&self) -> bool {
        self.config.in_spawn_phase(self.ticks)
    }

    pub(crate) fn end_tick(&mut self) {
        self.ticks += 1;
    }

    /// A child generator seeded from the game's own sequence.
    pub fn fork_random(&mut self) -> PseudoRandom {
        PseudoRandom::new(self.random.next_id())
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    // --- Players ---

    pub fn add_player(&mut self, name: impl Into<String>, gold: u64, troops: u64) -> PlayerId {
        let id = PlayerId(self.players.len() as u32);
        self.players.push(Player::new(id, name, gold, troops));
        id
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0 as usize)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.0 as usize)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    // --- Tiles ---

    pub fn owner(&self, tile: TileRef) -> Owner {
        match self.ownership.get(tile.index() as usize).copied().flatten() {
            Some(id) => Owner::Player(id),
            None => Owner::TerraNullius,
        }
    }

    pub fn has_owner(&self, tile: TileRef) -> bool {
        self.owner(tile).is_player()
    }

    /// Hand `tile` to `player`.
    pub fn conquer(&mut self, player: PlayerId, tile: TileRef) {
        if let Some(slot) = self.ownership.get_mut(tile.index() as usize) {
            *slot = Some(player);
        }
    }

    pub fn tiles_owned(&self, player: PlayerId) -> u32 {
        self.ownership.iter().filter(|o| **o == Some(player)).count() as u32
    }

    // --- Units ---

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize)
    }

    /// Whether `id` names a unit that is still in play.
    pub fn is_unit_active(&self, id: UnitId) -> bool {
        self.unit(id).is_some_and(Unit::is_active)
    }

    /// Every unit ever built, deleted ones included.
    pub fn all_units(&self) -> &[Unit] {
        &self.units
    }

    /// Active units, in build order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_active())
    }

    /// Active units of any of `kinds`.
    pub fn units_of(&self, kinds: &[UnitKind]) -> Vec<UnitId> {
        self.units()
            .filter(|u| kinds.contains(&u.kind()))
            .map(Unit::id)
            .collect()
    }

    /// Active units of `kind` owned by `player`.
    pub fn player_units(&self, player: PlayerId, kind: UnitKind) -> Vec<UnitId> {
        self.units()
            .filter(|u| u.owner() == player && u.kind() == kind)
            .map(Unit::id)
            .collect()
    }

    pub fn has_active_port(&self, player: PlayerId) -> bool {
        self.units()
            .any(|u| u.owner() == player && u.kind() == UnitKind::Port)
    }

    /// Active units of `kinds` within `range` of `tile`, nearest first.
    pub fn nearby_units(&self, tile: TileRef, range: u32, kinds: &[UnitKind]) -> Vec<(UnitId, u64)> {
        let r2 = range as u64 * range as u64;
        let mut found: Vec<(UnitId, u64)> = self
            .units()
            .filter(|u| kinds.contains(&u.kind()))
            .map(|u| (u.id(), self.map.euclidean_dist_squared(tile, u.tile())))
            .filter(|&(_, d2)| d2 <= r2)
            .collect();
        found.sort_by_key(|&(id, d2)| (d2, id));
        found
    }

    /// Where a unit of `kind` ordered toward `tile` would spawn, if the
    /// player may build it at all.
    pub fn can_build(&self, player: PlayerId, kind: UnitKind, tile: TileRef) -> Option<TileRef> {
        let gold = self.player(player)?.gold();
        if !self.map.contains(tile) || gold < self.config.cost(kind) {
            return None;
        }
        match kind {
            UnitKind::Warship | UnitKind::MissileShip => {
                if !self.map.is_ocean(tile) {
                    return None;
                }
                self.nearest_unit_tile(player, UnitKind::Port, tile, |_| true)
            }
            UnitKind::TacticalRocket | UnitKind::ClusterRocket => self.nearest_unit_tile(
                player,
                UnitKind::MissileShip,
                tile,
                |u| !u.is_in_cooldown(),
            ),
            UnitKind::Port => (self.owner(tile).is(player) && self.map.is_ocean_shore(tile))
                .then_some(tile),
            UnitKind::City | UnitKind::DefensePost => {
                (self.owner(tile).is(player) && self.map.is_land(tile)).then_some(tile)
            }
            UnitKind::TransportShip | UnitKind::TradeShip => {
                self.map.is_water(tile).then_some(tile)
            }
            UnitKind::Shell | UnitKind::ClusterBomblet => Some(tile),
        }
    }

    fn nearest_unit_tile(
        &self,
        player: PlayerId,
        kind: UnitKind,
        tile: TileRef,
        ready: impl Fn(&Unit) -> bool,
    ) -> Option<TileRef> {
        self.units()
            .filter(|u| u.owner() == player && u.kind() == kind && ready(u))
            .min_by_key(|u| (self.map.euclidean_dist_squared(tile, u.tile()), u.id()))
            .map(Unit::tile)
    }

    /// Create a unit for `player` at `tile`, charging its cost unless
    /// `params.skip_cost` is set.
    pub fn build_unit(
        &mut self,
        player: PlayerId,
        kind: UnitKind,
        tile: TileRef,
        params: UnitParams,
    ) -> Result<UnitId, BuildError> {
        if !self.map.contains(tile) {
            return Err(BuildError::OffMap { tile });
        }
        let cost = self.config.cost(kind);
        let owner = self
            .players
            .get_mut(player.0 as usize)
            .ok_or(BuildError::UnknownPlayer(player))?;
        if !params.skip_cost && !owner.try_spend(cost) {
            return Err(BuildError::InsufficientGold {
                kind,
                cost,
                gold: owner.gold(),
            });
        }

        let id = UnitId(self.units.len() as u32);
        owner.attach(id);

        let mut unit = Unit::new(id, kind, player, tile, self.config.max_health(kind), self.ticks);
        unit.set_patrol_tile(params.patrol_tile);
        unit.set_target_tile(params.target_tile);
        unit.set_target_unit(params.target_unit);
        unit.set_trajectory(params.trajectory);
        unit.set_safe_from_pirates(params.safe_from_pirates);
        self.units.push(unit);
        Ok(id)
    }

    /// Change a unit's health by `delta`, clamped to its bounds. A unit
    /// brought to zero is deleted and credited to `by`.
    pub fn modify_health(&mut self, id: UnitId, delta: i64, by: Option<PlayerId>) {
        let Some(unit) = self.units.get_mut(id.0 as usize) else {
            return;
        };
        if !unit.is_active() {
            return;
        }
        if unit.apply_health_delta(delta) == 0 {
            self.delete_unit(id, by);
        }
    }

    /// Take a unit out of play. Deleting twice is a no-op.
    pub fn delete_unit(&mut self, id: UnitId, by: Option<PlayerId>) {
        let Some(unit) = self.units.get_mut(id.0 as usize) else {
            return;
        };
        if !unit.is_active() {
            return;
        }
        unit.deactivate();
        let (kind, owner) = (unit.kind(), unit.owner());
        if let Some(player) = self.players.get_mut(owner.0 as usize) {
            player.detach(id);
        }

        if !kind.is_munition() {
            debug!(tick = self.ticks, unit = %id, ?kind, owner = %owner, "unit destroyed");
            self.stats.record_loss(owner);
            self.emit(GameEvent::UnitDestroyed {
                unit: id,
                kind,
                owner,
                by,
            });
        }
    }

    /// Transfer an active unit to `new_owner`.
    pub fn capture_unit(&mut self, id: UnitId, new_owner: PlayerId) {
        if self.player(new_owner).is_none() {
            return;
        }
        let Some(unit) = self.units.get_mut(id.0 as usize) else {
            return;
        };
        let from = unit.owner();
        if !unit.is_active() || from == new_owner {
            return;
        }
        unit.set_owner(new_owner);
        unit.set_target_unit(None);
        unit.set_target_tile(None);

        if let Some(player) = self.players.get_mut(from.0 as usize) {
            player.detach(id);
        }
        if let Some(player) = self.players.get_mut(new_owner.0 as usize) {
            player.attach(id);
        }

        debug!(tick = self.ticks, unit = %id, from = %from, to = %new_owner, "unit captured");
        self.stats.record_capture(new_owner);
        self.emit(GameEvent::UnitCaptured {
            unit: id,
            from,
            to: new_owner,
        });
    }

    /// Clear missile-ship cooldown timers that have run their course.
    pub(crate) fn expire_cooldowns(&mut self) {
        let now = self.ticks;
        let cooldown = self.config.missile_ship.cooldown_ticks;
        for unit in self.units.iter_mut().filter(|u| u.is_active()) {
            unit.expire_cooldowns(now, cooldown);
        }
    }

    // --- Executions, events, diagnostics ---

    /// Queue an execution. It is initialised at the end of the current
    /// step and ticked from the next one.
    pub fn add_execution(&mut self, execution: Box<dyn Execution>) {
        self.pending.push(execution);
    }

    pub(crate) fn take_pending(&mut self) -> Vec<Box<dyn Execution>> {
        std::mem::take(&mut self.pending)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(EventRecord {
            tick: self.ticks,
            event,
        });
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    /// Record a refused request.
    pub fn diagnostic(&mut self, kind: DiagnosticKind) {
        warn!(tick = self.ticks, diagnostic = ?kind, "request dropped");
        self.diagnostics.push(Diagnostic {
            tick: self.ticks,
            kind,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn ownership(&self) -> &[Option<PlayerId>] {
        &self.ownership
    }
}
