//! Unit records.
//!
//! Units live in the `Game` arena and are never removed from it: a deleted
//! unit stays readable with `is_active() == false`. Changes that touch
//! other records (health, ownership, deletion) go through `Game`; the
//! setters here cover per-unit auxiliary state only.

use std::collections::VecDeque;

use frontline_core::enums::UnitKind;
use frontline_core::types::{PlayerId, Tick, TileRef, TrajectoryTile, UnitId};

#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    kind: UnitKind,
    owner: PlayerId,
    tile: TileRef,
    health: u32,
    max_health: u32,
    active: bool,
    created_at: Tick,
    touched_at: Tick,
    patrol_tile: Option<TileRef>,
    target_tile: Option<TileRef>,
    target_unit: Option<UnitId>,
    missile_timer_queue: VecDeque<Tick>,
    trajectory: Vec<TrajectoryTile>,
    trajectory_index: usize,
    payload_tiles: Vec<TileRef>,
    targetable: bool,
    reached_target: bool,
    safe_from_pirates: bool,
}

impl Unit {
    pub(crate) fn new(
        id: UnitId,
        kind: UnitKind,
        owner: PlayerId,
        tile: TileRef,
        max_health: u32,
        created_at: Tick,
    ) -> Self {
        Self {
            id,
            kind,
            owner,
            tile,
            health: max_health,
            max_health,
            active: true,
            created_at,
            touched_at: created_at,
            patrol_tile: None,
            target_tile: None,
            target_unit: None,
            missile_timer_queue: VecDeque::new(),
            trajectory: Vec::new(),
            trajectory_index: 0,
            payload_tiles: Vec::new(),
            targetable: true,
            reached_target: false,
            safe_from_pirates: false,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn tile(&self) -> TileRef {
        self.tile
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }

    /// Tick of the last refresh (creation, or a nearby blast).
    pub fn touched_at(&self) -> Tick {
        self.touched_at
    }

    pub fn patrol_tile(&self) -> Option<TileRef> {
        self.patrol_tile
    }

    pub fn target_tile(&self) -> Option<TileRef> {
        self.target_tile
    }

    pub fn target_unit(&self) -> Option<UnitId> {
        self.target_unit
    }

    /// Launch ticks still counting down, oldest first.
    pub fn missile_timer_queue(&self) -> &VecDeque<Tick> {
        &self.missile_timer_queue
    }

    pub fn is_in_cooldown(&self) -> bool {
        !self.missile_timer_queue.is_empty()
    }

    pub fn trajectory(&self) -> &[TrajectoryTile] {
        &self.trajectory
    }

    pub fn trajectory_index(&self) -> usize {
        self.trajectory_index
    }

    pub fn payload_tiles(&self) -> &[TileRef] {
        &self.payload_tiles
    }

    pub fn is_targetable(&self) -> bool {
        self.targetable
    }

    pub fn reached_target(&self) -> bool {
        self.reached_target
    }

    pub fn is_safe_from_pirates(&self) -> bool {
        self.safe_from_pirates
    }

    pub fn move_to(&mut self, tile: TileRef) {
        self.tile = tile;
    }

    pub fn touch(&mut self, tick: Tick) {
        self.touched_at = tick;
    }

    pub fn set_patrol_tile(&mut self, tile: Option<TileRef>) {
        self.patrol_tile = tile;
    }

    pub fn set_target_tile(&mut self, tile: Option<TileRef>) {
        self.target_tile = tile;
    }

    pub fn set_target_unit(&mut self, unit: Option<UnitId>) {
        self.target_unit = unit;
    }

    /// Start a cooldown timer for a rocket launched at `tick`.
    pub fn launch(&mut self, tick: Tick) {
        self.missile_timer_queue.push_back(tick);
    }

    /// Drop timers that have run for at least `cooldown` ticks.
    pub fn expire_cooldowns(&mut self, now: Tick, cooldown: Tick) {
        while let Some(&started) = self.missile_timer_queue.front() {
            if now.saturating_sub(started) < cooldown {
                break;
            }
            self.missile_timer_queue.pop_front();
        }
    }

    pub fn set_trajectory(&mut self, trajectory: Vec<TrajectoryTile>) {
        self.trajectory = trajectory;
        self.trajectory_index = 0;
    }

    pub fn set_trajectory_index(&mut self, index: usize) {
        self.trajectory_index = index.min(self.trajectory.len().saturating_sub(1));
    }

    pub fn set_payload_tiles(&mut self, tiles: Vec<TileRef>) {
        self.payload_tiles = tiles;
    }

    pub fn set_targetable(&mut self, targetable: bool) {
        self.targetable = targetable;
    }

    pub fn set_reached_target(&mut self, reached: bool) {
        self.reached_target = reached;
    }

    pub fn set_safe_from_pirates(&mut self, safe: bool) {
        self.safe_from_pirates = safe;
    }

    /// Apply a health change, clamped to `[0, max_health]`. Returns the new
    /// health. Only `Game` calls this so that reaching zero deletes the unit.
    pub(crate) fn apply_health_delta(&mut self, delta: i64) -> u32 {
        let next = (self.health as i64 + delta).clamp(0, self.max_health as i64);
        self.health = next as u32;
        self.health
    }

    pub(crate) fn set_owner(&mut self, owner: PlayerId) {
        self.owner = owner;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_unit() -> Unit {
        Unit::new(
            UnitId(0),
            UnitKind::MissileShip,
            PlayerId(0),
            TileRef::new(3, 16).unwrap(),
            600,
            10,
        )
    }

    #[test]
    fn test_health_clamped() {
        let mut unit = make_unit();
        assert_eq!(unit.apply_health_delta(500), 600);
        assert_eq!(unit.apply_health_delta(-250), 350);
        assert_eq!(unit.apply_health_delta(-10_000), 0);
    }

    #[test]
    fn test_cooldown_expiry_is_exact() {
        let mut unit = make_unit();
        unit.launch(100);
        unit.launch(110);
        assert!(unit.is_in_cooldown());

        unit.expire_cooldowns(174, 75);
        assert_eq!(unit.missile_timer_queue().len(), 2);
        unit.expire_cooldowns(175, 75);
        assert_eq!(unit.missile_timer_queue().len(), 1);
        unit.expire_cooldowns(185, 75);
        assert!(!unit.is_in_cooldown());
    }

    #[test]
    fn test_trajectory_index_stays_in_bounds() {
        let mut unit = make_unit();
        let tile = TileRef::new(1, 16).unwrap();
        unit.set_trajectory(vec![
            TrajectoryTile {
                tile,
                targetable: true,
            };
            4
        ]);
        unit.set_trajectory_index(2);
        assert_eq!(unit.trajectory_index(), 2);
        unit.set_trajectory_index(99);
        assert_eq!(unit.trajectory_index(), 3);
    }
}
