//! Per-player counters.

use std::collections::BTreeMap;

use frontline_core::enums::UnitKind;
use frontline_core::types::PlayerId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BombCounts {
    pub launched: u32,
    pub landed: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Stats {
    bombs: BTreeMap<(PlayerId, UnitKind), BombCounts>,
    captures: BTreeMap<PlayerId, u32>,
    units_lost: BTreeMap<PlayerId, u32>,
}

impl Stats {
    pub fn bomb_launch(&mut self, player: PlayerId, kind: UnitKind) {
        self.bombs.entry((player, kind)).or_default().launched += 1;
    }

    pub fn bomb_land(&mut self, player: PlayerId, kind: UnitKind) {
        self.bombs.entry((player, kind)).or_default().landed += 1;
    }

    pub fn bombs(&self, player: PlayerId, kind: UnitKind) -> BombCounts {
        self.bombs.get(&(player, kind)).copied().unwrap_or_default()
    }

    pub fn record_capture(&mut self, player: PlayerId) {
        *self.captures.entry(player).or_default() += 1;
    }

    pub fn captures(&self, player: PlayerId) -> u32 {
        self.captures.get(&player).copied().unwrap_or(0)
    }

    pub fn record_loss(&mut self, player: PlayerId) {
        *self.units_lost.entry(player).or_default() += 1;
    }

    pub fn units_lost(&self, player: PlayerId) -> u32 {
        self.units_lost.get(&player).copied().unwrap_or(0)
    }
}
