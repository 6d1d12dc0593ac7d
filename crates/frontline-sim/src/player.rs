//! Player records.

use frontline_core::types::{PlayerId, UnitId};

#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    gold: u64,
    troops: u64,
    /// Active units only, in acquisition order.
    units: Vec<UnitId>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: impl Into<String>, gold: u64, troops: u64) -> Self {
        Self {
            id,
            name: name.into(),
            gold,
            troops,
            units: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn troops(&self) -> u64 {
        self.troops
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deduct `amount` if affordable. Gold never goes negative.
    pub fn try_spend(&mut self, amount: u64) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }

    /// Remove up to `amount` troops, stopping at zero.
    pub fn remove_troops(&mut self, amount: u64) {
        self.troops = self.troops.saturating_sub(amount);
    }

    pub(crate) fn attach(&mut self, unit: UnitId) {
        if !self.units.contains(&unit) {
            self.units.push(unit);
        }
    }

    pub(crate) fn detach(&mut self, unit: UnitId) {
        self.units.retain(|&u| u != unit);
    }
}
