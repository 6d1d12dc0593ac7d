//! Strongly-typed game configuration.
//!
//! Built once from defaults plus optional JSON overrides, validated, then
//! handed by reference to every component that needs a tunable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::UnitKind;
use crate::error::ConfigError;

/// Per-kind unit statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_health: u32,
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarshipConfig {
    pub shell_attack_rate: u64,
    pub targeting_range: u32,
    pub patrol_range: u32,
    pub heal_per_tick: u32,
    pub volley_size: u32,
    pub hunt_steps_per_tick: u32,
}

impl Default for WarshipConfig {
    fn default() -> Self {
        Self {
            shell_attack_rate: WARSHIP_SHELL_ATTACK_RATE,
            targeting_range: WARSHIP_TARGETING_RANGE,
            patrol_range: WARSHIP_PATROL_RANGE,
            heal_per_tick: WARSHIP_HEAL_PER_TICK,
            volley_size: WARSHIP_VOLLEY_SIZE,
            hunt_steps_per_tick: WARSHIP_HUNT_STEPS_PER_TICK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileShipConfig {
    pub cooldown_ticks: u64,
    pub volley_size: u32,
    /// When false the ship is dedicated to rocket duty and never fires shells.
    pub shelling_enabled: bool,
}

impl Default for MissileShipConfig {
    fn default() -> Self {
        Self {
            cooldown_ticks: MISSILE_SHIP_COOLDOWN_TICKS,
            volley_size: MISSILE_SHIP_VOLLEY_SIZE,
            shelling_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub base_damage: u32,
    pub steps_per_tick: u32,
    pub lifetime_ticks: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            base_damage: SHELL_BASE_DAMAGE,
            steps_per_tick: SHELL_STEPS_PER_TICK,
            lifetime_ticks: SHELL_LIFETIME_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    pub speed: u32,
    pub bomblet_speed: u32,
    pub targetable_range: u32,
    pub tactical_blast_radius: u32,
    pub tactical_extra_bursts: u32,
    pub tactical_scatter_radius: u32,
    pub tactical_scatter_attempts: u32,
    pub bomblet_count: u32,
    pub cluster_spread_radius: u32,
    pub cluster_min_spacing: u32,
    pub cluster_placement_attempts: u32,
    pub bomblet_blast_radius: u32,
    pub troop_damage: u64,
    pub refresh_margin: u32,
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            speed: ROCKET_SPEED,
            bomblet_speed: BOMBLET_SPEED,
            targetable_range: ROCKET_TARGETABLE_RANGE,
            tactical_blast_radius: TACTICAL_BLAST_RADIUS,
            tactical_extra_bursts: TACTICAL_EXTRA_BURSTS,
            tactical_scatter_radius: TACTICAL_SCATTER_RADIUS,
            tactical_scatter_attempts: TACTICAL_SCATTER_ATTEMPTS,
            bomblet_count: CLUSTER_BOMBLET_COUNT,
            cluster_spread_radius: CLUSTER_SPREAD_RADIUS,
            cluster_min_spacing: CLUSTER_MIN_SPACING,
            cluster_placement_attempts: CLUSTER_PLACEMENT_ATTEMPTS,
            bomblet_blast_radius: BOMBLET_BLAST_RADIUS,
            troop_damage: BLAST_TROOP_DAMAGE,
            refresh_margin: BLAST_REFRESH_MARGIN,
        }
    }
}

/// Complete tuning record for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub spawn_phase_turns: u64,
    pub units: BTreeMap<UnitKind, UnitStats>,
    pub warship: WarshipConfig,
    pub missile_ship: MissileShipConfig,
    pub shell: ShellConfig,
    pub rocket: RocketConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_phase_turns: SPAWN_PHASE_TURNS,
            units: UnitKind::ALL
                .iter()
                .map(|&kind| (kind, default_unit_stats(kind)))
                .collect(),
            warship: WarshipConfig::default(),
            missile_ship: MissileShipConfig::default(),
            shell: ShellConfig::default(),
            rocket: RocketConfig::default(),
        }
    }
}

/// Built-in statistics for a unit kind.
pub fn default_unit_stats(kind: UnitKind) -> UnitStats {
    let (max_health, cost) = match kind {
        UnitKind::Warship => (WARSHIP_MAX_HEALTH, WARSHIP_COST),
        UnitKind::MissileShip => (MISSILE_SHIP_MAX_HEALTH, MISSILE_SHIP_COST),
        UnitKind::Port => (UNARMORED_MAX_HEALTH, PORT_COST),
        UnitKind::City => (UNARMORED_MAX_HEALTH, CITY_COST),
        UnitKind::DefensePost => (UNARMORED_MAX_HEALTH, DEFENSE_POST_COST),
        UnitKind::TacticalRocket => (UNARMORED_MAX_HEALTH, TACTICAL_ROCKET_COST),
        UnitKind::ClusterRocket => (UNARMORED_MAX_HEALTH, CLUSTER_ROCKET_COST),
        UnitKind::TransportShip
        | UnitKind::TradeShip
        | UnitKind::Shell
        | UnitKind::ClusterBomblet => (UNARMORED_MAX_HEALTH, 0),
    };
    UnitStats { max_health, cost }
}

impl GameConfig {
    /// Deep-merge a JSON override document over the defaults and validate.
    ///
    /// Objects merge key by key; any other value replaces the default.
    pub fn with_overrides(overrides: &str) -> Result<Self, ConfigError> {
        let mut merged = serde_json::to_value(Self::default())?;
        let patch: serde_json::Value = serde_json::from_str(overrides)?;
        merge_json(&mut merged, patch);
        let config: GameConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or break the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warship.shell_attack_rate == 0 {
            return Err(ConfigError::invalid("warship.shell_attack_rate", "must be > 0"));
        }
        if self.warship.volley_size == 0 {
            return Err(ConfigError::invalid("warship.volley_size", "must be > 0"));
        }
        if self.rocket.speed == 0 || self.rocket.bomblet_speed == 0 {
            return Err(ConfigError::invalid("rocket.speed", "rocket speeds must be > 0"));
        }
        if self.rocket.bomblet_count == 0 {
            return Err(ConfigError::invalid("rocket.bomblet_count", "must be > 0"));
        }
        if self.shell.steps_per_tick == 0 {
            return Err(ConfigError::invalid("shell.steps_per_tick", "must be > 0"));
        }
        if let Some((kind, _)) = self.units.iter().find(|(_, stats)| stats.max_health == 0) {
            return Err(ConfigError::invalid(
                "units.max_health",
                format!("{kind:?} must have max_health > 0"),
            ));
        }
        Ok(())
    }

    pub fn unit_stats(&self, kind: UnitKind) -> UnitStats {
        self.units
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_unit_stats(kind))
    }

    pub fn max_health(&self, kind: UnitKind) -> u32 {
        self.unit_stats(kind).max_health
    }

    pub fn cost(&self, kind: UnitKind) -> u64 {
        self.unit_stats(kind).cost
    }

    /// Whether the game is still in its pre-game setup phase at `tick`.
    pub fn in_spawn_phase(&self, tick: u64) -> bool {
        tick < self.spawn_phase_turns
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
