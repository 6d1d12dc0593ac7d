//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Terrain of a single map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Ocean,
    Lake,
    Land,
}

/// Every kind of unit the simulation knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    TransportShip,
    Warship,
    /// Light warship that doubles as a rocket carrier.
    MissileShip,
    TradeShip,
    Shell,
    TacticalRocket,
    ClusterRocket,
    /// Secondary rocket released when a cluster rocket splits.
    ClusterBomblet,
    Port,
    City,
    DefensePost,
}

impl UnitKind {
    pub const ALL: [UnitKind; 11] = [
        UnitKind::TransportShip,
        UnitKind::Warship,
        UnitKind::MissileShip,
        UnitKind::TradeShip,
        UnitKind::Shell,
        UnitKind::TacticalRocket,
        UnitKind::ClusterRocket,
        UnitKind::ClusterBomblet,
        UnitKind::Port,
        UnitKind::City,
        UnitKind::DefensePost,
    ];

    /// Munitions are never destroyed by blasts.
    pub fn is_munition(self) -> bool {
        matches!(
            self,
            UnitKind::Shell
                | UnitKind::TacticalRocket
                | UnitKind::ClusterRocket
                | UnitKind::ClusterBomblet
        )
    }

    pub fn is_structure(self) -> bool {
        matches!(self, UnitKind::Port | UnitKind::City | UnitKind::DefensePost)
    }

    /// Ships that move over water.
    pub fn is_naval(self) -> bool {
        matches!(
            self,
            UnitKind::TransportShip
                | UnitKind::Warship
                | UnitKind::MissileShip
                | UnitKind::TradeShip
        )
    }

    /// Ships a warship will open fire on when owned by someone else.
    pub fn is_combat_target(self) -> bool {
        matches!(
            self,
            UnitKind::TransportShip | UnitKind::Warship | UnitKind::MissileShip
        )
    }
}

/// Tag identifying an execution variant. Only used at the boundary
/// (tests, tooling); the scheduler never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionKind {
    Warship,
    Shell,
    Rocket,
    MoveWarship,
}
