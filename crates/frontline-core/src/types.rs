//! Fundamental identifiers and spatial handles.

use serde::{Deserialize, Serialize};

/// One discrete simulation step.
pub type Tick = u64;

/// Handle to one cell of the map grid (`y * width + x`).
///
/// Construction is bounds-checked against the grid's cell count, so a
/// `TileRef` always names an in-bounds cell of the map that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileRef(u32);

impl TileRef {
    /// Handle for cell `index` of a grid with `num_tiles` cells, or `None`
    /// when the index is out of bounds.
    pub const fn new(index: u32, num_tiles: u32) -> Option<Self> {
        if index < num_tiles {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw cell index.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Stable index of a player in the game's player arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Stable index of a unit in the game's unit arena. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U{}", self.0)
    }
}

/// Owner of a tile: a player, or nobody.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    TerraNullius,
    Player(PlayerId),
}

impl Owner {
    pub fn is_player(&self) -> bool {
        matches!(self, Owner::Player(_))
    }

    /// The owning player, if any.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Owner::Player(id) => Some(*id),
            Owner::TerraNullius => None,
        }
    }

    /// Whether this owner is exactly `player`.
    pub fn is(&self, player: PlayerId) -> bool {
        self.player() == Some(player)
    }
}

impl From<PlayerId> for Owner {
    fn from(id: PlayerId) -> Self {
        Owner::Player(id)
    }
}

/// One sampled point of a rocket's precomputed flight path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryTile {
    pub tile: TileRef,
    /// Whether defensive systems may intercept the rocket at this point.
    pub targetable: bool,
}
