//! Map geometry for FRONTLINE.
//!
//! Terrain grid with coordinate conversion and spatial queries,
//! ballistic trajectory sampling, and single-step navigation helpers.

pub mod grid;
pub mod navigation;
pub mod parabola;

pub use grid::{GameMap, MapError};
pub use navigation::{straight_step, water_step, WaterStep};
pub use parabola::{ParabolaPathFinder, PathStep};
