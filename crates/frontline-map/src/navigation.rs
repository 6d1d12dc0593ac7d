//! Single-step movement toward a goal.
//!
//! Callers advance one tile per call and re-plan every tick, so units
//! react to targets that move.

use std::collections::VecDeque;

use frontline_core::types::TileRef;

use crate::grid::GameMap;

/// Outcome of one water navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterStep {
    Arrived,
    Next(TileRef),
    NoPath,
}

/// One step along the straight line from `from` to `to`, ignoring terrain.
///
/// Moves diagonally while both axes differ. Returns `None` when already
/// there.
pub fn straight_step(map: &GameMap, from: TileRef, to: TileRef) -> Option<TileRef> {
    if from == to {
        return None;
    }
    let (fx, fy) = (map.x(from) as i32, map.y(from) as i32);
    let (tx, ty) = (map.x(to) as i32, map.y(to) as i32);
    map.tile_ref(fx + (tx - fx).signum(), fy + (ty - fy).signum())
}

/// First step of a shortest water route from `from` to `to`.
///
/// Searches breadth-first over water tiles, visiting at most `limit`
/// tiles. The goal itself may be any terrain so ships can dock on shore.
pub fn water_step(map: &GameMap, from: TileRef, to: TileRef, limit: usize) -> WaterStep {
    if from == to {
        return WaterStep::Arrived;
    }

    let mut came_from: Vec<Option<TileRef>> = vec![None; map.num_tiles()];
    let mut queue = VecDeque::new();
    came_from[from.index() as usize] = Some(from);
    queue.push_back(from);
    let mut visited = 0usize;

    while let Some(tile) = queue.pop_front() {
        visited += 1;
        if visited > limit {
            break;
        }
        for next in map.neighbors(tile) {
            let idx = next.index() as usize;
            if came_from[idx].is_some() {
                continue;
            }
            if next != to && !map.is_water(next) {
                continue;
            }
            came_from[idx] = Some(tile);
            if next == to {
                return WaterStep::Next(first_step(&came_from, from, to));
            }
            queue.push_back(next);
        }
    }

    WaterStep::NoPath
}

fn first_step(came_from: &[Option<TileRef>], from: TileRef, to: TileRef) -> TileRef {
    let mut current = to;
    while let Some(prev) = came_from[current.index() as usize] {
        if prev == from {
            return current;
        }
        current = prev;
    }
    to
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_map() -> GameMap {
        GameMap::from_ascii(&[
            "~~~~~~~~", //
            "~######~",
            "~#~~~~#~",
            "~#~##~#~",
            "~~~##~~~",
        ])
        .unwrap()
    }

    #[test]
    fn test_straight_step_moves_diagonally() {
        let map = channel_map();
        let from = map.tile_ref(0, 0).unwrap();
        let to = map.tile_ref(5, 3).unwrap();
        assert_eq!(straight_step(&map, from, to), map.tile_ref(1, 1));
        assert_eq!(straight_step(&map, to, to), None);
    }

    #[test]
    fn test_straight_step_reaches_goal() {
        let map = channel_map();
        let to = map.tile_ref(7, 4).unwrap();
        let mut at = map.tile_ref(0, 0).unwrap();
        let mut steps = 0;
        while let Some(next) = straight_step(&map, at, to) {
            at = next;
            steps += 1;
        }
        assert_eq!(at, to);
        assert_eq!(steps, 7);
    }

    #[test]
    fn test_water_step_routes_around_land() {
        let map = channel_map();
        let from = map.tile_ref(0, 2).unwrap();
        let to = map.tile_ref(2, 2).unwrap();
        let mut at = from;
        let mut steps = 0;
        loop {
            match water_step(&map, at, to, 1_000) {
                WaterStep::Arrived => break,
                WaterStep::Next(next) => {
                    assert!(map.is_water(next));
                    at = next;
                    steps += 1;
                }
                WaterStep::NoPath => panic!("expected a route"),
            }
        }
        // down the west edge, along the bottom, up into the inner basin
        assert_eq!(steps, 6);
    }

    #[test]
    fn test_water_step_no_path_over_land() {
        let map = GameMap::from_ascii(&["~#~"]).unwrap();
        let from = map.tile_ref(0, 0).unwrap();
        let to = map.tile_ref(2, 0).unwrap();
        assert_eq!(water_step(&map, from, to, 1_000), WaterStep::NoPath);
    }

    #[test]
    fn test_water_step_respects_limit() {
        let map = channel_map();
        let from = map.tile_ref(0, 0).unwrap();
        let to = map.tile_ref(4, 2).unwrap();
        assert_eq!(water_step(&map, from, to, 3), WaterStep::NoPath);
        assert!(matches!(water_step(&map, from, to, 1_000), WaterStep::Next(_)));
    }
}
