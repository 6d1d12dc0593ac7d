//! Ballistic flight paths.
//!
//! A cubic Bézier from launch tile to destination, arcing toward the top
//! of the map when ballistic. The curve is sampled once into tiles spaced
//! `speed` apart by arc length; flight then just walks the samples.

use glam::DVec2;

use frontline_core::types::TileRef;

use crate::grid::GameMap;

/// Minimum arc height for ballistic paths, in tiles.
pub const PARABOLA_MIN_HEIGHT: f64 = 50.0;

/// Integration steps per tile of straight-line distance.
const SAMPLES_PER_TILE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    Next(TileRef),
    Complete,
}

#[derive(Debug, Clone, Default)]
pub struct ParabolaPathFinder {
    tiles: Vec<TileRef>,
    spacing: u32,
    /// Index of the next sample to hand out.
    cursor: usize,
}

impl ParabolaPathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the curve from `start` to `dst` and precompute its samples.
    ///
    /// Resets any progress made along a previous curve.
    pub fn compute_control_points(
        &mut self,
        map: &GameMap,
        start: TileRef,
        dst: TileRef,
        speed: u32,
        ballistic: bool,
    ) {
        self.spacing = speed.max(1);
        self.cursor = 0;
        if start == dst {
            self.tiles = vec![dst];
            return;
        }

        let p0 = tile_pos(map, start);
        let p3 = tile_pos(map, dst);
        let dist = p0.distance(p3);

        let height = if ballistic {
            (dist / 3.0).max(PARABOLA_MIN_HEIGHT)
        } else {
            0.0
        };
        let lift = DVec2::new(0.0, -height);
        let p1 = clamp_to_map(map, p0 + (p3 - p0) * 0.25 + lift);
        let p2 = clamp_to_map(map, p0 + (p3 - p0) * 0.75 + lift);

        let spacing = speed.max(1) as f64;
        let steps = ((dist + 2.0 * height) * SAMPLES_PER_TILE).ceil().max(1.0) as usize;

        let mut tiles = Vec::new();
        let mut prev = p0;
        let mut travelled = 0.0;
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let point = cubic_bezier(p0, p1, p2, p3, t);
            travelled += prev.distance(point);
            prev = point;
            if travelled >= spacing {
                travelled -= spacing;
                tiles.extend(pos_tile(map, point));
            }
        }
        if tiles.last() != Some(&dst) {
            tiles.push(dst);
        }

        self.tiles = tiles;
    }

    /// Advance `speed` along the path.
    ///
    /// Returns the sample reached, landing exactly on the destination before
    /// reporting `Complete` even when the last step overshoots it.
    pub fn next_tile(&mut self, speed: u32) -> PathStep {
        if self.cursor >= self.tiles.len() {
            return PathStep::Complete;
        }
        let stride = ((speed as f64 / self.spacing as f64).round() as usize).max(1);
        let index = if self.cursor == 0 {
            stride - 1
        } else {
            self.current_index() + stride
        }
        .min(self.tiles.len() - 1);

        self.cursor = index + 1;
        PathStep::Next(self.tiles[index])
    }

    /// Index of the most recently returned sample; 0 before the first step.
    pub fn current_index(&self) -> usize {
        self.cursor.saturating_sub(1)
    }

    /// Every precomputed sample, launch side first, destination last.
    pub fn all_tiles(&self) -> &[TileRef] {
        &self.tiles
    }

}

fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

fn tile_pos(map: &GameMap, tile: TileRef) -> DVec2 {
    DVec2::new(map.x(tile) as f64, map.y(tile) as f64)
}

fn clamp_to_map(map: &GameMap, p: DVec2) -> DVec2 {
    p.clamp(
        DVec2::ZERO,
        DVec2::new((map.width() - 1) as f64, (map.height() - 1) as f64),
    )
}

fn pos_tile(map: &GameMap, p: DVec2) -> Option<TileRef> {
    let p = clamp_to_map(map, p.round());
    map.tile_ref(p.x as i32, p.y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontline_core::enums::Terrain;
    use proptest::prelude::*;

    fn open_map() -> GameMap {
        GameMap::filled(200, 200, Terrain::Land).unwrap()
    }

    fn walk(finder: &mut ParabolaPathFinder, speed: u32) -> Vec<TileRef> {
        let mut seen = Vec::new();
        while let PathStep::Next(tile) = finder.next_tile(speed) {
            seen.push(tile);
            assert!(seen.len() < 10_000, "path did not terminate");
        }
        seen
    }

    #[test]
    fn test_path_ends_on_destination() {
        let map = open_map();
        let start = map.tile_ref(10, 150).unwrap();
        let dst = map.tile_ref(180, 160).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, start, dst, 4, true);

        let walked = walk(&mut finder, 4);
        assert_eq!(walked.last(), Some(&dst));
        assert_eq!(walked, finder.all_tiles());
        assert_eq!(finder.next_tile(4), PathStep::Complete);
    }

    #[test]
    fn test_ballistic_path_arcs_upward() {
        let map = open_map();
        let start = map.tile_ref(20, 150).unwrap();
        let dst = map.tile_ref(180, 150).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, start, dst, 4, true);

        let apex = finder.all_tiles().iter().map(|&t| map.y(t)).min().unwrap();
        assert!(apex < 150 - 30, "apex y {apex} should rise above the launch row");
    }

    #[test]
    fn test_flat_path_is_straight() {
        let map = open_map();
        let start = map.tile_ref(20, 100).unwrap();
        let dst = map.tile_ref(120, 100).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, start, dst, 5, false);

        assert!(finder.all_tiles().iter().all(|&t| map.y(t) == 100));
        assert_eq!(finder.all_tiles().len(), 20);
    }

    #[test]
    fn test_arc_clamped_near_top_edge() {
        let map = open_map();
        let start = map.tile_ref(10, 5).unwrap();
        let dst = map.tile_ref(150, 5).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, start, dst, 3, true);
        let walked = walk(&mut finder, 3);
        assert!(walked.iter().all(|&t| map.contains(t)));
        assert_eq!(walked.last(), Some(&dst));
    }

    #[test]
    fn test_zero_length_path() {
        let map = open_map();
        let tile = map.tile_ref(50, 50).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, tile, tile, 4, true);
        assert_eq!(finder.next_tile(4), PathStep::Next(tile));
        assert_eq!(finder.next_tile(4), PathStep::Complete);
    }

    #[test]
    fn test_current_index_tracks_progress() {
        let map = open_map();
        let start = map.tile_ref(0, 100).unwrap();
        let dst = map.tile_ref(60, 100).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, start, dst, 3, false);
        assert_eq!(finder.current_index(), 0);
        finder.next_tile(3);
        assert_eq!(finder.current_index(), 0);
        finder.next_tile(3);
        assert_eq!(finder.current_index(), 1);
        finder.next_tile(6);
        assert_eq!(finder.current_index(), 3);
    }

    #[test]
    fn test_recompute_resets_progress() {
        let map = open_map();
        let a = map.tile_ref(0, 0).unwrap();
        let b = map.tile_ref(40, 0).unwrap();
        let mut finder = ParabolaPathFinder::new();
        finder.compute_control_points(&map, a, b, 4, false);
        walk(&mut finder, 4);
        assert_eq!(finder.next_tile(4), PathStep::Complete);

        finder.compute_control_points(&map, b, a, 4, false);
        assert_eq!(finder.current_index(), 0);
        let first = finder.all_tiles()[0];
        assert_eq!(finder.next_tile(4), PathStep::Next(first));
    }

    proptest! {
        #[test]
        fn prop_path_terminates_with_stable_length(
            sx in 0i32..200, sy in 0i32..200,
            dx in 0i32..200, dy in 0i32..200,
            speed in 1u32..12,
            ballistic in any::<bool>(),
        ) {
            let map = open_map();
            let start = map.tile_ref(sx, sy).unwrap();
            let dst = map.tile_ref(dx, dy).unwrap();
            let mut finder = ParabolaPathFinder::new();
            finder.compute_control_points(&map, start, dst, speed, ballistic);
            let before = finder.all_tiles().len();

            let mut steps = 0usize;
            let mut last = None;
            while let PathStep::Next(tile) = finder.next_tile(speed) {
                last = Some(tile);
                steps += 1;
                prop_assert!(steps <= before);
            }
            prop_assert_eq!(steps, before);
            prop_assert_eq!(last, Some(dst));
            prop_assert_eq!(finder.all_tiles().len(), before);
        }
    }
}
