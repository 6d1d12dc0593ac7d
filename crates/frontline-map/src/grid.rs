//! GameMap: static terrain grid with coordinate and spatial queries.

use std::collections::VecDeque;

use thiserror::Error;

use frontline_core::enums::Terrain;
use frontline_core::types::TileRef;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("terrain has {actual} cells, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown terrain glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// Rectangular terrain grid, row-major (`index = y * width + x`).
#[derive(Debug, Clone)]
pub struct GameMap {
    width: u32,
    height: u32,
    terrain: Vec<Terrain>,
}

impl GameMap {
    pub fn new(width: u32, height: u32, terrain: Vec<Terrain>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if terrain.len() != expected {
            return Err(MapError::DimensionMismatch {
                expected,
                actual: terrain.len(),
            });
        }
        Ok(Self {
            width,
            height,
            terrain,
        })
    }

    /// A map of uniform terrain.
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Result<Self, MapError> {
        Self::new(width, height, vec![terrain; width as usize * height as usize])
    }

    /// Parse a map from text rows: `#` land, `~` ocean, `o` lake.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty {
                width: 0,
                height: height as u32,
            });
        }

        let mut terrain = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let columns = row.chars().count();
            if columns != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: columns,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                terrain.push(match glyph {
                    '#' => Terrain::Land,
                    '~' => Terrain::Ocean,
                    'o' => Terrain::Lake,
                    _ => return Err(MapError::UnknownGlyph { glyph, x, y }),
                });
            }
        }

        Self::new(width as u32, height as u32, terrain)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_tiles(&self) -> usize {
        self.terrain.len()
    }

    pub fn x(&self, tile: TileRef) -> u32 {
        tile.index() % self.width
    }

    pub fn y(&self, tile: TileRef) -> u32 {
        tile.index() / self.width
    }

    pub fn is_valid_coord(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Tile at (x, y), or `None` when the coordinate lies off the map.
    pub fn tile_ref(&self, x: i32, y: i32) -> Option<TileRef> {
        if !self.is_valid_coord(x, y) {
            return None;
        }
        TileRef::new(y as u32 * self.width + x as u32, self.terrain.len() as u32)
    }

    /// Whether `tile` names a cell of this map.
    pub fn contains(&self, tile: TileRef) -> bool {
        (tile.index() as usize) < self.terrain.len()
    }

    /// Iterate every tile in index order.
    pub fn tiles(&self) -> impl Iterator<Item = TileRef> {
        let n = self.terrain.len() as u32;
        (0..n).filter_map(move |i| TileRef::new(i, n))
    }

    pub fn terrain(&self, tile: TileRef) -> Terrain {
        self.terrain
            .get(tile.index() as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_land(&self, tile: TileRef) -> bool {
        self.terrain(tile) == Terrain::Land
    }

    pub fn is_ocean(&self, tile: TileRef) -> bool {
        self.terrain(tile) == Terrain::Ocean
    }

    pub fn is_water(&self, tile: TileRef) -> bool {
        matches!(self.terrain(tile), Terrain::Ocean | Terrain::Lake)
    }

    /// Land tile touching the ocean (where ports may be built).
    pub fn is_ocean_shore(&self, tile: TileRef) -> bool {
        self.is_land(tile) && self.neighbors(tile).any(|n| self.is_ocean(n))
    }

    /// Orthogonal neighbors in fixed order: up, down, left, right.
    pub fn neighbors(&self, tile: TileRef) -> impl Iterator<Item = TileRef> + '_ {
        let x = self.x(tile) as i32;
        let y = self.y(tile) as i32;
        [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)]
            .into_iter()
            .filter_map(move |(nx, ny)| self.tile_ref(nx, ny))
    }

    pub fn euclidean_dist_squared(&self, a: TileRef, b: TileRef) -> u64 {
        let dx = self.x(a) as i64 - self.x(b) as i64;
        let dy = self.y(a) as i64 - self.y(b) as i64;
        (dx * dx + dy * dy) as u64
    }

    /// Breadth-first flood from `start` over tiles accepted by `filter`.
    ///
    /// Returns tiles in visiting order, which is deterministic for a given
    /// map and filter. `start` is included only if it passes the filter.
    pub fn bfs<F>(&self, start: TileRef, mut filter: F) -> Vec<TileRef>
    where
        F: FnMut(&GameMap, TileRef) -> bool,
    {
        let mut found = Vec::new();
        if !self.contains(start) || !filter(self, start) {
            return found;
        }

        let mut seen = vec![false; self.terrain.len()];
        let mut queue = VecDeque::new();
        seen[start.index() as usize] = true;
        queue.push_back(start);

        while let Some(tile) = queue.pop_front() {
            found.push(tile);
            for next in self.neighbors(tile) {
                let idx = next.index() as usize;
                if seen[idx] {
                    continue;
                }
                seen[idx] = true;
                if filter(self, next) {
                    queue.push_back(next);
                }
            }
        }

        found
    }

    /// All tiles whose centers lie within `radius` of `center`.
    pub fn disc(&self, center: TileRef, radius: u32) -> Vec<TileRef> {
        let r2 = radius as u64 * radius as u64;
        self.bfs(center, |map, t| map.euclidean_dist_squared(center, t) <= r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_map() -> GameMap {
        GameMap::from_ascii(&[
            "~~~~~", //
            "~~###",
            "~~###",
            "~o###",
        ])
        .unwrap()
    }

    #[test]
    fn test_coordinate_round_trip() {
        let map = make_test_map();
        let tile = map.tile_ref(3, 2).unwrap();
        assert_eq!(map.x(tile), 3);
        assert_eq!(map.y(tile), 2);
        assert_eq!(tile.index(), 13);
    }

    #[test]
    fn test_out_of_bounds_coordinates_produce_no_tile() {
        let map = make_test_map();
        assert!(map.tile_ref(-1, 0).is_none());
        assert!(map.tile_ref(0, -1).is_none());
        assert!(map.tile_ref(5, 0).is_none());
        assert!(map.tile_ref(0, 4).is_none());
        assert!(!map.is_valid_coord(5, 4));
    }

    #[test]
    fn test_terrain_predicates() {
        let map = make_test_map();
        let ocean = map.tile_ref(0, 0).unwrap();
        let lake = map.tile_ref(1, 3).unwrap();
        let shore = map.tile_ref(2, 1).unwrap();
        let inland = map.tile_ref(4, 3).unwrap();

        assert!(map.is_ocean(ocean));
        assert!(map.is_water(lake) && !map.is_ocean(lake));
        assert!(map.is_ocean_shore(shore));
        assert!(!map.is_ocean_shore(inland));
    }

    #[test]
    fn test_neighbors_at_corner() {
        let map = make_test_map();
        let corner = map.tile_ref(0, 0).unwrap();
        let n: Vec<_> = map.neighbors(corner).collect();
        assert_eq!(n, vec![map.tile_ref(0, 1).unwrap(), map.tile_ref(1, 0).unwrap()]);
    }

    #[test]
    fn test_bfs_respects_filter() {
        let map = make_test_map();
        let start = map.tile_ref(3, 2).unwrap();
        let land = map.bfs(start, |m, t| m.is_land(t));
        assert_eq!(land.len(), 9);
        assert_eq!(land[0], start);
        assert!(land.iter().all(|&t| map.is_land(t)));

        let ocean = map.tile_ref(0, 0).unwrap();
        assert!(map.bfs(ocean, |m, t| m.is_land(t)).is_empty());
    }

    #[test]
    fn test_disc_matches_distance() {
        let map = GameMap::filled(21, 21, Terrain::Land).unwrap();
        let center = map.tile_ref(10, 10).unwrap();
        let disc = map.disc(center, 3);
        let expected = map
            .tiles()
            .filter(|&t| map.euclidean_dist_squared(center, t) <= 9)
            .count();
        assert_eq!(disc.len(), expected);
        assert_eq!(disc.len(), 29);
    }

    #[test]
    fn test_invalid_maps_rejected() {
        assert_eq!(
            GameMap::new(2, 2, vec![Terrain::Land; 3]).unwrap_err(),
            MapError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert!(matches!(
            GameMap::from_ascii(&["##", "#"]),
            Err(MapError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            GameMap::from_ascii(&["#x"]),
            Err(MapError::UnknownGlyph { glyph: 'x', .. })
        ));
    }
}
