//! Static board layout served through [`combat_core::MapOracle`].
use std::collections::HashMap;

use combat_core::{MapDimensions, MapOracle, StaticTile, TerrainKind, Tile};

/// MapOracle implementation with static terrain.
///
/// Tiles missing from the table read as `None`, which the pathfinder treats
/// as impassable.
#[derive(Clone, Debug)]
pub struct BoardMap {
    dimensions: MapDimensions,
    tiles: HashMap<Tile, StaticTile>,
}

impl BoardMap {
    pub fn new(dimensions: MapDimensions, tiles: HashMap<Tile, StaticTile>) -> Self {
        Self { dimensions, tiles }
    }

    /// All-floor board, handy for tests and scratch levels.
    pub fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        let mut tiles = HashMap::new();
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                tiles.insert(Tile::new(x, y), StaticTile::new(TerrainKind::Floor));
            }
        }
        Self::new(dimensions, tiles)
    }

    #[must_use]
    pub fn with_terrain(mut self, tile: Tile, terrain: TerrainKind) -> Self {
        if self.dimensions.contains(tile) {
            self.tiles.insert(tile, StaticTile::new(terrain));
        }
        self
    }
}

impl MapOracle for BoardMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, tile: Tile) -> Option<StaticTile> {
        self.tiles.get(&tile).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_overrides_stay_inside_the_board() {
        let map = BoardMap::open(3, 3)
            .with_terrain(Tile::new(1, 1), TerrainKind::Wall)
            .with_terrain(Tile::new(7, 7), TerrainKind::Wall);
        assert!(!map.is_passable(Tile::new(1, 1)));
        assert!(map.is_passable(Tile::new(0, 1)));
        assert_eq!(map.tile(Tile::new(7, 7)), None);
    }
}
