//! Board terrain loader.
//!
//! Every tile inside the dimensions starts as floor; the file lists the
//! exceptions.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{MapDimensions, StaticTile, TerrainKind, Tile};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file, ron_options};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    tiles: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
}

/// Loader for board terrain from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<(MapDimensions, HashMap<Tile, StaticTile>)> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<(MapDimensions, HashMap<Tile, StaticTile>)> {
        let data: MapDataRon = ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);

        let mut tiles = HashMap::new();
        for y in 0..dimensions.height {
            for x in 0..dimensions.width {
                let tile = Tile::new(x as i32, y as i32);
                tiles.insert(tile, StaticTile::new(TerrainKind::Floor));
            }
        }

        for (x, y, terrain) in data.tiles {
            let tile = Tile::new(x, y);
            if !dimensions.contains(tile) {
                anyhow::bail!(
                    "map tile ({}, {}) lies outside {}x{}",
                    x,
                    y,
                    dimensions.width,
                    dimensions.height
                );
            }
            tiles.insert(tile, StaticTile::new(terrain));
        }

        Ok((dimensions, tiles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_land_on_a_floor_grid() {
        let (dims, tiles) =
            MapLoader::parse("(dimensions: (3, 2), tiles: [(1, 0, Wall)])").unwrap();
        assert_eq!(dims, MapDimensions::new(3, 2));
        assert_eq!(tiles.len(), 6);
        assert!(!tiles[&Tile::new(1, 0)].is_passable());
        assert!(tiles[&Tile::new(2, 1)].is_passable());
    }

    #[test]
    fn out_of_bounds_override_is_an_error() {
        assert!(MapLoader::parse("(dimensions: (2, 2), tiles: [(5, 0, Wall)])").is_err());
    }
}
