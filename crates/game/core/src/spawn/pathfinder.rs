use std::collections::{HashMap, HashSet, VecDeque};

use crate::env::MapOracle;
use crate::state::Tile;

/// Breadth-first search over a 4-connected tile grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPathfinder;

impl GridPathfinder {
    /// Every passable tile on `map`.
    pub fn passable_tiles(map: &(impl MapOracle + ?Sized)) -> HashSet<Tile> {
        let dims = map.dimensions();
        (0..dims.height as i32)
            .flat_map(|y| (0..dims.width as i32).map(move |x| Tile::new(x, y)))
            .filter(|tile| map.is_passable(*tile))
            .collect()
    }

    /// Shortest path from `start` to `finish`, both included.
    ///
    /// Empty when either end is impassable or no path exists.
    pub fn find_shortest_path(passable: &HashSet<Tile>, start: Tile, finish: Tile) -> Vec<Tile> {
        if !passable.contains(&start) || !passable.contains(&finish) {
            return Vec::new();
        }

        let mut parent: HashMap<Tile, Tile> = HashMap::new();
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(tile) = queue.pop_front() {
            if tile == finish {
                break;
            }
            for next in tile.neighbors() {
                if passable.contains(&next) && visited.insert(next) {
                    parent.insert(next, tile);
                    queue.push_back(next);
                }
            }
        }

        if !visited.contains(&finish) {
            return Vec::new();
        }

        let mut path = vec![finish];
        let mut current = finish;
        while let Some(&previous) = parent.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }

    /// Tiles connected to `origin` through passable tiles, `origin` included.
    pub fn reachable_from(passable: &HashSet<Tile>, origin: Tile) -> HashSet<Tile> {
        if !passable.contains(&origin) {
            return HashSet::new();
        }
        let mut visited = HashSet::from([origin]);
        let mut queue = VecDeque::from([origin]);
        while let Some(tile) = queue.pop_front() {
            for next in tile.neighbors() {
                if passable.contains(&next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}
