//! Enemy spawning: timed batches on precomputed valid tiles, and the grid
//! pathfinder used to validate those tiles and route spawned enemies.

mod pathfinder;
mod zone;

pub use pathfinder::GridPathfinder;
pub use zone::{SpawnZone, SpawnZoneConfig, Spawner, TileRect};
