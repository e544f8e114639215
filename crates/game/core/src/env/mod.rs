//! Traits describing the collaborators around the combat core.
//!
//! The core never owns entity presentation, physics or pooling. It reaches the
//! outside world through these seams: [`CombatWorld`] for entity lookup and
//! overlap queries, [`ProjectilePool`] and [`DamageZoneFactory`] for visible
//! effects, [`MapOracle`] for the static board and [`RngOracle`] for dice.
mod error;
mod inventory;
mod launch;
mod map;
mod rng;
mod world;

pub use error::CollaboratorError;
pub use inventory::Inventory;
pub use launch::{DamageZoneFactory, DamageZoneSpawn, ProjectileLaunch, ProjectilePool};
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
pub use world::{CombatWorld, Destructable, OverlapQuery, SpatialQuery};
