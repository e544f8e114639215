use std::collections::{BTreeSet, HashSet};

use crate::env::{Dice, MapOracle};
use crate::spawn::GridPathfinder;
use crate::state::{EntityId, TemplateId, Tile};

/// Inclusive tile rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRect {
    pub min: Tile,
    pub max: Tile,
}

impl TileRect {
    pub fn new(min: Tile, max: Tile) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        (self.min.x..=self.max.x).contains(&tile.x) && (self.min.y..=self.max.y).contains(&tile.y)
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Tile::new(x, y)))
    }
}

/// Authored spawn zone settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnZoneConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub area: TileRect,
    pub template: TemplateId,
    pub max_active_spawns: usize,
    /// Inclusive batch size range.
    pub spawn_amount: (u32, u32),
    /// Seconds between batches, rolled uniformly after every batch.
    pub spawn_interval: (f32, f32),
    /// Tiles with no path to this goal are never spawned on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub goal: Option<Tile>,
}

/// Creates entities on behalf of a spawn zone.
pub trait Spawner {
    fn is_occupied(&self, tile: Tile) -> bool;

    /// Returns `None` when the entity could not be created.
    fn spawn(&mut self, template: TemplateId, tile: Tile) -> Option<EntityId>;
}

/// Region that periodically spawns batches of one enemy template, up to a
/// cap on live spawns.
#[derive(Debug)]
pub struct SpawnZone {
    config: SpawnZoneConfig,
    passable: HashSet<Tile>,
    valid_tiles: Vec<Tile>,
    active: BTreeSet<EntityId>,
    timer: f32,
    dice: Dice,
}

impl SpawnZone {
    /// Precomputes the valid tiles and rolls the first timer.
    pub fn new(config: SpawnZoneConfig, map: &(impl MapOracle + ?Sized), dice: Dice) -> Self {
        let passable = GridPathfinder::passable_tiles(map);
        let reachable = config
            .goal
            .map(|goal| GridPathfinder::reachable_from(&passable, goal));

        let valid_tiles: Vec<Tile> = config
            .area
            .tiles()
            .filter(|tile| passable.contains(tile))
            .filter(|tile| reachable.as_ref().is_none_or(|region| region.contains(tile)))
            .collect();

        if valid_tiles.is_empty() {
            tracing::warn!(zone = %config.name, "spawn zone has no valid tiles");
        }

        let mut zone = Self {
            config,
            passable,
            valid_tiles,
            active: BTreeSet::new(),
            timer: 0.0,
            dice,
        };
        zone.timer = zone.roll_interval();
        zone
    }

    pub fn config(&self) -> &SpawnZoneConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn valid_tiles(&self) -> &[Tile] {
        &self.valid_tiles
    }

    pub fn active_spawns(&self) -> usize {
        self.active.len()
    }

    pub fn is_tracking(&self, id: EntityId) -> bool {
        self.active.contains(&id)
    }

    /// Seconds until the next batch.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Counts the timer down; when it runs out, spawns a batch if below the
    /// cap and rolls a fresh timer. Returns the entities spawned.
    pub fn tick(&mut self, dt: f32, spawner: &mut dyn Spawner) -> Vec<EntityId> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return Vec::new();
        }
        let spawned = if self.active.len() < self.config.max_active_spawns {
            self.spawn(spawner)
        } else {
            tracing::trace!(zone = %self.config.name, "spawn zone at capacity");
            Vec::new()
        };
        self.timer = self.roll_interval();
        spawned
    }

    /// Spawns one batch now.
    ///
    /// The batch size is rolled from the configured range and clamped so the
    /// live count never exceeds the cap. Each attempt picks a uniform random
    /// valid tile; an occupied tile or a refused spawn skips that attempt only.
    pub fn spawn(&mut self, spawner: &mut dyn Spawner) -> Vec<EntityId> {
        let (lo, hi) = self.config.spawn_amount;
        let rolled = self.dice.range(lo.min(hi), lo.max(hi)) as usize;
        let room = self
            .config
            .max_active_spawns
            .saturating_sub(self.active.len());
        let batch = rolled.min(room);

        let mut spawned = Vec::with_capacity(batch);
        for _ in 0..batch {
            let Some(index) = self.dice.index(self.valid_tiles.len()) else {
                break;
            };
            let tile = self.valid_tiles[index];
            if spawner.is_occupied(tile) {
                tracing::trace!(zone = %self.config.name, %tile, "spawn tile occupied");
                continue;
            }
            if let Some(id) = spawner.spawn(self.config.template, tile) {
                self.active.insert(id);
                spawned.push(id);
            }
        }

        tracing::debug!(
            zone = %self.config.name,
            rolled,
            spawned = spawned.len(),
            active = self.active.len(),
            "spawn batch"
        );
        spawned
    }

    /// Stops tracking a defeated entity. False if this zone never spawned it
    /// or already released it.
    pub fn on_defeated(&mut self, id: EntityId) -> bool {
        self.active.remove(&id)
    }

    /// Walking route from `from` to the zone's goal; empty without a goal or
    /// when unreachable.
    pub fn path_to_goal(&self, from: Tile) -> Vec<Tile> {
        match self.config.goal {
            Some(goal) => GridPathfinder::find_shortest_path(&self.passable, from, goal),
            None => Vec::new(),
        }
    }

    fn roll_interval(&mut self) -> f32 {
        let (lo, hi) = self.config.spawn_interval;
        self.dice.range_f32(lo.min(hi), lo.max(hi))
    }
}
