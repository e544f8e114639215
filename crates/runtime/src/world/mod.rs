//! Entity registry backing the combat core's world seams.
//!
//! [`World`] owns every unit on the board, answers overlap queries and
//! creates creeps for spawn zones. Iteration runs in id order so that two
//! runs with the same inputs see the same hit lists.

mod unit;

pub use unit::{Unit, UnitRole};

use std::collections::{BTreeMap, HashMap};

use combat_content::CreepTemplate;
use combat_core::{
    CombatWorld, Destructable, EffectStore, EntityId, OverlapQuery, SpatialQuery, Spawner,
    TemplateId, Tile,
};

#[derive(Debug, Default)]
pub struct World {
    units: BTreeMap<EntityId, Unit>,
    next_id: u32,
    creeps: HashMap<TemplateId, CreepTemplate>,
}

impl World {
    pub fn new(creeps: HashMap<TemplateId, CreepTemplate>) -> Self {
        Self {
            units: BTreeMap::new(),
            next_id: 1,
            creeps,
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn creep_template(&self, template: TemplateId) -> Option<&CreepTemplate> {
        self.creeps.get(&template)
    }

    pub fn spawn_tower(&mut self, tile: Tile) -> EntityId {
        let id = self.allocate();
        self.units.insert(id, Unit::tower(id, tile));
        id
    }

    /// Places a creep of `template` on `tile`. `None` when the template is
    /// unknown.
    pub fn spawn_creep(&mut self, template: TemplateId, tile: Tile) -> Option<EntityId> {
        let Some(stats) = self.creeps.get(&template) else {
            tracing::warn!(%template, %tile, "unknown creep template");
            return None;
        };
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.units.insert(id, Unit::creep(id, stats, tile));
        Some(id)
    }

    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn creep_count(&self) -> usize {
        self.units.values().filter(|unit| unit.is_creep()).count()
    }

    pub fn set_route(&mut self, id: EntityId, route: Vec<Tile>) {
        if let Some(unit) = self.units.get_mut(&id) {
            unit.set_route(route);
        }
    }

    /// Moves every live creep. Stunned creeps stand still; slowed ones walk
    /// at the remaining fraction of their speed. Returns the creeps that
    /// reached the end of their route this step.
    pub fn advance(&mut self, dt: f32, effects: &EffectStore) -> Vec<EntityId> {
        let mut arrived = Vec::new();
        for (id, unit) in &mut self.units {
            if !unit.is_creep() || !unit.is_alive() {
                continue;
            }
            let scale = if effects.is_stunned(*id) {
                0.0
            } else {
                1.0 - effects.slow_factor(*id)
            };
            if unit.walk(dt, scale) {
                arrived.push(*id);
            }
        }
        arrived
    }

    /// Removes and returns every dead unit.
    pub fn take_defeated(&mut self) -> Vec<Unit> {
        let dead: Vec<EntityId> = self
            .units
            .iter()
            .filter(|(_, unit)| !unit.is_alive())
            .map(|(id, _)| *id)
            .collect();
        dead.into_iter()
            .filter_map(|id| self.units.remove(&id))
            .collect()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Unit> {
        self.units.remove(&id)
    }
}

impl SpatialQuery for World {
    fn overlap(&self, query: &OverlapQuery) -> Vec<EntityId> {
        let hits = self
            .units
            .values()
            .filter(|unit| unit.is_alive() && query.layers.intersects(unit.layer()))
            .filter(|unit| query.shape.overlaps(query.origin, unit.position(), unit.radius()))
            .map(|unit| unit.id());
        match query.limit {
            Some(limit) => hits.take(limit).collect(),
            None => hits.collect(),
        }
    }
}

impl CombatWorld for World {
    fn destructable(&self, id: EntityId) -> Option<&dyn Destructable> {
        self.units.get(&id).map(|unit| unit as &dyn Destructable)
    }

    fn destructable_mut(&mut self, id: EntityId) -> Option<&mut dyn Destructable> {
        self.units
            .get_mut(&id)
            .map(|unit| unit as &mut dyn Destructable)
    }
}

impl Spawner for World {
    fn is_occupied(&self, tile: Tile) -> bool {
        self.units
            .values()
            .any(|unit| unit.is_alive() && unit.tile() == tile)
    }

    fn spawn(&mut self, template: TemplateId, tile: Tile) -> Option<EntityId> {
        self.spawn_creep(template, tile)
    }
}
