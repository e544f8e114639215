//! Hand-written collaborator doubles shared by unit tests.

use glam::Vec2;

use crate::action::CombatContext;
use crate::codex::Codex;
use crate::combat::DamageAction;
use crate::effect::{AppliedEffect, EffectStore};
use crate::env::{
    CollaboratorError, CombatWorld, DamageZoneFactory, DamageZoneSpawn, Destructable, Dice,
    OverlapQuery, ProjectileLaunch, ProjectilePool, SpatialQuery,
};
use crate::schedule::Scheduler;
use crate::state::{EntityId, SimTime};
use crate::targeting::LayerMask;

pub(crate) struct Dummy {
    id: EntityId,
    position: Vec2,
    health: f32,
    layer: LayerMask,
    damage: Vec<f32>,
    effects_seen: usize,
    pushes: Vec<Vec2>,
}

impl Destructable for Dummy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn take_damage(&mut self, amount: f32) {
        self.damage.push(amount);
        self.health -= amount;
    }

    fn take_damage_action(&mut self, damage: &DamageAction) {
        self.take_damage(damage.amount);
    }

    fn apply_effect(&mut self, _effect: &AppliedEffect) {
        self.effects_seen += 1;
    }

    fn knock_back(&mut self, direction: Vec2, strength: f32, _: f32, _: f32) {
        self.pushes.push(direction * strength);
    }
}

/// Flat list of dummies; overlap tests bodies as points.
#[derive(Default)]
pub(crate) struct Arena {
    units: Vec<Dummy>,
}

impl Arena {
    pub(crate) fn spawn(&mut self, id: EntityId, position: Vec2, health: f32, layer: LayerMask) {
        self.units.push(Dummy {
            id,
            position,
            health,
            layer,
            damage: Vec::new(),
            effects_seen: 0,
            pushes: Vec::new(),
        });
    }

    fn unit(&self, id: EntityId) -> Option<&Dummy> {
        self.units.iter().find(|unit| unit.id == id)
    }

    fn unit_mut(&mut self, id: EntityId) -> Option<&mut Dummy> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub(crate) fn kill(&mut self, id: EntityId) {
        if let Some(unit) = self.unit_mut(id) {
            unit.health = 0.0;
        }
    }

    pub(crate) fn teleport(&mut self, id: EntityId, position: Vec2) {
        if let Some(unit) = self.unit_mut(id) {
            unit.position = position;
        }
    }

    pub(crate) fn damage_log(&self, id: EntityId) -> Vec<f32> {
        self.unit(id).map(|unit| unit.damage.clone()).unwrap_or_default()
    }

    pub(crate) fn effects_seen(&self, id: EntityId) -> usize {
        self.unit(id).map_or(0, |unit| unit.effects_seen)
    }

    pub(crate) fn pushes(&self, id: EntityId) -> Vec<Vec2> {
        self.unit(id).map(|unit| unit.pushes.clone()).unwrap_or_default()
    }
}

impl SpatialQuery for Arena {
    fn overlap(&self, query: &OverlapQuery) -> Vec<EntityId> {
        let hits = self
            .units
            .iter()
            .filter(|unit| unit.is_alive() && query.layers.intersects(unit.layer))
            .filter(|unit| query.shape.overlaps(query.origin, unit.position, 0.0))
            .map(|unit| unit.id);
        match query.limit {
            Some(limit) => hits.take(limit).collect(),
            None => hits.collect(),
        }
    }
}

impl CombatWorld for Arena {
    fn destructable(&self, id: EntityId) -> Option<&dyn Destructable> {
        self.unit(id).map(|unit| unit as &dyn Destructable)
    }

    fn destructable_mut(&mut self, id: EntityId) -> Option<&mut dyn Destructable> {
        self.unit_mut(id).map(|unit| unit as &mut dyn Destructable)
    }
}

/// Records launches; refuses once `capacity` is reached.
#[derive(Default)]
pub(crate) struct RecordingPool {
    pub(crate) launches: Vec<ProjectileLaunch>,
    pub(crate) capacity: Option<usize>,
}

impl ProjectilePool for RecordingPool {
    fn launch(&mut self, launch: ProjectileLaunch) -> Result<(), CollaboratorError> {
        if let Some(capacity) = self.capacity
            && self.launches.len() >= capacity
        {
            return Err(CollaboratorError::PoolExhausted { capacity });
        }
        self.launches.push(launch);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingZones {
    pub(crate) created: Vec<DamageZoneSpawn>,
}

impl DamageZoneFactory for RecordingZones {
    fn create(&mut self, spawn: DamageZoneSpawn) -> Result<(), CollaboratorError> {
        self.created.push(spawn);
        Ok(())
    }
}

/// Owns one of everything a [`CombatContext`] borrows.
pub(crate) struct Harness {
    pub(crate) arena: Arena,
    pub(crate) codex: Codex,
    pub(crate) effects: EffectStore,
    pub(crate) scheduler: Scheduler,
    pub(crate) pool: RecordingPool,
    pub(crate) zones: RecordingZones,
    pub(crate) dice: Dice,
    pub(crate) now: SimTime,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::default(),
            codex: Codex::new(),
            effects: EffectStore::new(),
            scheduler: Scheduler::new(),
            pool: RecordingPool::default(),
            zones: RecordingZones::default(),
            dice: Dice::new(0x5eed),
            now: SimTime::ZERO,
        }
    }

    pub(crate) fn ctx(&mut self) -> CombatContext<'_> {
        CombatContext {
            now: self.now,
            codex: &self.codex,
            world: &mut self.arena,
            effects: &mut self.effects,
            scheduler: &mut self.scheduler,
            projectiles: &mut self.pool,
            zones: &mut self.zones,
            dice: &mut self.dice,
        }
    }
}
