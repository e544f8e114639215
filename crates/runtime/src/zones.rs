//! Persistent damage zones.

use std::collections::BTreeSet;

use combat_core::{
    CollaboratorError, CombatWorld, DamageZoneBuilder, DamageZoneFactory, DamageZoneSpawn, Dice,
    EntityId, find_targets,
};
use glam::Vec2;

#[derive(Clone, Debug)]
struct DamageZone {
    position: Vec2,
    caster: Option<EntityId>,
    builder: DamageZoneBuilder,
    cooldown: f32,
    remaining: f32,
}

/// Factory and ticker for damage zones. Only registered prefabs can be
/// instantiated.
#[derive(Debug, Default)]
pub struct DamageZoneSystem {
    prefabs: BTreeSet<String>,
    live: Vec<DamageZone>,
}

impl DamageZoneSystem {
    pub fn new(prefabs: impl IntoIterator<Item = String>) -> Self {
        Self {
            prefabs: prefabs.into_iter().collect(),
            live: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Advances every zone by `dt`. A zone deals its tick damage on
    /// creation and then every `tick_interval` seconds until its lifetime
    /// runs out. Returns the number of hits dealt.
    pub fn tick(&mut self, dt: f32, world: &mut dyn CombatWorld, dice: &mut Dice) -> usize {
        let mut hits = 0;
        for zone in &mut self.live {
            zone.remaining -= dt;
            zone.cooldown -= dt;
            while zone.cooldown <= 0.0 && zone.remaining > 0.0 {
                let builder = &zone.builder;
                let targets = find_targets(&*world, zone.position, builder.shape, builder.layers);
                for target in targets {
                    let damage = builder.tick_damage.roll(zone.caster, dice);
                    if let Some(entity) = world.destructable_mut(target) {
                        entity.take_damage_action(&damage);
                        hits += 1;
                    }
                }
                if builder.tick_interval <= 0.0 {
                    zone.cooldown = f32::INFINITY;
                } else {
                    zone.cooldown += builder.tick_interval;
                }
            }
        }
        self.live.retain(|zone| zone.remaining > 0.0);
        hits
    }
}

impl DamageZoneFactory for DamageZoneSystem {
    fn create(&mut self, spawn: DamageZoneSpawn) -> Result<(), CollaboratorError> {
        if !self.prefabs.contains(&spawn.builder.prefab) {
            return Err(CollaboratorError::PrefabMissing(spawn.builder.prefab));
        }
        tracing::debug!(
            prefab = %spawn.builder.prefab,
            x = spawn.position.x,
            y = spawn.position.y,
            "damage zone created"
        );
        self.live.push(DamageZone {
            position: spawn.position,
            caster: spawn.caster,
            remaining: spawn.builder.duration,
            cooldown: 0.0,
            builder: spawn.builder,
        });
        Ok(())
    }
}
