//! Bounded projectile pool.
//!
//! Launches fly in a straight line. A projectile stops at the first live
//! entity it overlaps (the caster excluded) or once it has covered its
//! `max_range`. Impacts are handed back to the caller, who resolves the
//! on-hit actions with a fresh combat context.

use combat_core::{
    ActionArgs, CollaboratorError, EntityId, ProjectileLaunch, ProjectilePool, SpellAction,
    TargetShape, find_targets,
};
use glam::Vec2;

use crate::world::World;

#[derive(Clone, Debug)]
struct Projectile {
    position: Vec2,
    launch: ProjectileLaunch,
    travelled: f32,
}

/// A projectile that struck `target` at `position`.
#[derive(Clone, Debug, PartialEq)]
pub struct Impact {
    pub position: Vec2,
    pub target: EntityId,
    pub on_hit: Vec<SpellAction>,
    /// Launch arguments retargeted at the struck entity and aimed at the impact point.
    pub args: ActionArgs,
}

#[derive(Debug)]
pub struct ProjectileSystem {
    capacity: usize,
    live: Vec<Projectile>,
}

impl ProjectileSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            live: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Moves every projectile by `dt` and collects the impacts.
    ///
    /// Movement is swept in sub-steps no longer than the projectile radius
    /// so fast projectiles cannot tunnel through small bodies.
    pub fn advance(&mut self, dt: f32, world: &World) -> Vec<Impact> {
        let mut impacts = Vec::new();
        self.live.retain_mut(|projectile| {
            let descriptor = &projectile.launch.descriptor;
            let mut remaining = descriptor.speed * dt;
            let step_len = descriptor.radius.max(0.05);
            let shape = TargetShape::circle(descriptor.radius);
            let caster = projectile.launch.args.caster();

            while remaining > 0.0 {
                let step = remaining.min(step_len);
                projectile.position += projectile.launch.direction * step;
                projectile.travelled += step;
                remaining -= step;

                let hit = find_targets(world, projectile.position, shape, descriptor.layers)
                    .into_iter()
                    .find(|id| Some(*id) != caster);
                if let Some(target) = hit {
                    impacts.push(Impact {
                        position: projectile.position,
                        target,
                        on_hit: descriptor.on_hit.clone(),
                        args: projectile
                            .launch
                            .args
                            .clone()
                            .with_target(target)
                            .aimed_at(projectile.position),
                    });
                    return false;
                }
                if projectile.travelled >= descriptor.max_range {
                    tracing::trace!("projectile spent without a hit");
                    return false;
                }
            }
            true
        });
        impacts
    }
}

impl ProjectilePool for ProjectileSystem {
    fn launch(&mut self, launch: ProjectileLaunch) -> Result<(), CollaboratorError> {
        if self.live.len() >= self.capacity {
            return Err(CollaboratorError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        self.live.push(Projectile {
            position: launch.origin,
            launch,
            travelled: 0.0,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use combat_content::CreepTemplate;
    use combat_core::{ActionId, LayerMask, ProjectileDescriptor, TemplateId, Tile};

    fn arrow() -> ProjectileDescriptor {
        ProjectileDescriptor {
            speed: 10.0,
            radius: 0.2,
            max_range: 6.0,
            layers: LayerMask::ENEMY,
            on_hit: vec![SpellAction::immediate(ActionId(4))],
        }
    }

    fn lane() -> World {
        let grunt = CreepTemplate::new(TemplateId(1), "grunt", 20.0, 1.0);
        World::new(HashMap::from([(grunt.id, grunt)]))
    }

    fn launch_east(pool: &mut ProjectileSystem, caster: EntityId) -> Result<(), CollaboratorError> {
        pool.launch(ProjectileLaunch {
            origin: Tile::new(0, 0).center(),
            direction: Vec2::X,
            descriptor: arrow(),
            args: ActionArgs::from_caster(caster),
        })
    }

    #[test]
    fn launches_past_capacity_are_refused() {
        let mut pool = ProjectileSystem::new(1);
        assert!(launch_east(&mut pool, EntityId(1)).is_ok());
        assert_eq!(
            launch_east(&mut pool, EntityId(1)),
            Err(CollaboratorError::PoolExhausted { capacity: 1 })
        );
    }

    #[test]
    fn first_overlap_produces_an_impact() {
        let mut world = lane();
        let tower = world.spawn_tower(Tile::new(0, 0));
        let creep = world.spawn_creep(TemplateId(1), Tile::new(3, 0)).unwrap();
        let mut pool = ProjectileSystem::new(4);
        launch_east(&mut pool, tower).unwrap();

        assert!(pool.advance(0.1, &world).is_empty());
        let impacts = pool.advance(0.2, &world);
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].target, creep);
        assert_eq!(impacts[0].args.target(), Some(creep));
        assert_eq!(impacts[0].args.caster(), Some(tower));
        assert!(pool.is_empty());
    }

    #[test]
    fn spent_projectiles_vanish() {
        let world = lane();
        let mut pool = ProjectileSystem::new(4);
        launch_east(&mut pool, EntityId(1)).unwrap();

        assert!(pool.advance(1.0, &world).is_empty());
        assert!(pool.is_empty());
    }
}
