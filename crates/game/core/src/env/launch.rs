use glam::Vec2;

use crate::action::{ActionArgs, DamageZoneBuilder, ProjectileDescriptor};
use crate::env::CollaboratorError;
use crate::state::EntityId;

/// Everything a pooled projectile needs to fly and to re-enter the action
/// graph when it hits something.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileLaunch {
    pub origin: Vec2,
    /// Unit direction of travel.
    pub direction: Vec2,
    pub descriptor: ProjectileDescriptor,
    /// Cast context carried to the on-hit actions.
    pub args: ActionArgs,
}

/// External projectile pool.
pub trait ProjectilePool {
    fn launch(&mut self, launch: ProjectileLaunch) -> Result<(), CollaboratorError>;
}

/// Request to materialise a persistent damage zone.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageZoneSpawn {
    pub position: Vec2,
    pub caster: Option<EntityId>,
    pub builder: DamageZoneBuilder,
}

/// External damage-zone factory. The zone's own ticking happens on its side.
pub trait DamageZoneFactory {
    fn create(&mut self, spawn: DamageZoneSpawn) -> Result<(), CollaboratorError>;
}
