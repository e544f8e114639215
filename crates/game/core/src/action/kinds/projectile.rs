use glam::Vec2;

use crate::action::{ActionArgs, ActionError, CombatContext, ProjectileDescriptor};
use crate::env::ProjectileLaunch;
use crate::state::ActionId;

/// Hands a projectile to the pool, flying from the caster toward the aim.
#[derive(Clone, Debug)]
pub struct FireProjectileAction {
    id: ActionId,
    descriptor: ProjectileDescriptor,
}

impl FireProjectileAction {
    pub(crate) fn new(id: ActionId, descriptor: ProjectileDescriptor) -> Self {
        Self { id, descriptor }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn descriptor(&self) -> &ProjectileDescriptor {
        &self.descriptor
    }

    pub fn resolve(
        &self,
        args: &ActionArgs,
        ctx: &mut CombatContext<'_>,
    ) -> Result<usize, ActionError> {
        let caster = args.caster().ok_or(ActionError::CasterMissing)?;
        let origin = ctx
            .world
            .position_of(caster)
            .ok_or(ActionError::CasterMissing)?;

        let aim = args
            .first_point()
            .or_else(|| args.target().and_then(|id| ctx.world.position_of(id)));
        let direction = aim
            .and_then(|point| (point - origin).try_normalize())
            .unwrap_or(Vec2::X);

        ctx.projectiles.launch(ProjectileLaunch {
            origin,
            direction,
            descriptor: self.descriptor.clone(),
            args: args.clone(),
        })?;

        tracing::debug!(action = %self.id, %origin, %direction, "projectile launched");
        Ok(1)
    }
}
