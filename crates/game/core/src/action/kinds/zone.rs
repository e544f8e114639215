use crate::action::{ActionArgs, ActionError, CombatContext, DamageZoneBuilder};
use crate::env::DamageZoneSpawn;
use crate::state::ActionId;

/// Asks the zone factory for a persistent damage zone at the cast origin.
#[derive(Clone, Debug)]
pub struct CreateDamageZoneAction {
    id: ActionId,
    builder: DamageZoneBuilder,
}

impl CreateDamageZoneAction {
    pub(crate) fn new(id: ActionId, builder: DamageZoneBuilder) -> Self {
        Self { id, builder }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn resolve(
        &self,
        args: &ActionArgs,
        ctx: &mut CombatContext<'_>,
    ) -> Result<usize, ActionError> {
        if !self.builder.shape.is_valid() {
            return Err(ActionError::DegenerateShape);
        }
        let position = args.origin(&*ctx.world).ok_or(ActionError::NoOrigin)?;
        ctx.zones.create(DamageZoneSpawn {
            position,
            caster: args.caster(),
            builder: self.builder.clone(),
        })?;
        tracing::debug!(action = %self.id, %position, prefab = %self.builder.prefab, "damage zone created");
        Ok(1)
    }
}
