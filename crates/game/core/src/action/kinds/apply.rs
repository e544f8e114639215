use std::sync::Arc;

use crate::action::{ActionArgs, ActionError, CombatContext};
use crate::effect::AppliedEffectObject;
use crate::state::ActionId;

/// Attaches one applied effect to the args' target entity.
#[derive(Clone, Debug)]
pub struct ApplyEffectAction {
    id: ActionId,
    effect: Arc<AppliedEffectObject>,
}

impl ApplyEffectAction {
    pub(crate) fn new(id: ActionId, effect: Arc<AppliedEffectObject>) -> Self {
        Self { id, effect }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn effect(&self) -> &Arc<AppliedEffectObject> {
        &self.effect
    }

    pub fn resolve(
        &self,
        args: &ActionArgs,
        ctx: &mut CombatContext<'_>,
    ) -> Result<usize, ActionError> {
        let target = args.target().ok_or(ActionError::NoTarget)?;
        if !ctx.world.is_alive(target) {
            return Err(ActionError::TargetGone(target));
        }
        ctx.attach_effect(&self.effect, args.caster(), target)
            .ok_or(ActionError::TargetGone(target))?;
        Ok(1)
    }
}
