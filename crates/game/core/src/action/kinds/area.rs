use std::sync::Arc;

use crate::action::{ActionArgs, ActionError, AreaStrike, CombatContext};
use crate::codex::Codex;
use crate::combat::KnockBack;
use crate::effect::AppliedEffectObject;
use crate::state::ActionId;
use crate::targeting::find_targets;

/// Queries an area and hits everything inside with damage, knock-back and
/// applied effects.
#[derive(Clone, Debug)]
pub struct FindTargetsAreaAction {
    id: ActionId,
    strike: AreaStrike,
    effects: Vec<Arc<AppliedEffectObject>>,
}

impl FindTargetsAreaAction {
    /// Resolves the effect references up front. A dangling reference makes
    /// the whole action unbuildable.
    pub(crate) fn build(id: ActionId, strike: &AreaStrike, codex: &Codex) -> Option<Self> {
        let mut effects = Vec::with_capacity(strike.effects.len());
        for effect in &strike.effects {
            let Some(template) = codex.effect(*effect) else {
                tracing::warn!(action = %id, %effect, "area action references a missing effect");
                return None;
            };
            effects.push(Arc::clone(template));
        }
        Some(Self {
            id,
            strike: strike.clone(),
            effects,
        })
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn strike(&self) -> &AreaStrike {
        &self.strike
    }

    /// Returns how many live entities were affected.
    pub fn resolve(
        &self,
        args: &ActionArgs,
        ctx: &mut CombatContext<'_>,
    ) -> Result<usize, ActionError> {
        if !self.strike.shape.is_valid() {
            return Err(ActionError::DegenerateShape);
        }
        let origin = args.origin(&*ctx.world).ok_or(ActionError::NoOrigin)?;
        let targets = find_targets(&*ctx.world, origin, self.strike.shape, self.strike.layers);

        let mut affected = 0;
        for target in targets {
            if !ctx.world.is_alive(target) {
                continue;
            }

            if let Some(damage) = &self.strike.damage {
                let hit = damage.roll(args.caster(), ctx.dice);
                if let Some(entity) = ctx.world.destructable_mut(target) {
                    entity.take_damage_action(&hit);
                }
            }

            if let Some(push) = self.strike.knock_back
                && let Some(entity) = ctx.world.destructable_mut(target)
            {
                let direction = KnockBack::direction(origin, entity.position());
                entity.knock_back(
                    direction,
                    push.strength,
                    push.knock_back_time,
                    push.move_lock_time,
                );
            }

            for template in &self.effects {
                ctx.attach_effect(template, args.caster(), target);
            }
            affected += 1;
        }

        tracing::debug!(action = %self.id, %origin, affected, "area resolved");
        Ok(affected)
    }
}
