use std::sync::Arc;

use crate::action::{Action, ActionArgs, ActionError};
use crate::codex::Codex;
use crate::effect::{AppliedEffect, AppliedEffectObject, EffectExpiry, EffectHandle, EffectStore, EffectTick};
use crate::env::{CombatWorld, DamageZoneFactory, Dice, ProjectilePool};
use crate::error::GameError;
use crate::schedule::{ScheduledAction, Scheduler};
use crate::state::{EntityId, SimTime};

/// Everything an action may touch while it resolves.
///
/// Built by the owning loop for one step and dropped afterwards; nothing in
/// here outlives the step.
pub struct CombatContext<'a> {
    pub now: SimTime,
    pub codex: &'a Codex,
    pub world: &'a mut dyn CombatWorld,
    pub effects: &'a mut EffectStore,
    pub scheduler: &'a mut Scheduler,
    pub projectiles: &'a mut dyn ProjectilePool,
    pub zones: &'a mut dyn DamageZoneFactory,
    pub dice: &'a mut Dice,
}

impl CombatContext<'_> {
    /// Attaches a fresh instance of `template` to `target`, honouring the
    /// template's stacking policy.
    pub fn attach_effect(
        &mut self,
        template: &Arc<AppliedEffectObject>,
        caster: Option<EntityId>,
        target: EntityId,
    ) -> Option<EffectHandle> {
        let effect = AppliedEffect::new(Arc::clone(template), caster, target);
        self.effects.attach(effect, &mut *self.world)
    }

    /// Resolves `action` now, or parks it when `delay` is positive.
    pub fn run_or_schedule(&mut self, action: Arc<Action>, args: ActionArgs, delay: f32) {
        if delay > 0.0 {
            self.scheduler.schedule(
                self.now,
                delay,
                ScheduledAction {
                    action,
                    args,
                    owner: None,
                },
            );
            return;
        }
        if let Err(err) = action.resolve(&args, self) {
            report_failure(&action, &args, &err);
        }
    }

    /// Resolves every scheduled action whose time has come, including those
    /// queued while draining. Returns how many resolved without error.
    pub fn drain_ready(&mut self) -> usize {
        let mut resolved = 0;
        while let Some(entry) = self.scheduler.pop_ready(self.now) {
            match entry.action.resolve(&entry.args, self) {
                Ok(_) => resolved += 1,
                Err(err) => report_failure(&entry.action, &entry.args, &err),
            }
        }
        resolved
    }

    /// Advances every live effect by `dt`.
    pub fn tick_effects(&mut self, dt: f32) -> Vec<EffectExpiry> {
        let mut tick = EffectTick {
            now: self.now,
            codex: self.codex,
            world: &mut *self.world,
            scheduler: &mut *self.scheduler,
        };
        self.effects.tick(dt, &mut tick)
    }

    /// Drops every effect on `target` along with anything they queued.
    pub fn clear_effects_on(&mut self, target: EntityId) -> Vec<EffectExpiry> {
        self.effects.clear_target(target, self.scheduler)
    }
}

fn report_failure(action: &Action, args: &ActionArgs, err: &ActionError) {
    // Targets dying mid-flight are routine; only bad data is worth a warning.
    if err.severity().is_recoverable() {
        tracing::debug!(
            action = %action.id(),
            kind = action.kind_name(),
            caster = ?args.caster(),
            target = ?args.target(),
            code = err.error_code(),
            "action skipped: {err}"
        );
    } else {
        tracing::warn!(
            action = %action.id(),
            kind = action.kind_name(),
            caster = ?args.caster(),
            target = ?args.target(),
            code = err.error_code(),
            severity = err.severity().as_str(),
            "action failed: {err}"
        );
    }
}
