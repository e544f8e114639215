use std::sync::Arc;

use crate::action::{ActionArgs, ActionCache, SpellAction};
use crate::combat::{DamageAction, EffectKind};
use crate::effect::{AppliedEffectObject, EffectHandle, EffectTick};
use crate::schedule::ScheduledAction;
use crate::state::{EffectId, EntityId};

/// Why an effect stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ExpiryReason {
    /// Ran its full duration; on-expire actions were queued.
    Elapsed,
    /// The target died or despawned first.
    TargetLost,
    /// Removed from outside, e.g. on target death.
    Cleared,
}

#[derive(Clone, Copy)]
enum Trigger {
    Tick,
    Expire,
}

/// State shared by every effect variant.
#[derive(Clone, Debug)]
struct EffectCore {
    template: Arc<AppliedEffectObject>,
    caster: Option<EntityId>,
    target: EntityId,
    handle: Option<EffectHandle>,
    expired: Option<ExpiryReason>,
    cache: ActionCache,
}

impl EffectCore {
    fn new(template: Arc<AppliedEffectObject>, caster: Option<EntityId>, target: EntityId) -> Self {
        Self {
            template,
            caster,
            target,
            handle: None,
            expired: None,
            cache: ActionCache::new(),
        }
    }

    /// The target, if this effect is still running and the target lives.
    /// Otherwise marks the effect as having lost its target.
    fn live_target(&mut self, ctx: &EffectTick<'_>) -> Option<EntityId> {
        if self.expired.is_some() {
            return None;
        }
        if ctx.world.is_alive(self.target) {
            return Some(self.target);
        }
        tracing::debug!(effect = %self.template.id, target = %self.target, "effect target lost");
        self.expired = Some(ExpiryReason::TargetLost);
        None
    }

    /// Queues the trigger's actions at the target's current position.
    fn queue(&mut self, trigger: Trigger, ctx: &mut EffectTick<'_>) {
        let template = Arc::clone(&self.template);
        let steps: &[SpellAction] = match trigger {
            Trigger::Tick => &template.on_tick,
            Trigger::Expire => &template.on_expire,
        };
        if steps.is_empty() {
            return;
        }
        let Some(position) = ctx.world.position_of(self.target) else {
            return;
        };
        let args = ActionArgs::new(self.caster)
            .with_target(self.target)
            .aimed_at(position);

        for step in steps {
            let Some(action) = self.cache.get_or_build(step.action, ctx.codex) else {
                continue;
            };
            ctx.scheduler.schedule(
                ctx.now,
                step.delay,
                ScheduledAction {
                    action,
                    args: args.clone(),
                    owner: self.handle,
                },
            );
        }
    }

    fn elapse(&mut self, ctx: &mut EffectTick<'_>) {
        self.queue(Trigger::Expire, ctx);
        self.expired = Some(ExpiryReason::Elapsed);
        tracing::debug!(effect = %self.template.id, target = %self.target, "effect expired");
    }
}

/// Damage split evenly over a fixed number of ticks.
#[derive(Clone, Debug)]
pub struct DamageOverTimeEffect {
    core: EffectCore,
    ticks: u32,
    ticks_left: u32,
    damage_per_tick: f32,
    cooldown: f32,
}

impl DamageOverTimeEffect {
    fn new(core: EffectCore) -> Self {
        let ticks = core.template.tick_count();
        let damage_per_tick = core.template.damage_per_tick();
        let cooldown = core.template.frequency;
        Self {
            core,
            ticks,
            ticks_left: ticks,
            damage_per_tick,
            cooldown,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    pub fn damage_per_tick(&self) -> f32 {
        self.damage_per_tick
    }

    fn tick(&mut self, dt: f32, ctx: &mut EffectTick<'_>) {
        let Some(target) = self.core.live_target(ctx) else {
            return;
        };

        self.cooldown -= dt;
        while self.cooldown <= 0.0 && self.ticks_left > 0 {
            let hit = DamageAction {
                amount: self.damage_per_tick,
                damage_type: self.core.template.school.damage_type(),
                is_crit: false,
                source: self.core.caster,
            };
            if let Some(entity) = ctx.world.destructable_mut(target) {
                entity.take_damage_action(&hit);
            }
            self.ticks_left -= 1;
            self.cooldown += self.core.template.frequency;
            self.core.queue(Trigger::Tick, ctx);

            if self.ticks_left == 0 {
                self.core.elapse(ctx);
                break;
            }
            if self.core.live_target(ctx).is_none() {
                break;
            }
        }
    }

    fn refresh(&mut self) {
        self.ticks_left = self.ticks;
        self.cooldown = self.core.template.frequency;
    }
}

/// Slow or stun: a timer with on-expire actions.
#[derive(Clone, Debug)]
pub struct StatusEffect {
    core: EffectCore,
    time_left: f32,
}

impl StatusEffect {
    fn new(core: EffectCore) -> Self {
        let time_left = core.template.effect_time;
        Self { core, time_left }
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn strength(&self) -> f32 {
        self.core.template.args.strength
    }

    fn tick(&mut self, dt: f32, ctx: &mut EffectTick<'_>) {
        if self.core.live_target(ctx).is_none() {
            return;
        }
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.core.elapse(ctx);
        }
    }

    fn refresh(&mut self) {
        self.time_left = self.core.template.effect_time;
    }
}

/// A live effect attached to one target.
#[derive(Clone, Debug)]
pub enum AppliedEffect {
    DamageOverTime(DamageOverTimeEffect),
    Status(StatusEffect),
}

impl AppliedEffect {
    pub fn new(template: Arc<AppliedEffectObject>, caster: Option<EntityId>, target: EntityId) -> Self {
        let kind = template.kind;
        let core = EffectCore::new(template, caster, target);
        match kind {
            EffectKind::DamageOverTime => Self::DamageOverTime(DamageOverTimeEffect::new(core)),
            EffectKind::Slow | EffectKind::Stun => Self::Status(StatusEffect::new(core)),
        }
    }

    fn core(&self) -> &EffectCore {
        match self {
            Self::DamageOverTime(effect) => &effect.core,
            Self::Status(effect) => &effect.core,
        }
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        match self {
            Self::DamageOverTime(effect) => &mut effect.core,
            Self::Status(effect) => &mut effect.core,
        }
    }

    /// Advances the effect. A no-op once expired.
    pub fn tick(&mut self, dt: f32, ctx: &mut EffectTick<'_>) {
        match self {
            Self::DamageOverTime(effect) => effect.tick(dt, ctx),
            Self::Status(effect) => effect.tick(dt, ctx),
        }
    }

    /// Resets remaining time or ticks to the template maximum and revives an
    /// expired effect. Template and target stay as they were.
    pub fn refresh(&mut self) {
        match self {
            Self::DamageOverTime(effect) => effect.refresh(),
            Self::Status(effect) => effect.refresh(),
        }
        self.core_mut().expired = None;
    }

    /// Expires the effect without running on-expire actions.
    pub fn clear(&mut self) {
        let core = self.core_mut();
        if core.expired.is_none() {
            core.expired = Some(ExpiryReason::Cleared);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.core().expired.is_some()
    }

    pub fn expiry(&self) -> Option<ExpiryReason> {
        self.core().expired
    }

    pub fn template(&self) -> &Arc<AppliedEffectObject> {
        &self.core().template
    }

    pub fn id(&self) -> EffectId {
        self.core().template.id
    }

    pub fn kind(&self) -> EffectKind {
        self.core().template.kind
    }

    pub fn caster(&self) -> Option<EntityId> {
        self.core().caster
    }

    /// The target while the effect runs. `None` once expired.
    pub fn target(&self) -> Option<EntityId> {
        let core = self.core();
        core.expired.is_none().then_some(core.target)
    }

    pub(crate) fn bound_target(&self) -> EntityId {
        self.core().target
    }

    pub fn handle(&self) -> Option<EffectHandle> {
        self.core().handle
    }

    pub(crate) fn bind(&mut self, handle: EffectHandle) {
        self.core_mut().handle = Some(handle);
    }
}
