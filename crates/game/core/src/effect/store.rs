use std::collections::BTreeMap;

use crate::combat::{EffectKind, StackingPolicy};
use crate::effect::{AppliedEffect, EffectTick, ExpiryReason};
use crate::env::CombatWorld;
use crate::schedule::Scheduler;
use crate::state::{EffectId, EntityId};

/// Stable handle of an effect attached through an [`EffectStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectHandle(pub u64);

/// Record of an effect leaving the store.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectExpiry {
    pub handle: EffectHandle,
    pub effect: EffectId,
    pub target: EntityId,
    pub reason: ExpiryReason,
}

/// Every live effect in the simulation, in attach order.
#[derive(Debug, Default)]
pub struct EffectStore {
    next: u64,
    live: BTreeMap<EffectHandle, AppliedEffect>,
}

impl EffectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `effect` to its target.
    ///
    /// Refresh-policy kinds reuse the live instance of the same template on
    /// the same target and return its handle. Returns `None` when the target
    /// is dead or missing.
    pub fn attach(
        &mut self,
        mut effect: AppliedEffect,
        world: &mut dyn CombatWorld,
    ) -> Option<EffectHandle> {
        let target = effect.bound_target();
        if !world.is_alive(target) {
            tracing::debug!(effect = %effect.id(), %target, "effect not attached, target gone");
            return None;
        }

        if effect.kind().stacking() == StackingPolicy::Refresh
            && let Some((handle, live)) = self.live.iter_mut().find(|(_, live)| {
                !live.is_expired() && live.bound_target() == target && live.id() == effect.id()
            })
        {
            live.refresh();
            if let Some(entity) = world.destructable_mut(target) {
                entity.apply_effect(live);
            }
            tracing::debug!(effect = %live.id(), %target, "effect refreshed");
            return Some(*handle);
        }

        let handle = EffectHandle(self.next);
        self.next += 1;
        effect.bind(handle);
        if let Some(entity) = world.destructable_mut(target) {
            entity.apply_effect(&effect);
        }
        tracing::debug!(
            effect = %effect.id(),
            kind = effect.kind().as_ref(),
            school = effect.template().school.as_ref(),
            %target,
            ?handle,
            "effect attached"
        );
        self.live.insert(handle, effect);
        Some(handle)
    }

    /// Advances every effect and drops the ones that expired.
    pub fn tick(&mut self, dt: f32, ctx: &mut EffectTick<'_>) -> Vec<EffectExpiry> {
        for effect in self.live.values_mut() {
            effect.tick(dt, ctx);
        }

        let mut expired = Vec::new();
        self.live.retain(|handle, effect| match effect.expiry() {
            Some(reason) => {
                tracing::trace!(?handle, reason = reason.as_ref(), "effect dropped");
                expired.push(EffectExpiry {
                    handle: *handle,
                    effect: effect.id(),
                    target: effect.bound_target(),
                    reason,
                });
                false
            }
            None => true,
        });
        expired
    }

    /// Forcibly removes one effect and cancels whatever it still had queued.
    pub fn clear(&mut self, handle: EffectHandle, scheduler: &mut Scheduler) -> Option<EffectExpiry> {
        let mut effect = self.live.remove(&handle)?;
        effect.clear();
        let cancelled = scheduler.cancel_owned_by(handle);
        tracing::debug!(effect = %effect.id(), ?handle, cancelled, "effect cleared");
        Some(EffectExpiry {
            handle,
            effect: effect.id(),
            target: effect.bound_target(),
            reason: ExpiryReason::Cleared,
        })
    }

    /// Clears every effect on `target`. Used when the target dies.
    pub fn clear_target(&mut self, target: EntityId, scheduler: &mut Scheduler) -> Vec<EffectExpiry> {
        let handles: Vec<EffectHandle> = self
            .live
            .iter()
            .filter(|(_, effect)| effect.bound_target() == target)
            .map(|(handle, _)| *handle)
            .collect();
        handles
            .into_iter()
            .filter_map(|handle| self.clear(handle, scheduler))
            .collect()
    }

    pub fn get(&self, handle: EffectHandle) -> Option<&AppliedEffect> {
        self.live.get(&handle)
    }

    /// Live effects on `target`.
    pub fn active_on(&self, target: EntityId) -> impl Iterator<Item = (EffectHandle, &AppliedEffect)> {
        self.live
            .iter()
            .filter(move |(_, effect)| effect.target() == Some(target))
            .map(|(handle, effect)| (*handle, effect))
    }

    pub fn is_stunned(&self, target: EntityId) -> bool {
        self.active_on(target)
            .any(|(_, effect)| effect.kind() == EffectKind::Stun)
    }

    /// Strongest slow on `target`, in `[0, 1]`. Zero means full speed.
    pub fn slow_factor(&self, target: EntityId) -> f32 {
        self.active_on(target)
            .filter_map(|(_, effect)| match effect {
                AppliedEffect::Status(status) if effect.kind() == EffectKind::Slow => {
                    Some(status.strength())
                }
                _ => None,
            })
            .fold(0.0_f32, f32::max)
            .clamp(0.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
