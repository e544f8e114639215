//! Applied effect runtime.
//!
//! An [`AppliedEffect`] is one live instance of an [`AppliedEffectObject`]
//! attached to a single target. Two behaviours exist:
//!
//! - [`DamageOverTimeEffect`]: splits the template damage evenly over
//!   `round(effect_time / frequency)` ticks, firing on-tick actions after
//!   every tick and on-expire actions after the last one.
//! - [`StatusEffect`]: a countdown (slow, stun) that fires on-expire actions
//!   when it reaches zero.
//!
//! Effects never resolve actions themselves. Triggered actions are queued in
//! the scheduler aimed at the target's current position and owned by the
//! effect's handle, so clearing the effect cancels them.

mod instance;
mod store;
mod template;

pub use instance::{AppliedEffect, DamageOverTimeEffect, ExpiryReason, StatusEffect};
pub use store::{EffectExpiry, EffectHandle, EffectStore};
pub use template::AppliedEffectObject;

use crate::codex::Codex;
use crate::env::CombatWorld;
use crate::schedule::Scheduler;
use crate::state::SimTime;

/// What an effect may touch while it ticks.
pub struct EffectTick<'a> {
    pub now: SimTime,
    pub codex: &'a Codex,
    pub world: &'a mut dyn CombatWorld,
    pub scheduler: &'a mut Scheduler,
}
