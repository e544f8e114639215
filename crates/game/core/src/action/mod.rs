//! Action graph.
//!
//! Authored [`ActionObject`] templates describe one step of a cast. At runtime
//! they are built into [`Action`] values (memoized per owner through
//! [`ActionCache`]) and resolved against a [`CombatContext`] with an
//! [`ActionArgs`] packet.
//!
//! Resolution order for a cast:
//! 1. The spell gathers input and produces the args packet.
//! 2. Steps with no delay resolve in authored order.
//! 3. Delayed steps are parked in the scheduler and resolve on a later drain.
//!
//! A failing action is logged and skipped; it never stops the steps after it.

mod args;
mod cache;
mod context;
mod error;
mod kinds;
mod template;

pub use args::ActionArgs;
pub use cache::ActionCache;
pub use context::CombatContext;
pub use error::ActionError;
pub use kinds::{
    Action, ApplyEffectAction, CreateDamageZoneAction, FindTargetsAreaAction, FireProjectileAction,
};
pub use template::{
    ActionKind, ActionObject, AreaStrike, DamageZoneBuilder, ProjectileDescriptor, SpellAction,
};
