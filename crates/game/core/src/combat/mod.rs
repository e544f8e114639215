//! Damage and status-effect primitives.
//!
//! These are the value objects actions hand to targets: a [`DamageAction`]
//! is one resolved hit, [`EffectArgs`]/[`EffectKind`]/[`EffectSchool`] describe
//! the shape of a status effect template.

pub mod damage;
pub mod status;

pub use damage::{DamageAction, DamageArgs, DamageType, KnockBack};
pub use status::{EffectArgs, EffectKind, EffectSchool, StackingPolicy};
