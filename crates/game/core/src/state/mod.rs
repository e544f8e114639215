//! Identifiers and time primitives shared by every combat module.
//!
//! Templates are addressed by typed ids ([`ActionId`], [`EffectId`],
//! [`SpellId`]) so that authored data can reference each other without
//! owning pointers, while live entities are addressed by [`EntityId`].
mod ids;
mod time;

pub use ids::{ActionId, EffectId, EntityId, SpellId, TemplateId, Tile};
pub use time::SimTime;
