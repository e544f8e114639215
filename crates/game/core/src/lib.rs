//! Deterministic combat rules for a tower-defense style game.
//!
//! `combat-core` defines targeting, damage and status-effect primitives, the
//! action graph that spells resolve through, the spell deck and spawn zones.
//! It performs no I/O and owns no entities: everything outside the rules is
//! reached through the collaborator traits in [`env`], and every mutation of
//! a step happens through a [`CombatContext`] built by the owning loop.
pub mod action;
pub mod codex;
pub mod combat;
pub mod config;
pub mod deck;
pub mod effect;
pub mod env;
pub mod error;
pub mod schedule;
pub mod spawn;
pub mod spell;
pub mod state;
pub mod targeting;

#[cfg(test)]
mod testing;

pub use action::{
    Action, ActionArgs, ActionCache, ActionError, ActionKind, ActionObject, AreaStrike,
    CombatContext, DamageZoneBuilder, ProjectileDescriptor, SpellAction,
};
pub use codex::{Codex, CodexError};
pub use combat::{
    DamageAction, DamageArgs, DamageType, EffectArgs, EffectKind, EffectSchool, KnockBack,
    StackingPolicy,
};
pub use config::CombatConfig;
pub use deck::{DeckEvent, SpellDeck};
pub use effect::{
    AppliedEffect, AppliedEffectObject, EffectExpiry, EffectHandle, EffectStore, EffectTick,
    ExpiryReason,
};
pub use env::{
    CollaboratorError, CombatWorld, DamageZoneFactory, DamageZoneSpawn, Destructable, Dice,
    Inventory, MapDimensions, MapOracle, OverlapQuery, PcgRng, ProjectileLaunch, ProjectilePool,
    RngOracle, SpatialQuery, StaticTile, TerrainKind,
};
pub use error::{ErrorSeverity, GameError};
pub use schedule::{DeferredQueue, ScheduledAction, Scheduler};
pub use spawn::{GridPathfinder, SpawnZone, SpawnZoneConfig, Spawner, TileRect};
pub use spell::{CastError, Spell, SpellDelivery, SpellObject};
pub use state::{ActionId, EffectId, EntityId, SimTime, SpellId, TemplateId, Tile};
pub use targeting::{LayerMask, TargetShape, find_targets, find_targets_capped};
