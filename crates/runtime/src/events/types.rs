//! Event types for different topics.

use combat_core::{DeckEvent, EffectExpiry, EntityId, SimTime, SpellId, Tile};
use serde::Serialize;

/// Spells, hits and deaths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CombatEvent {
    /// A hand card was cast and cycled back into the queue.
    SpellCast {
        caster: Option<EntityId>,
        spell: SpellId,
        slot: usize,
        /// Action steps run now or scheduled.
        steps: usize,
        at: SimTime,
    },

    /// Input gathering refused the cast; nothing ran.
    CastRefused {
        caster: Option<EntityId>,
        spell: SpellId,
        code: &'static str,
        at: SimTime,
    },

    /// A projectile struck an entity.
    ProjectileHit { target: EntityId, at: SimTime },

    /// An effect left the store.
    EffectEnded { expiry: EffectExpiry, at: SimTime },

    /// A unit's health reached zero and it left the board.
    UnitDefeated {
        unit: EntityId,
        bounty: u32,
        at: SimTime,
    },
}

/// Creeps entering and leaving the lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SpawnEvent {
    Spawned {
        zone: String,
        unit: EntityId,
        tile: Tile,
        at: SimTime,
    },

    /// A creep walked its whole route and left the board.
    ReachedGoal { unit: EntityId, at: SimTime },
}

/// Deck changes, forwarded from [`combat_core::SpellDeck::take_events`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckChange {
    pub event: DeckEvent,
    pub at: SimTime,
}
