//! Authored action templates.
//!
//! Templates are loaded once, shared behind `Arc` and never mutated. Runtime
//! [`Action`](super::Action) instances are built from them on demand.

use crate::combat::{DamageArgs, KnockBack};
use crate::state::{ActionId, EffectId};
use crate::targeting::{LayerMask, TargetShape};

/// One step of a cast: which action to run and how long to wait first.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellAction {
    pub action: ActionId,
    /// Seconds to wait before resolving. Zero or less resolves immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay: f32,
}

impl SpellAction {
    pub fn immediate(action: ActionId) -> Self {
        Self { action, delay: 0.0 }
    }

    pub fn delayed(action: ActionId, delay: f32) -> Self {
        Self { action, delay }
    }
}

/// Shared action template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionObject {
    pub id: ActionId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: ActionKind,
}

impl ActionObject {
    pub fn new(id: ActionId, kind: ActionKind) -> Self {
        Self {
            id,
            name: String::new(),
            kind,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Tagged payload of an action template.
///
/// `Custom` carries a tag no runtime action knows how to build. Such
/// templates load fine and produce no action at construction time.
#[derive(Clone, Debug, PartialEq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    FindTargetsArea(AreaStrike),
    FireProjectile(ProjectileDescriptor),
    CreateDamageZone(DamageZoneBuilder),
    ApplyEffect { effect: EffectId },
    Custom(u16),
}

/// Area query plus what happens to everything it finds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaStrike {
    pub shape: TargetShape,
    pub layers: LayerMask,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<DamageArgs>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub knock_back: Option<KnockBack>,
}

impl AreaStrike {
    pub fn new(shape: TargetShape, layers: LayerMask) -> Self {
        Self {
            shape,
            layers,
            damage: None,
            effects: Vec::new(),
            knock_back: None,
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: DamageArgs) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectId) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_knock_back(mut self, knock_back: KnockBack) -> Self {
        self.knock_back = Some(knock_back);
        self
    }
}

/// Flight parameters handed to the projectile pool.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileDescriptor {
    /// World units per second.
    pub speed: f32,
    /// Collision radius.
    pub radius: f32,
    /// Distance after which the projectile despawns without hitting.
    pub max_range: f32,
    pub layers: LayerMask,
    /// Actions resolved at the impact point, with the hit entity as target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Vec<SpellAction>,
}

/// Parameters for a persistent damage zone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageZoneBuilder {
    /// Presentation prefab the factory instantiates.
    pub prefab: String,
    pub shape: TargetShape,
    pub layers: LayerMask,
    pub tick_damage: DamageArgs,
    /// Seconds between damage ticks.
    pub tick_interval: f32,
    /// Zone lifetime in seconds.
    pub duration: f32,
}
