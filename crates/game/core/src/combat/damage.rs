//! Damage value objects and crit resolution.

use glam::Vec2;

use crate::env::Dice;
use crate::state::EntityId;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances and damage calculation.
///
/// Different damage types may have different resistance values on targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    /// Physical damage (arrows, boulders, knock-back impacts).
    Physical,
    /// Magic damage (bolts, novas).
    Magic,
    /// Curse damage (hexes, withering).
    Curse,
    /// Bleed damage (lacerations).
    Bleed,
    /// Poison damage (toxins, venom).
    Poison,
    /// True damage (ignores all resistances).
    True,
}

// ============================================================================
// Damage Args (template side)
// ============================================================================

/// Authored description of one damage application.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageArgs {
    pub amount: f32,
    pub damage_type: DamageType,
    /// Probability in `[0, 1]` that the hit is critical.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f32,
    /// Multiplier applied to `amount` on a critical hit.
    #[cfg_attr(feature = "serde", serde(default = "DamageArgs::default_crit_multiplier"))]
    pub crit_multiplier: f32,
}

impl DamageArgs {
    pub const DEFAULT_CRIT_MULTIPLIER: f32 = 2.0;

    /// Creates damage args that can never crit.
    pub fn new(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
            crit_chance: 0.0,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
        }
    }

    /// Builder: enable critical hits.
    pub fn with_crit(mut self, chance: f32, multiplier: f32) -> Self {
        self.crit_chance = chance.clamp(0.0, 1.0);
        self.crit_multiplier = multiplier;
        self
    }

    #[cfg(feature = "serde")]
    fn default_crit_multiplier() -> f32 {
        Self::DEFAULT_CRIT_MULTIPLIER
    }

    /// Rolls crit and produces the concrete damage packet.
    ///
    /// No roll is consumed when `crit_chance` is zero, so crit-free templates do
    /// not shift the dice sequence.
    pub fn roll(&self, source: Option<EntityId>, dice: &mut Dice) -> DamageAction {
        let is_crit = self.crit_chance > 0.0 && dice.chance(self.crit_chance);
        let amount = if is_crit {
            self.amount * self.crit_multiplier
        } else {
            self.amount
        };

        DamageAction {
            amount,
            damage_type: self.damage_type,
            is_crit,
            source,
        }
    }
}

// ============================================================================
// Damage Action (runtime side)
// ============================================================================

/// One resolved damage application handed to `Destructable::take_damage_action`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageAction {
    pub amount: f32,
    pub damage_type: DamageType,
    pub is_crit: bool,
    pub source: Option<EntityId>,
}

impl DamageAction {
    /// Plain, non-critical damage without a source.
    pub fn flat(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
            is_crit: false,
            source: None,
        }
    }

    /// Amount after a resistance in `[0, 1]` is applied. True damage ignores it.
    pub fn mitigated(&self, resistance: f32) -> f32 {
        if self.damage_type == DamageType::True {
            return self.amount;
        }
        (self.amount * (1.0 - resistance.clamp(0.0, 1.0))).max(0.0)
    }
}

// ============================================================================
// Knock-back
// ============================================================================

/// Push applied to every target of an area action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnockBack {
    pub strength: f32,
    pub knock_back_time: f32,
    pub move_lock_time: f32,
}

impl KnockBack {
    /// Unit direction from `origin` toward `target`; +x when they coincide.
    pub fn direction(origin: Vec2, target: Vec2) -> Vec2 {
        (target - origin).try_normalize().unwrap_or(Vec2::X)
    }
}
