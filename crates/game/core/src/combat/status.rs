//! Status-effect template primitives.

use crate::combat::DamageType;

/// Behaviour family of an applied effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Reduces movement speed by `strength` (0..1) while active.
    Slow,
    /// Prevents movement and casting while active.
    Stun,
    /// Deals `damage` split evenly over a fixed number of ticks.
    DamageOverTime,
}

/// What happens when a target already carrying an effect of the same
/// template receives another application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackingPolicy {
    /// The live instance is reset to the template maximum; no new instance.
    Refresh,
    /// A new independent instance is attached.
    Stack,
}

impl EffectKind {
    pub const fn stacking(self) -> StackingPolicy {
        match self {
            Self::Slow | Self::Stun => StackingPolicy::Refresh,
            Self::DamageOverTime => StackingPolicy::Stack,
        }
    }
}

/// Flavour of an effect; decides the damage type a DOT deals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectSchool {
    Magic,
    Curse,
    Bleed,
    Poison,
}

impl EffectSchool {
    pub const fn damage_type(self) -> DamageType {
        match self {
            Self::Magic => DamageType::Magic,
            Self::Curse => DamageType::Curse,
            Self::Bleed => DamageType::Bleed,
            Self::Poison => DamageType::Poison,
        }
    }
}

/// Magnitudes of an effect template.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectArgs {
    /// Total damage a DOT delivers over its lifetime.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: f32,
    /// Slow fraction or other kind-specific strength.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strength: f32,
}

impl EffectArgs {
    pub fn damage(damage: f32) -> Self {
        Self {
            damage,
            strength: 0.0,
        }
    }

    pub fn strength(strength: f32) -> Self {
        Self {
            damage: 0.0,
            strength,
        }
    }
}
