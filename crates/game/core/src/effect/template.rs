use crate::action::SpellAction;
use crate::combat::{EffectArgs, EffectKind, EffectSchool};
use crate::state::EffectId;

/// Shared applied-effect template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffectObject {
    pub id: EffectId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub kind: EffectKind,
    pub school: EffectSchool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: EffectArgs,
    /// Total lifetime in seconds.
    pub effect_time: f32,
    /// Seconds between DOT ticks. Ignored by status effects.
    #[cfg_attr(feature = "serde", serde(default))]
    pub frequency: f32,
    /// Resolved at the target's position every time a DOT ticks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_tick: Vec<SpellAction>,
    /// Resolved at the target's position when the effect runs out naturally.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_expire: Vec<SpellAction>,
}

impl AppliedEffectObject {
    /// Damage-over-time template dealing `damage` in total.
    pub fn dot(id: EffectId, school: EffectSchool, damage: f32, effect_time: f32, frequency: f32) -> Self {
        Self {
            id,
            name: String::new(),
            kind: EffectKind::DamageOverTime,
            school,
            args: EffectArgs::damage(damage),
            effect_time,
            frequency,
            on_tick: Vec::new(),
            on_expire: Vec::new(),
        }
    }

    /// Slow or stun template.
    pub fn status(id: EffectId, kind: EffectKind, effect_time: f32, strength: f32) -> Self {
        Self {
            id,
            name: String::new(),
            kind,
            school: EffectSchool::Magic,
            args: EffectArgs::strength(strength),
            effect_time,
            frequency: 0.0,
            on_tick: Vec::new(),
            on_expire: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_on_tick(mut self, step: SpellAction) -> Self {
        self.on_tick.push(step);
        self
    }

    #[must_use]
    pub fn with_on_expire(mut self, step: SpellAction) -> Self {
        self.on_expire.push(step);
        self
    }

    /// Number of DOT ticks: `round(effect_time / frequency)`, at least one.
    pub fn tick_count(&self) -> u32 {
        if self.frequency <= 0.0 || self.effect_time <= 0.0 {
            return 1;
        }
        ((self.effect_time / self.frequency).round() as u32).max(1)
    }

    pub fn damage_per_tick(&self) -> f32 {
        self.args.damage / self.tick_count() as f32
    }
}
