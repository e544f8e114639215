use crate::action::SpellAction;
use crate::state::SpellId;
use crate::targeting::LayerMask;

/// How a spell collects its input before the action list runs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellDelivery {
    /// Resolves around a chosen point. A point farther than `max_range`
    /// from the caster is pulled back onto the range circle.
    Area {
        #[cfg_attr(feature = "serde", serde(default))]
        max_range: Option<f32>,
    },
    /// Needs a live caster and an aim (point or target).
    Projectile,
    /// Locks onto a live entity: the given target, else the nearest one on
    /// `layers` within `lock_radius` of the aim point.
    Targeted { lock_radius: f32, layers: LayerMask },
}

/// Shared spell template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellObject {
    pub id: SpellId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub delivery: SpellDelivery,
    pub actions: Vec<SpellAction>,
}

impl SpellObject {
    pub fn new(id: SpellId, delivery: SpellDelivery) -> Self {
        Self {
            id,
            name: String::new(),
            delivery,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_action(mut self, step: SpellAction) -> Self {
        self.actions.push(step);
        self
    }
}
