//! Enemy templates handed to spawners.

use combat_core::{DamageType, LayerMask, TemplateId};

/// Flat resistance against one damage type, in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistance {
    pub damage_type: DamageType,
    pub value: f32,
}

/// Stats of one enemy kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreepTemplate {
    pub id: TemplateId,
    pub name: String,
    pub health: f32,
    /// Tiles per second along the path.
    pub speed: f32,
    /// Body radius used by overlap queries.
    #[cfg_attr(feature = "serde", serde(default = "CreepTemplate::default_radius"))]
    pub radius: f32,
    /// Currency awarded on defeat.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounty: u32,
    #[cfg_attr(feature = "serde", serde(default = "CreepTemplate::default_layer"))]
    pub layer: LayerMask,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Vec<Resistance>,
}

impl CreepTemplate {
    pub const DEFAULT_RADIUS: f32 = 0.3;

    pub fn new(id: TemplateId, name: impl Into<String>, health: f32, speed: f32) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            speed,
            radius: Self::DEFAULT_RADIUS,
            bounty: 0,
            layer: LayerMask::ENEMY,
            resistances: Vec::new(),
        }
    }

    /// Resistance against `damage_type`; zero when none is listed.
    pub fn resistance(&self, damage_type: DamageType) -> f32 {
        self.resistances
            .iter()
            .find(|entry| entry.damage_type == damage_type)
            .map_or(0.0, |entry| entry.value)
    }

    #[cfg(feature = "serde")]
    fn default_radius() -> f32 {
        Self::DEFAULT_RADIUS
    }

    #[cfg(feature = "serde")]
    fn default_layer() -> LayerMask {
        LayerMask::ENEMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_damage_types_are_unresisted() {
        let mut brute = CreepTemplate::new(TemplateId(1), "brute", 80.0, 1.0);
        brute.resistances.push(Resistance {
            damage_type: DamageType::Physical,
            value: 0.5,
        });
        assert_eq!(brute.resistance(DamageType::Physical), 0.5);
        assert_eq!(brute.resistance(DamageType::Magic), 0.0);
    }
}
