//! Level setup read from `config.toml`.

use combat_core::{CombatConfig, SpawnZoneConfig, SpellId, Tile};

/// A tower placed at level start. It casts whatever the hand offers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowerSetup {
    pub tile: Tile,
    /// Seconds between casts.
    pub cooldown: f32,
    /// Targeting radius around the tower.
    pub range: f32,
}

/// Cards included in the starting deck, in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckSetup {
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellId>,
}

/// Everything `config.toml` holds.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelSetup {
    pub combat: CombatConfig,
    pub deck: DeckSetup,
    pub spawn_zones: Vec<SpawnZoneConfig>,
    pub towers: Vec<TowerSetup>,
    /// Damage-zone prefabs the runtime may instantiate.
    pub zone_prefabs: Vec<String>,
}
