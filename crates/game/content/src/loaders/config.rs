//! Level setup loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};
use crate::setup::LevelSetup;

/// Loader for level setup from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`LevelSetup`] from a TOML file. Missing sections fall back to
    /// their defaults.
    pub fn load(path: &Path) -> LoadResult<LevelSetup> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LevelSetup> {
        let setup: LevelSetup = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let combat = &setup.combat;
        if combat.min_deck_size > combat.max_deck_size {
            anyhow::bail!(
                "min_deck_size {} exceeds max_deck_size {}",
                combat.min_deck_size,
                combat.max_deck_size
            );
        }
        if combat.hand_size > CombatConfig::MAX_HAND_SIZE {
            anyhow::bail!(
                "hand_size {} exceeds the maximum of {}",
                combat.hand_size,
                CombatConfig::MAX_HAND_SIZE
            );
        }
        if combat.fixed_step <= 0.0 {
            anyhow::bail!("fixed_step must be positive, got {}", combat.fixed_step);
        }

        Ok(setup)
    }
}
