//! Content factory for building the codex and level setup from data files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use combat_core::{Codex, GameError, MapDimensions, StaticTile, TemplateId, Tile};

use crate::creeps::CreepTemplate;
use crate::loaders::{ConfigLoader, LoadResult, MapLoader, TemplateLoader};
use crate::setup::LevelSetup;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// ├── effects.ron
/// ├── spells.ron
/// ├── creeps.ron
/// └── maps/
///     └── meadow.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load level setup from `config.toml`.
    pub fn load_config(&self) -> LoadResult<LevelSetup> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load every template into a fresh [`Codex`].
    ///
    /// Duplicate ids abort the load. Dangling references and unknown tags
    /// only warn: the affected templates stay loadable and fail when used.
    pub fn load_codex(&self) -> LoadResult<Codex> {
        let mut codex = Codex::new();

        for effect in TemplateLoader::load_effects(&self.data_dir.join("effects.ron"))? {
            codex.insert_effect(effect).context("effects.ron")?;
        }
        for action in TemplateLoader::load_actions(&self.data_dir.join("actions.ron"))? {
            codex.insert_action(action).context("actions.ron")?;
        }
        for spell in TemplateLoader::load_spells(&self.data_dir.join("spells.ron"))? {
            codex.insert_spell(spell).context("spells.ron")?;
        }

        for issue in codex.validate() {
            tracing::warn!(code = issue.error_code(), "{}", issue);
        }
        tracing::info!(
            actions = codex.action_count(),
            effects = codex.effect_count(),
            spells = codex.spell_count(),
            "codex loaded"
        );

        Ok(codex)
    }

    /// Load creep templates from `creeps.ron`, keyed by id.
    pub fn load_creeps(&self) -> LoadResult<HashMap<TemplateId, CreepTemplate>> {
        let path = self.data_dir.join("creeps.ron");
        let mut creeps = HashMap::new();
        for creep in TemplateLoader::load_creeps(&path)? {
            let id = creep.id;
            if creeps.insert(id, creep).is_some() {
                anyhow::bail!("creeps.ron: duplicate {}", id);
            }
        }
        Ok(creeps)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(
        &self,
        map_name: &str,
    ) -> LoadResult<(MapDimensions, HashMap<Tile, StaticTile>)> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let factory = ContentFactory::new("/nonexistent-combat-data");
        let err = factory.load_creeps().unwrap_err();
        assert!(err.to_string().contains("creeps.ron"));
    }
}
