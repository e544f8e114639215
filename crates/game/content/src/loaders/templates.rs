//! Template list loader.
//!
//! Each file is a RON list of one template type.

use std::path::Path;

use combat_core::{ActionObject, AppliedEffectObject, SpellObject};
use serde::de::DeserializeOwned;

use crate::creeps::CreepTemplate;
use crate::loaders::{LoadResult, read_file, ron_options};

/// Loader for RON template lists.
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load_actions(path: &Path) -> LoadResult<Vec<ActionObject>> {
        Self::load_list(path, "action")
    }

    pub fn load_effects(path: &Path) -> LoadResult<Vec<AppliedEffectObject>> {
        Self::load_list(path, "effect")
    }

    pub fn load_spells(path: &Path) -> LoadResult<Vec<SpellObject>> {
        Self::load_list(path, "spell")
    }

    pub fn load_creeps(path: &Path) -> LoadResult<Vec<CreepTemplate>> {
        Self::load_list(path, "creep")
    }

    fn load_list<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<Vec<T>> {
        let content = read_file(path)?;
        Self::parse_list(&content, what)
    }

    pub(crate) fn parse_list<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<Vec<T>> {
        ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
    }
}
