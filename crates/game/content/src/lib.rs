//! Data-driven combat content and loaders.
//!
//! This crate provides the content types the core leaves to data (creep
//! templates and level setup) and loaders for RON/TOML data files:
//! - Action, effect and spell templates (RON lists, gathered into a codex)
//! - Creep templates (RON)
//! - Board terrain (RON)
//! - Level setup: combat tuning, starting deck, spawn zones, towers (TOML)
//!
//! Content is consumed by the runtime and never mutated after loading.

pub mod creeps;
pub mod setup;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use creeps::{CreepTemplate, Resistance};
pub use setup::{DeckSetup, LevelSetup, TowerSetup};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader, TemplateLoader};
