//! Headless runtime for the combat rules.
//!
//! This crate gives the collaborator seams of `combat-core` concrete
//! implementations and drives them with a fixed-step loop. Consumers build a
//! [`Simulation`] from loaded content, subscribe to its [`EventBus`] and call
//! [`Simulation::step`] or [`Simulation::run`].
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the step loop and tower autocasting
//! - [`world`] owns units and answers overlap queries
//! - [`projectiles`] and [`zones`] back the projectile pool and damage-zone factory
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] adapts loaded terrain to the map oracle
pub mod error;
pub mod events;
pub mod oracle;
pub mod projectiles;
pub mod purse;
pub mod simulation;
pub mod world;
pub mod zones;

pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, DeckChange, Event, EventBus, SpawnEvent, Topic, drain};
pub use oracle::BoardMap;
pub use projectiles::{Impact, ProjectileSystem};
pub use purse::{Currency, Purse};
pub use simulation::{SimStats, SimSummary, Simulation};
pub use world::{Unit, UnitRole, World};
pub use zones::DamageZoneSystem;
