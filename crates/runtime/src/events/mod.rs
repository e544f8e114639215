//! Topic-based event bus for simulation events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic, drain};
pub use types::{CombatEvent, DeckChange, SpawnEvent};
