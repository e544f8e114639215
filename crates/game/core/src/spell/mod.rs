//! Spells: a delivery mode plus an ordered list of delayed actions.
//!
//! Casting first gathers input according to [`SpellDelivery`]. If that fails
//! nothing runs. Otherwise every step resolves immediately or is scheduled
//! relative to the cast time; a step that later fails does not affect the
//! others.

mod cast;
mod template;

pub use cast::{CastError, Spell};
pub use template::{SpellDelivery, SpellObject};
