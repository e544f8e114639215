//! Spell deck: a hand of castable cards fed from a FIFO reserve.
//!
//! Every included card is in exactly one place: a hand slot or the queue.
//! So `deck_size() + filled hand slots == included count` after every
//! operation. Rejections (duplicates, full deck, bad slot) are reported with
//! `false`, never as errors.

use std::collections::{BTreeSet, VecDeque};

use crate::config::CombatConfig;
use crate::state::SpellId;

/// Change notification, drained by the owner through [`SpellDeck::take_events`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeckEvent {
    Drawn { slot: usize, spell: SpellId },
    Returned { slot: usize, spell: SpellId },
    Removed { spell: SpellId },
}

#[derive(Clone, Debug)]
pub struct SpellDeck {
    min_deck_size: usize,
    max_deck_size: usize,
    included: BTreeSet<SpellId>,
    queue: VecDeque<SpellId>,
    hand: Box<[Option<SpellId>]>,
    events: Vec<DeckEvent>,
}

impl SpellDeck {
    /// Hand size is capped at [`CombatConfig::MAX_HAND_SIZE`]; a larger
    /// request is logged and clamped.
    pub fn new(min_deck_size: usize, max_deck_size: usize, hand_size: usize) -> Self {
        if hand_size > CombatConfig::MAX_HAND_SIZE {
            tracing::warn!(
                requested = hand_size,
                max = CombatConfig::MAX_HAND_SIZE,
                "hand size clamped"
            );
        }
        let hand_size = hand_size.min(CombatConfig::MAX_HAND_SIZE);
        Self {
            min_deck_size,
            max_deck_size,
            included: BTreeSet::new(),
            queue: VecDeque::with_capacity(max_deck_size),
            hand: vec![None; hand_size].into_boxed_slice(),
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.min_deck_size, config.max_deck_size, config.hand_size)
    }

    /// Includes `spell` and tries to draw it into the hand.
    ///
    /// Returns false if it is already included or the deck is full.
    pub fn add(&mut self, spell: SpellId) -> bool {
        if self.included.contains(&spell) || self.included.len() >= self.max_deck_size {
            return false;
        }
        self.included.insert(spell);
        self.queue.push_back(spell);
        self.draw();
        true
    }

    /// Moves the front of the queue into the lowest empty hand slot.
    ///
    /// Returns the filled slot, or `None` when the hand is full or the queue
    /// is empty.
    pub fn draw(&mut self) -> Option<usize> {
        let slot = self.hand.iter().position(Option::is_none)?;
        let spell = self.queue.pop_front()?;
        self.hand[slot] = Some(spell);
        self.events.push(DeckEvent::Drawn { slot, spell });
        Some(slot)
    }

    /// Sends the card at `slot` to the back of the queue, then draws.
    ///
    /// No-op returning false for out-of-range or empty slots.
    pub fn return_card(&mut self, slot: usize) -> bool {
        let Some(spell) = self.hand.get_mut(slot).and_then(Option::take) else {
            return false;
        };
        self.queue.push_back(spell);
        self.events.push(DeckEvent::Returned { slot, spell });
        self.draw();
        true
    }

    /// Removes `spell` from the deck entirely. A vacated hand slot is
    /// refilled from the queue.
    pub fn remove(&mut self, spell: SpellId) -> bool {
        if !self.included.remove(&spell) {
            return false;
        }
        self.events.push(DeckEvent::Removed { spell });
        if let Some(slot) = self.slot_of(spell) {
            self.hand[slot] = None;
            self.draw();
        } else {
            self.queue.retain(|queued| *queued != spell);
        }
        true
    }

    /// True when the included count is within `[min, max]`.
    pub fn is_valid(&self) -> bool {
        (self.min_deck_size..=self.max_deck_size).contains(&self.included.len())
    }

    /// Cards waiting in the queue.
    pub fn deck_size(&self) -> usize {
        self.queue.len()
    }

    pub fn included_count(&self) -> usize {
        self.included.len()
    }

    pub fn contains(&self, spell: SpellId) -> bool {
        self.included.contains(&spell)
    }

    pub fn hand(&self) -> &[Option<SpellId>] {
        &self.hand
    }

    pub fn card(&self, slot: usize) -> Option<SpellId> {
        self.hand.get(slot).copied().flatten()
    }

    pub fn slot_of(&self, spell: SpellId) -> Option<usize> {
        self.hand.iter().position(|card| *card == Some(spell))
    }

    pub fn take_events(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for SpellDeck {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}
