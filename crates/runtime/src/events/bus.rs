//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::broadcast::{self, error::TryRecvError};

use super::types::{CombatEvent, DeckChange, SpawnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub enum Topic {
    /// Casts, hits, effect expiries, deaths
    Combat,
    /// Spawns and creeps reaching the goal
    Spawn,
    /// Hand and queue changes
    Deck,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    Combat(CombatEvent),
    Spawn(SpawnEvent),
    Deck(DeckChange),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Spawn(_) => Topic::Spawn,
            Event::Deck(_) => Topic::Deck,
        }
    }
}

/// Topic-based event bus
///
/// One bounded broadcast channel per topic. Publishing never blocks; a
/// subscriber that falls more than `capacity` events behind skips the oldest
/// ones and learns how many through [`drain`].
#[derive(Debug)]
pub struct EventBus {
    capacity: usize,
    channels: HashMap<Topic, broadcast::Sender<Event>>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = [Topic::Combat, Topic::Spawn, Topic::Deck]
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();
        Self { capacity, channels }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&mut self, topic: Topic) -> broadcast::Receiver<Event> {
        let capacity = self.capacity;
        self.channels
            .entry(topic)
            .or_insert_with(|| broadcast::channel(capacity).0)
            .subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &mut self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels
            .get(&topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Takes every event currently queued on `rx`.
///
/// Events overwritten while the receiver lagged are logged and skipped.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event subscriber lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    events
}
