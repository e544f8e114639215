//! Deferred action queue.
//!
//! Delayed spell steps and effect-triggered actions are parked here with the
//! simulation time at which they become ready. The owning loop drains ready
//! entries once per step; entries that share a ready time come out in the
//! order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::action::{Action, ActionArgs};
use crate::effect::EffectHandle;
use crate::state::SimTime;

/// A resolved action waiting for its delay to elapse.
#[derive(Clone, Debug)]
pub struct ScheduledAction {
    pub action: Arc<Action>,
    pub args: ActionArgs,
    /// Effect that queued this entry. Clearing the effect cancels it.
    pub owner: Option<EffectHandle>,
}

/// Queue of deferred actions for the combat loop.
pub type Scheduler = DeferredQueue<ScheduledAction>;

struct Entry<T> {
    ready_at: SimTime,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ready_at == other.ready_at && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed: BinaryHeap is a max-heap and the earliest entry must pop first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .ready_at
            .cmp(&self.ready_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of items keyed by ready time, FIFO among equal times.
pub struct DeferredQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `item` until `now + delay`. Negative delays are ready at `now`.
    pub fn schedule(&mut self, now: SimTime, delay: f32, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            ready_at: now.after(delay),
            seq,
            item,
        });
    }

    /// Removes and returns the earliest entry whose ready time is `<= now`.
    pub fn pop_ready(&mut self, now: SimTime) -> Option<T> {
        if self.heap.peek()?.ready_at > now {
            return None;
        }
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn next_ready_at(&self) -> Option<SimTime> {
        self.heap.peek().map(|entry| entry.ready_at)
    }

    /// Drops every queued item matching `predicate`; returns how many went.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.heap.len();
        self.heap.retain(|entry| !predicate(&entry.item));
        before - self.heap.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl DeferredQueue<ScheduledAction> {
    /// Cancels everything an effect queued.
    pub fn cancel_owned_by(&mut self, owner: EffectHandle) -> usize {
        self.cancel_where(|entry| entry.owner == Some(owner))
    }
}

impl<T> core::fmt::Debug for DeferredQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("len", &self.heap.len())
            .field("next_ready_at", &self.next_ready_at())
            .finish()
    }
}
