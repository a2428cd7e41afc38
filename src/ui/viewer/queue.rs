// SPDX-License-Identifier: MPL-2.0
//! Deferred state updates.
//!
//! Gesture handlers do not write [`ViewerState`] inline. They enqueue an
//! update closure that the next UI tick applies, so several touch events
//! between two ticks coalesce into one visible frame. Updates run strictly in
//! the order they were enqueued.

use super::state::ViewerState;
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

/// A state mutation waiting for the next UI tick.
pub type PendingUpdate = Box<dyn FnOnce(&mut ViewerState, Instant) + Send>;

/// Single-consumer FIFO of pending updates.
#[derive(Default)]
pub struct UpdateQueue {
    pending: VecDeque<PendingUpdate>,
}

impl fmt::Debug for UpdateQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateQueue")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, update: PendingUpdate) {
        self.pending.push_back(update);
    }

    /// Applies every queued update in arrival order and returns how many ran.
    pub fn drain_into(&mut self, state: &mut ViewerState, now: Instant) -> usize {
        let count = self.pending.len();
        for update in self.pending.drain(..) {
            update(state, now);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
