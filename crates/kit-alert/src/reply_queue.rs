//! `ReplyQueue` — pending kit replies keyed by virtual due time.
//!
//! Each broadcast pushes one entry per online kit.  Advancing the simulator
//! drains every entry due at or before the new time, earliest first; entries
//! sharing a due time come out in the order they were pushed.
//!
//! `BTreeMap` gives O(log W) insert and ordered drain where W is the number
//! of distinct due times currently enqueued.

use std::collections::BTreeMap;

use kit_core::{DeviceId, Millis};

use crate::BroadcastId;

/// Everything needed to emit a reply later, captured at broadcast time.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingReply {
    pub broadcast:      BroadcastId,
    pub kit:            DeviceId,
    pub kit_name:       String,
    pub command_center: String,
    /// Full reading text as it was when the alert went out.
    pub reading:        String,
    /// Kit → command center names, present only for multi-entry routes.
    pub path:           Option<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct ReplyQueue {
    inner: BTreeMap<Millis, Vec<PendingReply>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl ReplyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `reply` to fire at `due`.
    pub fn push(&mut self, due: Millis, reply: PendingReply) {
        self.inner.entry(due).or_default().push(reply);
        self.total += 1;
    }

    /// Remove and return every entry due at or before `now`, in firing order.
    pub fn pop_due(&mut self, now: Millis) -> Vec<(Millis, PendingReply)> {
        let later = match now.0.checked_add(1) {
            Some(next) => self.inner.split_off(&Millis(next)),
            None       => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.inner, later);

        let mut out = Vec::with_capacity(due.values().map(Vec::len).sum());
        for (at, replies) in due {
            out.extend(replies.into_iter().map(|r| (at, r)));
        }
        self.total -= out.len();
        out
    }

    /// The earliest due time, or `None` if empty.
    pub fn next_due(&self) -> Option<Millis> {
        self.inner.keys().next().copied()
    }

    /// The latest due time, or `None` if empty.
    pub fn last_due(&self) -> Option<Millis> {
        self.inner.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
