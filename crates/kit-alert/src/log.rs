//! Bounded newest-first logs for display collaborators.

use std::collections::VecDeque;

use crate::{BroadcastConfig, MessageEvent, MessageSink, ThresholdAlert};

/// Keeps at most `capacity` entries; pushing past capacity drops the oldest.
/// Iteration is newest first.
#[derive(Clone, Debug)]
pub struct RollingLog<T> {
    entries:  VecDeque<T>,
    capacity: usize,
}

impl<T> RollingLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The dashboard's two on-screen logs as a [`MessageSink`].
#[derive(Clone, Debug)]
pub struct MessageLog {
    pub messages:         RollingLog<MessageEvent>,
    pub threshold_alerts: RollingLog<ThresholdAlert>,
}

impl MessageLog {
    pub fn new(message_capacity: usize, alert_capacity: usize) -> Self {
        Self {
            messages:         RollingLog::new(message_capacity),
            threshold_alerts: RollingLog::new(alert_capacity),
        }
    }

    pub fn from_config(config: &BroadcastConfig) -> Self {
        Self::new(config.message_log_capacity, config.alert_log_capacity)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::from_config(&BroadcastConfig::default())
    }
}

impl MessageSink for MessageLog {
    fn on_message(&mut self, event: &MessageEvent) {
        self.messages.push(event.clone());
    }

    fn on_threshold_alert(&mut self, _event: &MessageEvent, alert: &ThresholdAlert) {
        self.threshold_alerts.push(alert.clone());
    }
}
