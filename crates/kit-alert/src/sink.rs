//! Message sink trait for logging and data collection.

use crate::{MessageEvent, ThresholdAlert};

/// Callbacks invoked by the [`Broadcaster`](crate::Broadcaster) as messages
/// are emitted.
///
/// Only `on_message` is required; threshold alerts default to a no-op so
/// sinks that only care about the message stream stay small.
///
/// # Example — console printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl MessageSink for Printer {
///     fn on_message(&mut self, event: &MessageEvent) {
///         println!("[{}] {} → {}: {}", event.timestamp, event.from, event.to, event.message);
///     }
/// }
/// ```
pub trait MessageSink {
    /// Called once per emitted message, in `seq` order.
    fn on_message(&mut self, event: &MessageEvent);

    /// Called once per kit whose reading breached a threshold during a sweep,
    /// right after `on_message` for the `event` that announced it.
    fn on_threshold_alert(&mut self, _event: &MessageEvent, _alert: &ThresholdAlert) {}
}

/// A [`MessageSink`] that discards everything.
pub struct NoopSink;

impl MessageSink for NoopSink {
    fn on_message(&mut self, _event: &MessageEvent) {}
}

/// Collects every callback in memory.  Handy in tests.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events:           Vec<MessageEvent>,
    pub threshold_alerts: Vec<ThresholdAlert>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageSink for VecSink {
    fn on_message(&mut self, event: &MessageEvent) {
        self.events.push(event.clone());
    }

    fn on_threshold_alert(&mut self, _event: &MessageEvent, alert: &ThresholdAlert) {
        self.threshold_alerts.push(alert.clone());
    }
}

/// Fan out to two sinks, left first.
impl<A: MessageSink, B: MessageSink> MessageSink for (A, B) {
    fn on_message(&mut self, event: &MessageEvent) {
        self.0.on_message(event);
        self.1.on_message(event);
    }

    fn on_threshold_alert(&mut self, event: &MessageEvent, alert: &ThresholdAlert) {
        self.0.on_threshold_alert(event, alert);
        self.1.on_threshold_alert(event, alert);
    }
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn on_message(&mut self, event: &MessageEvent) {
        (**self).on_message(event);
    }

    fn on_threshold_alert(&mut self, event: &MessageEvent, alert: &ThresholdAlert) {
        (**self).on_threshold_alert(event, alert);
    }
}
