use tracing::{debug, trace};

use crate::dispatch::{event::AccessibilityEvent, sink::EventSink};

/// Last stop before the sink. Drops everything while disabled.
#[derive(Debug)]
pub struct Dispatcher<S: EventSink> {
    sink: S,
    enabled: bool,
    published: u64,
}

impl<S: EventSink> Dispatcher<S> {
    pub fn new(sink: S, enabled: bool) -> Self {
        Dispatcher {
            sink,
            enabled,
            published: 0,
        }
    }

    /// Forward `event` to the sink. Returns whether it went out.
    pub fn publish(&mut self, event: &AccessibilityEvent) -> bool {
        if !self.enabled {
            trace!(kind = event.kind(), "dispatcher disabled, dropping event");
            return false;
        }

        debug!(kind = event.kind(), announcement = %event.announcement(), "publishing");
        self.sink.publish(event);
        self.published += 1;
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of events handed to the sink so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
