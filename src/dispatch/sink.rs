use std::{
    fs::{File, OpenOptions},
    io::Write,
};

use tracing::warn;

use crate::dispatch::event::AccessibilityEvent;
use crate::error::{NarrationError, Result};

/// External consumer of accessibility events. Fire-and-forget: a sink
/// handles its own failures and never reports them back.
pub trait EventSink {
    fn publish(&mut self, event: &AccessibilityEvent);
}

/// In-memory capture, used by replay and tests.
impl EventSink for Vec<AccessibilityEvent> {
    fn publish(&mut self, event: &AccessibilityEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn publish(&mut self, event: &AccessibilityEvent) {
        (**self).publish(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn publish(&mut self, event: &AccessibilityEvent) {
        (**self).publish(event);
    }
}

/// Appends one JSON object per event to a file.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| NarrationError::Io {
                path: path.to_string(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl EventSink for JsonlSink {
    fn publish(&mut self, event: &AccessibilityEvent) {
        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!(error = %e, "failed to serialize accessibility event");
                return;
            }
        };

        if let Err(e) = writeln!(self.file, "{}", json) {
            warn!(error = %e, "failed to write accessibility event");
        }
    }
}

/// Writes the spoken form of each event, one line per event.
pub struct AnnouncementSink<W: Write> {
    out: W,
}

impl<W: Write> AnnouncementSink<W> {
    pub fn new(out: W) -> Self {
        AnnouncementSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for AnnouncementSink<W> {
    fn publish(&mut self, event: &AccessibilityEvent) {
        if let Err(e) = writeln!(self.out, "{}", event.announcement()) {
            warn!(error = %e, "failed to write announcement");
        }
    }
}
