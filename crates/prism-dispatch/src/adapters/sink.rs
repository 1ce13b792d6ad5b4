//! # Event Sink Adapters
//!
//! Two `EventSink` implementations: a tracing-backed sink for live
//! operation and an in-memory recorder that doubles as the audit log in
//! tests (with JSON rendering for inspection).

use crate::ports::EventSink;
use prism_types::Event;
use std::sync::RwLock;
use tracing::info;

// =============================================================================
// TRACING SINK
// =============================================================================

/// Publishes every committed event as a structured log line.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    /// Creates the sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn publish(&self, event: &Event) {
        info!(topic = event.topic(), event = ?event, "event committed");
    }
}

// =============================================================================
// RECORDING SINK
// =============================================================================

/// Keeps every committed event in memory, in commit order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<Event>>,
}

impl RecordingEventSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.read().unwrap().clone()
    }

    /// Drains the recorder, returning everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.write().unwrap())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().unwrap().is_empty()
    }

    /// Renders the audit log as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.events.read().unwrap())
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: &Event) {
        self.events.write().unwrap().push(event.clone());
    }
}

// =============================================================================
// TESTS
// =============================================================================
