//! # Driven Ports (Outbound)
//!
//! Interfaces the dispatcher depends on. Adapters implement these to wire
//! the audit-log stream to a log, a recorder, or anything else.

use prism_types::Event;

/// Consumer of committed audit-log events.
///
/// The dispatcher buffers events during a call and publishes them here
/// only when the call commits; a failed call publishes nothing.
pub trait EventSink: Send + Sync {
    /// Receives one committed event, in emission order.
    fn publish(&self, event: &Event);
}

/// Sink that drops everything. Useful for benchmarks and fixtures.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: &Event) {}
}
