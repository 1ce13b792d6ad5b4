//! # Adapters
//!
//! Event sink implementations for the dispatcher's outbound port.

pub mod sink;

pub use sink::{RecordingEventSink, TracingEventSink};
