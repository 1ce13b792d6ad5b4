//! # Ports
//!
//! Inbound: the [`Facet`] contract routable modules implement.
//! Outbound: the [`EventSink`] the dispatcher publishes committed events to.

pub mod inbound;
pub mod outbound;

pub use inbound::Facet;
pub use outbound::{EventSink, NullEventSink};
