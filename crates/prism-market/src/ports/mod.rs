//! # Ports
//!
//! Outbound capability interfaces the marketplace depends on.

pub mod outbound;

pub use outbound::{AssetRegistry, PaymentAsset};
