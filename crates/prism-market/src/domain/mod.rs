//! # Marketplace Domain
//!
//! Entities, ledger regions, and pure services. Facets drive these; the
//! domain never touches ports or the dispatcher.

pub mod entities;
pub mod services;

pub use entities::{Listing, ListingKey, MarketConfig, MarketState, UserStats};
pub use services::{limits, listing_id, split_payment, PaymentSplit, BPS_DENOMINATOR};
