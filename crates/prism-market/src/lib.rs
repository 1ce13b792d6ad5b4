//! # Prism Market - Fixed-Price Asset Marketplace
//!
//! ## Purpose
//!
//! The application layer on top of the dispatcher: a listing ledger keyed
//! by (collection, asset id), fixed-price purchases with a basis-point fee
//! split, per-actor running totals, and the admin configuration surface.
//! All state lives in namespaced regions of the shared store; the payment
//! asset and asset registry are external collaborators behind ports.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | At most one active listing per (collection, asset id) | `facets/market.rs` - `list_asset` |
//! | Listings are soft-deactivated, never deleted | `domain/entities.rs` - `MarketState::deactivate` |
//! | fee + seller_amount == price, exactly | `domain/services.rs` - `split_payment` |
//! | Fee rate ≤ 1000 bps | `facets/admin.rs` - `SET_FEE` handler |
//! | Stats grow only via completed purchases | `facets/market.rs` - `purchase_inner` |
//! | No nested purchase | `facets/market.rs` - re-entrancy guard |
//!
//! ## Failure Policy
//!
//! Every operation is all-or-nothing under the host rollback, with one
//! deliberate exception: `bulkRemoveListing` isolates per-element failures
//! and reports the attempted count.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod client;
pub mod deploy;
pub mod domain;
pub mod errors;
pub mod facets;
pub mod ports;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        limits, listing_id, split_payment, Listing, ListingKey, MarketConfig, MarketState,
        PaymentSplit, UserStats,
    };

    // Ports
    pub use crate::ports::{AssetRegistry, PaymentAsset};

    // Adapters
    pub use crate::adapters::{AssetLedger, InMemoryAssetRegistry, InMemoryToken, TokenLedger};

    // Facets
    pub use crate::facets::{
        AdminFacet, AssetRefArgs, BulkRemoveArgs, ListAssetArgs, MarketFacet, PaginationArgs,
        UpdatePriceArgs,
    };

    // Deployment & client
    pub use crate::client::MarketClient;
    pub use crate::deploy::install_market;

    // Errors
    pub use crate::errors::{AssetError, MarketError};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
