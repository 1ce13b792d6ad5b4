//! # Event Schema
//!
//! The audit-log event vocabulary for the whole system. Every state-changing
//! operation emits one of these; a call that fails emits nothing (events are
//! buffered in the call context and flushed only on commit).
//!
//! One shared enum rather than per-crate event types: sinks, recorders, and
//! tests all consume the same stream without downcasting.

use crate::value_objects::{Address, Hash, Selector, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROUTING CHANGE DESCRIPTIONS
// =============================================================================

/// The kind of mutation a cut entry applies to the routing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutAction {
    /// Map currently-unmapped selectors to a facet.
    Add,
    /// Re-map currently-mapped selectors to a different facet.
    Replace,
    /// Unmap currently-mapped selectors.
    Remove,
}

/// One entry of a routing-table batch mutation, as reported in events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetChange {
    /// Target facet address (zero for removals).
    pub facet: Address,
    /// Mutation kind.
    pub action: CutAction,
    /// Selectors affected.
    pub selectors: Vec<Selector>,
}

// =============================================================================
// EVENTS
// =============================================================================

/// All audit-log events the system emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The routing table was mutated; carries the full batch description.
    RoutingChanged {
        /// Every entry of the applied batch, in application order.
        changes: Vec<FacetChange>,
        /// Initializer target, if the cut carried one.
        initializer: Option<Address>,
    },
    /// Control of the dispatcher moved to a new owner.
    OwnershipTransferred {
        /// Owner before the transfer.
        previous_owner: Address,
        /// Owner after the transfer.
        new_owner: Address,
    },
    /// A new active listing was created.
    Listed {
        /// Deterministic listing key hash.
        listing_id: Hash,
        /// Listing seller.
        seller: Address,
        /// Asset collection address.
        collection: Address,
        /// Asset id within the collection.
        asset_id: U256,
        /// Asking price.
        price: U256,
    },
    /// An active listing's price changed.
    PriceUpdated {
        /// Deterministic listing key hash.
        listing_id: Hash,
        /// Price before the update.
        old_price: U256,
        /// Price after the update.
        new_price: U256,
    },
    /// A listing was purchased and deactivated.
    Purchased {
        /// Deterministic listing key hash.
        listing_id: Hash,
        /// Buyer address.
        buyer: Address,
        /// Seller address.
        seller: Address,
        /// Full price paid by the buyer.
        price: U256,
        /// Fee portion routed to the fee recipient.
        fee: U256,
    },
    /// A listing was deactivated by its seller.
    ListingRemoved {
        /// Deterministic listing key hash.
        listing_id: Hash,
        /// The seller who removed it.
        seller: Address,
    },
    /// A bulk removal batch finished. Reports attempted count, not
    /// succeeded count: per-element failures are swallowed by design.
    BulkRemoveCompleted {
        /// Number of elements in the batch.
        attempted: u32,
    },
    /// The payment asset address was reconfigured.
    PaymentAssetUpdated {
        /// New payment asset address.
        asset: Address,
    },
    /// The marketplace fee rate was reconfigured.
    FeeUpdated {
        /// New fee in basis points.
        fee_bps: u16,
    },
    /// The fee recipient address was reconfigured.
    FeeRecipientUpdated {
        /// New fee recipient.
        recipient: Address,
    },
}

impl Event {
    /// Stable topic string for filtering and structured logging.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::RoutingChanged { .. } => "routing_changed",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
            Self::Listed { .. } => "listed",
            Self::PriceUpdated { .. } => "price_updated",
            Self::Purchased { .. } => "purchased",
            Self::ListingRemoved { .. } => "listing_removed",
            Self::BulkRemoveCompleted { .. } => "bulk_remove_completed",
            Self::PaymentAssetUpdated { .. } => "payment_asset_updated",
            Self::FeeUpdated { .. } => "fee_updated",
            Self::FeeRecipientUpdated { .. } => "fee_recipient_updated",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
