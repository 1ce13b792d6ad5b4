//! # Error Types
//!
//! Marketplace errors and the collaborator (payment asset / asset
//! registry) errors they wrap. Marketplace errors cross the dispatcher
//! boundary wrapped in `DispatchError::Facet` and are recoverable by
//! downcast at the call site.

use prism_types::{Address, U256};
use thiserror::Error;

// =============================================================================
// ASSET ERRORS (collaborator failures)
// =============================================================================

/// Failures reported by the payment-asset and asset-registry collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Insufficient balance for a value transfer.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer needed.
        required: U256,
        /// Amount actually held.
        available: U256,
    },

    /// The asset does not exist in the collection.
    #[error("unknown asset {asset_id} in collection {collection}")]
    UnknownAsset {
        /// Collection address.
        collection: Address,
        /// Asset id.
        asset_id: U256,
    },

    /// The stated holder does not own the asset.
    #[error("account {account} does not own asset {asset_id}")]
    WrongOwner {
        /// The account that is not the owner.
        account: Address,
        /// Asset id.
        asset_id: U256,
    },

    /// The operator lacks approval to move the asset.
    #[error("operator {operator} is not approved for asset {asset_id}")]
    NotOperator {
        /// The unapproved operator.
        operator: Address,
        /// Asset id.
        asset_id: U256,
    },

    /// The zero address can neither hold nor move value.
    #[error("the zero address cannot hold or move value")]
    ZeroAccount,
}

// =============================================================================
// MARKET ERRORS
// =============================================================================

/// Errors from marketplace operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Caller does not own the asset being listed.
    #[error("caller does not own the asset")]
    NotOwner,

    /// The dispatcher is not approved to move the asset on sale.
    #[error("dispatcher is not approved to transfer the asset")]
    NotApproved,

    /// A listing price of zero is meaningless.
    #[error("listing price must be non-zero")]
    ZeroPrice,

    /// The (collection, asset) key already has an active listing.
    /// Re-listing requires an explicit remove or a completed purchase.
    #[error("an active listing already exists for this asset")]
    ListingAlreadyActive,

    /// Only the recorded seller may change a listing's price.
    #[error("caller is not the seller of this listing")]
    NotSeller,

    /// Only the recorded seller may remove a listing.
    #[error("only the listing seller may remove it")]
    NotListingSeller,

    /// The listing does not exist or is no longer active.
    #[error("listing is not active")]
    ListingNotActive,

    /// A seller cannot purchase their own listing.
    #[error("buyer and seller are the same address")]
    CannotBuyOwnNft,

    /// A purchase re-entered while another purchase was in progress.
    #[error("purchase already in progress")]
    ReentrantCall,

    /// Purchases need a configured payment asset.
    #[error("payment asset is not configured")]
    PaymentAssetNotConfigured,

    /// Moving the seller's share of the price failed.
    #[error("payment to seller failed: {source}")]
    PaymentToSellerFailed {
        /// The collaborator failure.
        #[source]
        source: AssetError,
    },

    /// Moving the fee to the fee recipient failed.
    #[error("fee payment failed: {source}")]
    FeePaymentFailed {
        /// The collaborator failure.
        #[source]
        source: AssetError,
    },

    /// Transferring the asset to the buyer failed.
    #[error("asset transfer failed: {source}")]
    NftTransferFailed {
        /// The collaborator failure.
        #[source]
        source: AssetError,
    },

    /// Bulk arrays must be the same length.
    #[error("array length mismatch: {collections} collections, {asset_ids} asset ids")]
    ArrayLengthMismatch {
        /// Length of the collections array.
        collections: usize,
        /// Length of the asset-ids array.
        asset_ids: usize,
    },

    /// Bulk arrays must not be empty.
    #[error("bulk operation arrays are empty")]
    EmptyArrays,

    /// Bulk batch larger than the fixed ceiling.
    #[error("bulk limit exceeded: {count} > {max}")]
    MaxBulkLimitExceeded {
        /// Requested batch size.
        count: usize,
        /// The fixed ceiling.
        max: usize,
    },

    /// A zero address where a real one is required.
    #[error("invalid address: {context}")]
    InvalidAddress {
        /// What the address was supposed to be.
        context: &'static str,
    },

    /// Fee rate above the hard cap.
    #[error("fee exceeds maximum: {bps} > {max} basis points")]
    FeeExceedsMaximum {
        /// Requested fee.
        bps: u16,
        /// The hard cap.
        max: u16,
    },

    /// 256-bit arithmetic overflowed.
    #[error("arithmetic overflow in payment math")]
    MathOverflow,
}

// =============================================================================
// TESTS
// =============================================================================
