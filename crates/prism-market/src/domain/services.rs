//! # Domain Services
//!
//! Pure marketplace arithmetic and key derivation. No I/O, no store
//! access, deterministic.

use crate::errors::MarketError;
use prism_types::{keccak256, Address, Hash, U256};

/// Marketplace limits.
pub mod limits {
    /// Hard cap on the fee rate: 1000 basis points (10%).
    pub const MAX_FEE_BPS: u16 = 1_000;

    /// Fixed ceiling on a bulk-remove batch.
    pub const MAX_BULK_REMOVE: usize = 20;

    /// Page size used when a pagination query passes a zero limit.
    pub const DEFAULT_PAGE_SIZE: usize = 50;
}

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;

// =============================================================================
// KEY DERIVATION
// =============================================================================

/// Derives the deterministic listing id for (collection, asset id).
///
/// id = keccak256(collection ‖ asset_id_be)
#[must_use]
pub fn listing_id(collection: Address, asset_id: U256) -> Hash {
    let mut data = [0u8; 52];
    data[..20].copy_from_slice(collection.as_bytes());
    asset_id.to_big_endian(&mut data[20..]);
    keccak256(&data)
}

// =============================================================================
// FEE ARITHMETIC
// =============================================================================

/// How one purchase price splits between seller and fee recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentSplit {
    /// floor(price · fee_bps / 10000), routed to the fee recipient.
    pub fee: U256,
    /// price − fee, routed to the seller.
    pub seller_amount: U256,
}

/// Splits a price at a basis-point fee rate.
///
/// `fee + seller_amount == price` exactly; flooring loses nothing because
/// the remainder stays with the seller.
pub fn split_payment(price: U256, fee_bps: u16) -> Result<PaymentSplit, MarketError> {
    let fee = price
        .checked_mul(U256::from(fee_bps))
        .ok_or(MarketError::MathOverflow)?
        / U256::from(BPS_DENOMINATOR);
    let seller_amount = price.checked_sub(fee).ok_or(MarketError::MathOverflow)?;
    Ok(PaymentSplit { fee, seller_amount })
}

// =============================================================================
// TESTS
// =============================================================================
