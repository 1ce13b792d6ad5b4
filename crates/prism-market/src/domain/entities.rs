//! # Marketplace Entities
//!
//! The listing ledger and its namespaced regions. Listings are keyed by a
//! deterministic hash of (collection, asset id); records are never deleted,
//! only soft-deactivated, so the global pagination index preserves history.

use crate::domain::services::listing_id;
use prism_storage::StorageNamespace;
use prism_types::{Address, Hash, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// LISTING
// =============================================================================

/// The key identifying one saleable asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingKey {
    /// Asset collection address.
    pub collection: Address,
    /// Asset id within the collection.
    pub asset_id: U256,
}

impl ListingKey {
    /// The deterministic listing id for this key.
    #[must_use]
    pub fn id(&self) -> Hash {
        listing_id(self.collection, self.asset_id)
    }
}

/// One listing instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// The seller who created this listing.
    pub seller: Address,
    /// Asset collection address.
    pub collection: Address,
    /// Asset id within the collection.
    pub asset_id: U256,
    /// Asking price.
    pub price: U256,
    /// Active listings are purchasable; inactive ones are history.
    pub active: bool,
    /// Creation timestamp (unix seconds).
    pub created_at: u64,
}

// =============================================================================
// USER STATS
// =============================================================================

/// Per-address running totals, updated only by completed purchases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Sum of prices of completed sales.
    pub total_sales: U256,
    /// Sum of prices of completed purchases.
    pub total_purchases: U256,
}

// =============================================================================
// MARKET CONFIG REGION
// =============================================================================

/// Marketplace configuration region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// The asset purchases are paid in.
    pub payment_asset: Address,
    /// Fee in basis points, at most [`crate::domain::services::limits::MAX_FEE_BPS`].
    pub fee_bps: u16,
    /// Where fees go.
    pub fee_recipient: Address,
}

impl StorageNamespace for MarketConfig {
    const TAG: &'static str = "prism.market.config";
}

// =============================================================================
// MARKET STATE REGION
// =============================================================================

/// The marketplace ledger region.
///
/// `listing_index` is append-only over listing ids: an id enters on the
/// key's first listing and stays forever, so pagination sees the full
/// history. `seller_index` tracks only *active* listings per seller and is
/// maintained with swap-remove.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MarketState {
    listings: HashMap<Hash, Listing>,
    listing_index: Vec<Hash>,
    seller_index: HashMap<Address, Vec<Hash>>,
    stats: HashMap<Address, UserStats>,
    /// Purchase re-entrancy flag.
    pub entered: bool,
}

impl StorageNamespace for MarketState {
    const TAG: &'static str = "prism.market.ledger";
}

impl MarketState {
    /// Looks up a listing record (active or not).
    #[must_use]
    pub fn listing(&self, id: Hash) -> Option<&Listing> {
        self.listings.get(&id)
    }

    /// Returns true if the key currently has an active listing.
    #[must_use]
    pub fn is_active(&self, id: Hash) -> bool {
        self.listings.get(&id).is_some_and(|l| l.active)
    }

    /// Installs a new active listing instance under the id, indexing it.
    ///
    /// A key re-listed after deactivation reuses its index slot; a brand
    /// new key is appended to the global index.
    pub fn insert_listing(&mut self, id: Hash, listing: Listing) {
        let seller = listing.seller;
        if self.listings.insert(id, listing).is_none() {
            self.listing_index.push(id);
        }
        self.seller_index.entry(seller).or_default().push(id);
    }

    /// Updates the price of a listing in place.
    pub fn set_price(&mut self, id: Hash, new_price: U256) {
        if let Some(listing) = self.listings.get_mut(&id) {
            listing.price = new_price;
        }
    }

    /// Soft-deactivates a listing and clears its seller-index entry.
    pub fn deactivate(&mut self, id: Hash) {
        let Some(listing) = self.listings.get_mut(&id) else {
            return;
        };
        listing.active = false;
        let seller = listing.seller;

        if let Some(ids) = self.seller_index.get_mut(&seller) {
            if let Some(position) = ids.iter().position(|&entry| entry == id) {
                ids.swap_remove(position);
            }
            if ids.is_empty() {
                self.seller_index.remove(&seller);
            }
        }
    }

    /// Active listing ids of one seller.
    #[must_use]
    pub fn seller_listings(&self, seller: Address) -> Vec<Hash> {
        self.seller_index.get(&seller).cloned().unwrap_or_default()
    }

    /// Offset+limit page over the append-only global index. An offset past
    /// the end yields an empty page, never an error.
    #[must_use]
    pub fn paginated(&self, offset: usize, limit: usize) -> Vec<Listing> {
        self.listing_index
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| self.listings.get(id).cloned())
            .collect()
    }

    /// A user's running totals (zeros if they never traded).
    #[must_use]
    pub fn stats_of(&self, address: Address) -> UserStats {
        self.stats.get(&address).copied().unwrap_or_default()
    }

    /// Mutable access to a user's totals.
    pub fn stats_mut(&mut self, address: Address) -> &mut UserStats {
        self.stats.entry(address).or_default()
    }

    /// Total number of listing records ever created.
    #[must_use]
    pub fn listing_count(&self) -> usize {
        self.listing_index.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
