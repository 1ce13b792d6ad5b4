//! # Market Facet
//!
//! The marketplace ledger operations: list, re-price, purchase, remove
//! (single and bulk), and the read-only queries. Executes in the
//! dispatcher's identity; the dispatcher's address is the operator sellers
//! approve for asset custody.
//!
//! Purchase is guarded against re-entrancy and relies on the host rollback
//! for atomicity across the payment, fee, and asset-transfer steps. Bulk
//! removal is the one operation with per-element failure isolation.

use crate::domain::{limits, listing_id, split_payment, Listing, MarketConfig, MarketState, UserStats};
use crate::errors::MarketError;
use crate::ports::{AssetRegistry, PaymentAsset};
use prism_dispatch::abi;
use prism_dispatch::context::CallContext;
use prism_dispatch::errors::DispatchError;
use prism_dispatch::ports::Facet;
use prism_types::{Address, Bytes, Event, Hash, Selector, U256};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Operation signatures.
pub mod sig {
    /// Create an active listing for an owned, approved asset.
    pub const LIST_ASSET: &str = "market.listAsset";
    /// Change the price of an active listing. Seller-only.
    pub const UPDATE_PRICE: &str = "market.updatePrice";
    /// Buy an active listing at its asking price.
    pub const PURCHASE_ASSET: &str = "market.purchaseAsset";
    /// Deactivate an active listing. Seller-only.
    pub const REMOVE_LISTING: &str = "market.removeListing";
    /// Deactivate up to the bulk ceiling of listings, isolating failures.
    pub const BULK_REMOVE_LISTING: &str = "market.bulkRemoveListing";
    /// Look up one listing record (active or historical).
    pub const GET_LISTING: &str = "market.getListing";
    /// Offset+limit page over the global listing index.
    pub const GET_LISTINGS_PAGINATED: &str = "market.getListingsPaginated";
    /// Active listing ids of one seller.
    pub const GET_SELLER_LISTINGS: &str = "market.getSellerListings";
    /// Running totals of one address.
    pub const GET_USER_STATS: &str = "market.getUserStats";
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Arguments of `listAsset`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAssetArgs {
    /// Asset collection address.
    pub collection: Address,
    /// Asset id within the collection.
    pub asset_id: U256,
    /// Asking price. Must be non-zero.
    pub price: U256,
}

/// Arguments of `updatePrice`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePriceArgs {
    /// Asset collection address.
    pub collection: Address,
    /// Asset id within the collection.
    pub asset_id: U256,
    /// New asking price. Must be non-zero.
    pub new_price: U256,
}

/// Arguments of `purchaseAsset`, `removeListing`, and `getListing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRefArgs {
    /// Asset collection address.
    pub collection: Address,
    /// Asset id within the collection.
    pub asset_id: U256,
}

/// Arguments of `bulkRemoveListing`: parallel arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRemoveArgs {
    /// Collection of each element.
    pub collections: Vec<Address>,
    /// Asset id of each element.
    pub asset_ids: Vec<U256>,
}

/// Arguments of `getListingsPaginated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationArgs {
    /// Index of the first entry to return.
    pub offset: u64,
    /// Page size; zero selects the default page size.
    pub limit: u64,
}

// =============================================================================
// MARKET FACET
// =============================================================================

/// The marketplace ledger facet.
pub struct MarketFacet {
    payments: Arc<dyn PaymentAsset>,
    assets: Arc<dyn AssetRegistry>,
}

impl MarketFacet {
    /// Creates the facet with its collaborator handles.
    #[must_use]
    pub fn new(payments: Arc<dyn PaymentAsset>, assets: Arc<dyn AssetRegistry>) -> Self {
        Self { payments, assets }
    }

    // -------------------------------------------------------------------------
    // WRITE OPERATIONS
    // -------------------------------------------------------------------------

    fn list_asset(
        &self,
        ctx: &mut CallContext<'_>,
        args: &ListAssetArgs,
    ) -> Result<Hash, MarketError> {
        if args.price.is_zero() {
            return Err(MarketError::ZeroPrice);
        }
        if args.collection.is_zero() {
            return Err(MarketError::InvalidAddress {
                context: "asset collection",
            });
        }

        let owner = self
            .assets
            .owner_of(ctx.store, args.collection, args.asset_id)
            .map_err(|_| MarketError::NotOwner)?;
        if owner != ctx.caller {
            return Err(MarketError::NotOwner);
        }
        if !self
            .assets
            .is_approved(ctx.store, args.collection, args.asset_id, ctx.this)
        {
            return Err(MarketError::NotApproved);
        }

        let id = listing_id(args.collection, args.asset_id);
        if ctx.store.read(|s: &MarketState| s.is_active(id)) {
            return Err(MarketError::ListingAlreadyActive);
        }

        let listing = Listing {
            seller: ctx.caller,
            collection: args.collection,
            asset_id: args.asset_id,
            price: args.price,
            active: true,
            created_at: ctx.timestamp,
        };
        ctx.store.write::<MarketState>().insert_listing(id, listing);

        info!(
            seller = %ctx.caller,
            collection = %args.collection,
            asset_id = %args.asset_id,
            price = %args.price,
            "asset listed"
        );
        ctx.emit(Event::Listed {
            listing_id: id,
            seller: ctx.caller,
            collection: args.collection,
            asset_id: args.asset_id,
            price: args.price,
        });
        Ok(id)
    }

    fn update_price(
        &self,
        ctx: &mut CallContext<'_>,
        args: &UpdatePriceArgs,
    ) -> Result<(), MarketError> {
        if args.new_price.is_zero() {
            return Err(MarketError::ZeroPrice);
        }

        let id = listing_id(args.collection, args.asset_id);
        let listing = ctx
            .store
            .read(|s: &MarketState| s.listing(id).cloned())
            .ok_or(MarketError::ListingNotActive)?;
        if !listing.active {
            return Err(MarketError::ListingNotActive);
        }
        if listing.seller != ctx.caller {
            return Err(MarketError::NotSeller);
        }

        ctx.store.write::<MarketState>().set_price(id, args.new_price);

        ctx.emit(Event::PriceUpdated {
            listing_id: id,
            old_price: listing.price,
            new_price: args.new_price,
        });
        Ok(())
    }

    fn purchase_asset(
        &self,
        ctx: &mut CallContext<'_>,
        args: &AssetRefArgs,
    ) -> Result<(), MarketError> {
        {
            let state = ctx.store.write::<MarketState>();
            if state.entered {
                return Err(MarketError::ReentrantCall);
            }
            state.entered = true;
        }
        // The guard must clear on every exit path; the facet cannot assume
        // a failed call is always unwound by the host.
        let result = self.purchase_inner(ctx, args);
        ctx.store.write::<MarketState>().entered = false;
        result
    }

    fn purchase_inner(
        &self,
        ctx: &mut CallContext<'_>,
        args: &AssetRefArgs,
    ) -> Result<(), MarketError> {
        let id = listing_id(args.collection, args.asset_id);
        let listing = ctx
            .store
            .read(|s: &MarketState| s.listing(id).cloned())
            .ok_or(MarketError::ListingNotActive)?;
        if !listing.active {
            return Err(MarketError::ListingNotActive);
        }

        let buyer = ctx.caller;
        if buyer == listing.seller {
            return Err(MarketError::CannotBuyOwnNft);
        }

        let config = ctx.store.read(|c: &MarketConfig| *c);
        if config.payment_asset.is_zero() {
            return Err(MarketError::PaymentAssetNotConfigured);
        }

        let split = split_payment(listing.price, config.fee_bps)?;

        // Seller payment, then fee, then the asset itself. Any failure
        // aborts the purchase and the host rollback restores all three
        // ledgers together.
        self.payments
            .transfer(
                ctx.store,
                config.payment_asset,
                buyer,
                listing.seller,
                split.seller_amount,
            )
            .map_err(|source| MarketError::PaymentToSellerFailed { source })?;

        if !split.fee.is_zero() {
            self.payments
                .transfer(
                    ctx.store,
                    config.payment_asset,
                    buyer,
                    config.fee_recipient,
                    split.fee,
                )
                .map_err(|source| MarketError::FeePaymentFailed { source })?;
        }

        self.assets
            .transfer(
                ctx.store,
                listing.collection,
                listing.asset_id,
                listing.seller,
                buyer,
                ctx.this,
            )
            .map_err(|source| MarketError::NftTransferFailed { source })?;

        {
            let state = ctx.store.write::<MarketState>();
            state.deactivate(id);

            let seller_stats = state.stats_mut(listing.seller);
            seller_stats.total_sales = seller_stats
                .total_sales
                .checked_add(listing.price)
                .ok_or(MarketError::MathOverflow)?;
            let buyer_stats = state.stats_mut(buyer);
            buyer_stats.total_purchases = buyer_stats
                .total_purchases
                .checked_add(listing.price)
                .ok_or(MarketError::MathOverflow)?;
        }

        info!(
            %buyer,
            seller = %listing.seller,
            price = %listing.price,
            fee = %split.fee,
            "asset purchased"
        );
        ctx.emit(Event::Purchased {
            listing_id: id,
            buyer,
            seller: listing.seller,
            price: listing.price,
            fee: split.fee,
        });
        Ok(())
    }

    fn remove_listing(
        &self,
        ctx: &mut CallContext<'_>,
        collection: Address,
        asset_id: U256,
    ) -> Result<(), MarketError> {
        let id = listing_id(collection, asset_id);
        let listing = ctx
            .store
            .read(|s: &MarketState| s.listing(id).cloned())
            .ok_or(MarketError::ListingNotActive)?;
        if !listing.active {
            return Err(MarketError::ListingNotActive);
        }
        if listing.seller != ctx.caller {
            return Err(MarketError::NotListingSeller);
        }

        ctx.store.write::<MarketState>().deactivate(id);

        ctx.emit(Event::ListingRemoved {
            listing_id: id,
            seller: listing.seller,
        });
        Ok(())
    }

    fn bulk_remove(
        &self,
        ctx: &mut CallContext<'_>,
        args: &BulkRemoveArgs,
    ) -> Result<(), MarketError> {
        if args.collections.len() != args.asset_ids.len() {
            return Err(MarketError::ArrayLengthMismatch {
                collections: args.collections.len(),
                asset_ids: args.asset_ids.len(),
            });
        }
        if args.collections.is_empty() {
            return Err(MarketError::EmptyArrays);
        }
        if args.collections.len() > limits::MAX_BULK_REMOVE {
            return Err(MarketError::MaxBulkLimitExceeded {
                count: args.collections.len(),
                max: limits::MAX_BULK_REMOVE,
            });
        }

        // Per-element failures are isolated: one bad element must not
        // block the rest of the batch.
        for (collection, asset_id) in args.collections.iter().zip(&args.asset_ids) {
            if let Err(error) = self.remove_listing(ctx, *collection, *asset_id) {
                debug!(
                    collection = %collection,
                    asset_id = %asset_id,
                    %error,
                    "bulk remove element skipped"
                );
            }
        }

        ctx.emit(Event::BulkRemoveCompleted {
            attempted: args.collections.len() as u32,
        });
        Ok(())
    }
}

// =============================================================================
// FACET IMPLEMENTATION
// =============================================================================

impl Facet for MarketFacet {
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == abi::selector(sig::LIST_ASSET) {
            let args: ListAssetArgs = abi::decode_args(input)?;
            let id = self.list_asset(ctx, &args).map_err(DispatchError::facet)?;
            abi::encode_ret(&id)
        } else if selector == abi::selector(sig::UPDATE_PRICE) {
            let args: UpdatePriceArgs = abi::decode_args(input)?;
            self.update_price(ctx, &args).map_err(DispatchError::facet)?;
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::PURCHASE_ASSET) {
            let args: AssetRefArgs = abi::decode_args(input)?;
            self.purchase_asset(ctx, &args).map_err(DispatchError::facet)?;
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::REMOVE_LISTING) {
            let args: AssetRefArgs = abi::decode_args(input)?;
            self.remove_listing(ctx, args.collection, args.asset_id)
                .map_err(DispatchError::facet)?;
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::BULK_REMOVE_LISTING) {
            let args: BulkRemoveArgs = abi::decode_args(input)?;
            self.bulk_remove(ctx, &args).map_err(DispatchError::facet)?;
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::GET_LISTING) {
            let args: AssetRefArgs = abi::decode_args(input)?;
            let id = listing_id(args.collection, args.asset_id);
            let listing = ctx.store.read(|s: &MarketState| s.listing(id).cloned());
            abi::encode_ret(&listing)
        } else if selector == abi::selector(sig::GET_LISTINGS_PAGINATED) {
            let args: PaginationArgs = abi::decode_args(input)?;
            let limit = if args.limit == 0 {
                limits::DEFAULT_PAGE_SIZE
            } else {
                usize::try_from(args.limit).unwrap_or(usize::MAX)
            };
            let offset = usize::try_from(args.offset).unwrap_or(usize::MAX);
            let page = ctx
                .store
                .read(|s: &MarketState| s.paginated(offset, limit));
            abi::encode_ret(&page)
        } else if selector == abi::selector(sig::GET_SELLER_LISTINGS) {
            let seller: Address = abi::decode_args(input)?;
            let ids = ctx
                .store
                .read(|s: &MarketState| s.seller_listings(seller));
            abi::encode_ret(&ids)
        } else if selector == abi::selector(sig::GET_USER_STATS) {
            let address: Address = abi::decode_args(input)?;
            let stats: UserStats = ctx.store.read(|s: &MarketState| s.stats_of(address));
            abi::encode_ret(&stats)
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            abi::selector(sig::LIST_ASSET),
            abi::selector(sig::UPDATE_PRICE),
            abi::selector(sig::PURCHASE_ASSET),
            abi::selector(sig::REMOVE_LISTING),
            abi::selector(sig::BULK_REMOVE_LISTING),
            abi::selector(sig::GET_LISTING),
            abi::selector(sig::GET_LISTINGS_PAGINATED),
            abi::selector(sig::GET_SELLER_LISTINGS),
            abi::selector(sig::GET_USER_STATS),
        ]
    }
}
