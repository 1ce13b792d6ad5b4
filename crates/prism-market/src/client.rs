//! # Typed Client Surface
//!
//! Extension trait giving the dispatcher typed marketplace calls. Every
//! method encodes its arguments, routes through `execute`, and decodes the
//! return — identical semantics to a raw selector call, just readable.

use crate::domain::{Listing, UserStats};
use crate::facets::admin::sig as admin_sig;
use crate::facets::market::sig as market_sig;
use crate::facets::{AssetRefArgs, BulkRemoveArgs, ListAssetArgs, PaginationArgs, UpdatePriceArgs};
use prism_dispatch::abi;
use prism_dispatch::context::CallEnv;
use prism_dispatch::dispatcher::Dispatcher;
use prism_dispatch::errors::DispatchError;
use prism_types::{Address, Hash, U256};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn call<A, R>(
    dispatcher: &mut Dispatcher,
    env: CallEnv,
    signature: &str,
    args: &A,
) -> Result<R, DispatchError>
where
    A: Serialize,
    R: DeserializeOwned,
{
    let (selector, payload) = abi::encode_call(signature, args)?;
    let output = dispatcher.execute(env, selector, payload.as_slice())?;
    abi::decode_ret(&output)
}

/// Typed marketplace and admin calls, routed through the dispatcher.
pub trait MarketClient {
    /// Creates an active listing; returns its id.
    fn list_asset(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
        price: U256,
    ) -> Result<Hash, DispatchError>;

    /// Changes the price of an active listing.
    fn update_price(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
        new_price: U256,
    ) -> Result<(), DispatchError>;

    /// Buys an active listing at its asking price.
    fn purchase_asset(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
    ) -> Result<(), DispatchError>;

    /// Deactivates an active listing.
    fn remove_listing(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
    ) -> Result<(), DispatchError>;

    /// Deactivates a batch of listings, isolating per-element failures.
    fn bulk_remove_listing(
        &mut self,
        env: CallEnv,
        collections: Vec<Address>,
        asset_ids: Vec<U256>,
    ) -> Result<(), DispatchError>;

    /// Looks up one listing record.
    fn get_listing(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
    ) -> Result<Option<Listing>, DispatchError>;

    /// Offset+limit page over the global index.
    fn get_listings_paginated(
        &mut self,
        env: CallEnv,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Listing>, DispatchError>;

    /// Active listing ids of one seller.
    fn get_seller_listings(
        &mut self,
        env: CallEnv,
        seller: Address,
    ) -> Result<Vec<Hash>, DispatchError>;

    /// Running totals of one address.
    fn get_user_stats(&mut self, env: CallEnv, address: Address)
        -> Result<UserStats, DispatchError>;

    /// Sets the payment asset. Owner-only.
    fn set_payment_asset(&mut self, env: CallEnv, asset: Address) -> Result<(), DispatchError>;

    /// Sets the fee rate. Owner-only.
    fn set_fee(&mut self, env: CallEnv, fee_bps: u16) -> Result<(), DispatchError>;

    /// Sets the fee recipient. Owner-only.
    fn set_fee_recipient(&mut self, env: CallEnv, recipient: Address)
        -> Result<(), DispatchError>;

    /// Current payment asset.
    fn payment_asset(&mut self, env: CallEnv) -> Result<Address, DispatchError>;

    /// Current fee rate.
    fn fee_bps(&mut self, env: CallEnv) -> Result<u16, DispatchError>;

    /// Current fee recipient.
    fn fee_recipient(&mut self, env: CallEnv) -> Result<Address, DispatchError>;
}

impl MarketClient for Dispatcher {
    fn list_asset(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
        price: U256,
    ) -> Result<Hash, DispatchError> {
        call(
            self,
            env,
            market_sig::LIST_ASSET,
            &ListAssetArgs {
                collection,
                asset_id,
                price,
            },
        )
    }

    fn update_price(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
        new_price: U256,
    ) -> Result<(), DispatchError> {
        call(
            self,
            env,
            market_sig::UPDATE_PRICE,
            &UpdatePriceArgs {
                collection,
                asset_id,
                new_price,
            },
        )
    }

    fn purchase_asset(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
    ) -> Result<(), DispatchError> {
        call(
            self,
            env,
            market_sig::PURCHASE_ASSET,
            &AssetRefArgs {
                collection,
                asset_id,
            },
        )
    }

    fn remove_listing(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
    ) -> Result<(), DispatchError> {
        call(
            self,
            env,
            market_sig::REMOVE_LISTING,
            &AssetRefArgs {
                collection,
                asset_id,
            },
        )
    }

    fn bulk_remove_listing(
        &mut self,
        env: CallEnv,
        collections: Vec<Address>,
        asset_ids: Vec<U256>,
    ) -> Result<(), DispatchError> {
        call(
            self,
            env,
            market_sig::BULK_REMOVE_LISTING,
            &BulkRemoveArgs {
                collections,
                asset_ids,
            },
        )
    }

    fn get_listing(
        &mut self,
        env: CallEnv,
        collection: Address,
        asset_id: U256,
    ) -> Result<Option<Listing>, DispatchError> {
        call(
            self,
            env,
            market_sig::GET_LISTING,
            &AssetRefArgs {
                collection,
                asset_id,
            },
        )
    }

    fn get_listings_paginated(
        &mut self,
        env: CallEnv,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Listing>, DispatchError> {
        call(
            self,
            env,
            market_sig::GET_LISTINGS_PAGINATED,
            &PaginationArgs { offset, limit },
        )
    }

    fn get_seller_listings(
        &mut self,
        env: CallEnv,
        seller: Address,
    ) -> Result<Vec<Hash>, DispatchError> {
        call(self, env, market_sig::GET_SELLER_LISTINGS, &seller)
    }

    fn get_user_stats(
        &mut self,
        env: CallEnv,
        address: Address,
    ) -> Result<UserStats, DispatchError> {
        call(self, env, market_sig::GET_USER_STATS, &address)
    }

    fn set_payment_asset(&mut self, env: CallEnv, asset: Address) -> Result<(), DispatchError> {
        call(self, env, admin_sig::SET_PAYMENT_ASSET, &asset)
    }

    fn set_fee(&mut self, env: CallEnv, fee_bps: u16) -> Result<(), DispatchError> {
        call(self, env, admin_sig::SET_FEE, &fee_bps)
    }

    fn set_fee_recipient(
        &mut self,
        env: CallEnv,
        recipient: Address,
    ) -> Result<(), DispatchError> {
        call(self, env, admin_sig::SET_FEE_RECIPIENT, &recipient)
    }

    fn payment_asset(&mut self, env: CallEnv) -> Result<Address, DispatchError> {
        call(self, env, admin_sig::PAYMENT_ASSET, &())
    }

    fn fee_bps(&mut self, env: CallEnv) -> Result<u16, DispatchError> {
        call(self, env, admin_sig::FEE_BPS, &())
    }

    fn fee_recipient(&mut self, env: CallEnv) -> Result<Address, DispatchError> {
        call(self, env, admin_sig::FEE_RECIPIENT, &())
    }
}
