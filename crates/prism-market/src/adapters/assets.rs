//! # In-Memory Asset Registry
//!
//! Ownership and approval ledger for non-fungible assets, living in its
//! own namespace of the shared store. Approvals are per-asset and consumed
//! by transfer, so an approval revoked (or spent) between listing and
//! purchase makes the purchase's final transfer step fail.

use crate::errors::AssetError;
use crate::ports::AssetRegistry;
use prism_storage::{SharedStore, StorageNamespace};
use prism_types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owners and approvals per (collection, asset id).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetLedger {
    owners: HashMap<(Address, U256), Address>,
    approvals: HashMap<(Address, U256), Address>,
}

impl StorageNamespace for AssetLedger {
    const TAG: &'static str = "prism.assets.registry";
}

/// Store-backed asset-registry adapter.
#[derive(Clone, Copy, Debug, Default)]
pub struct InMemoryAssetRegistry;

impl InMemoryAssetRegistry {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates an asset owned by `owner`. Fixture seeding, host-level.
    pub fn mint_asset(
        &self,
        store: &mut SharedStore,
        collection: Address,
        asset_id: U256,
        owner: Address,
    ) {
        store
            .write::<AssetLedger>()
            .owners
            .insert((collection, asset_id), owner);
    }

    /// Grants `operator` the right to move one asset.
    pub fn approve(
        &self,
        store: &mut SharedStore,
        collection: Address,
        asset_id: U256,
        operator: Address,
    ) {
        store
            .write::<AssetLedger>()
            .approvals
            .insert((collection, asset_id), operator);
    }

    /// Revokes any approval on one asset.
    pub fn revoke_approval(&self, store: &mut SharedStore, collection: Address, asset_id: U256) {
        store
            .write::<AssetLedger>()
            .approvals
            .remove(&(collection, asset_id));
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn owner_of(
        &self,
        store: &SharedStore,
        collection: Address,
        asset_id: U256,
    ) -> Result<Address, AssetError> {
        store.read(|ledger: &AssetLedger| {
            ledger
                .owners
                .get(&(collection, asset_id))
                .copied()
                .ok_or(AssetError::UnknownAsset {
                    collection,
                    asset_id,
                })
        })
    }

    fn is_approved(
        &self,
        store: &SharedStore,
        collection: Address,
        asset_id: U256,
        operator: Address,
    ) -> bool {
        store.read(|ledger: &AssetLedger| {
            ledger.approvals.get(&(collection, asset_id)) == Some(&operator)
        })
    }

    fn transfer(
        &self,
        store: &mut SharedStore,
        collection: Address,
        asset_id: U256,
        from: Address,
        to: Address,
        operator: Address,
    ) -> Result<(), AssetError> {
        if to.is_zero() {
            return Err(AssetError::ZeroAccount);
        }

        let ledger = store.write::<AssetLedger>();
        let owner = ledger
            .owners
            .get(&(collection, asset_id))
            .copied()
            .ok_or(AssetError::UnknownAsset {
                collection,
                asset_id,
            })?;
        if owner != from {
            return Err(AssetError::WrongOwner {
                account: from,
                asset_id,
            });
        }

        let approved = ledger.approvals.get(&(collection, asset_id)) == Some(&operator);
        if operator != owner && !approved {
            return Err(AssetError::NotOperator { operator, asset_id });
        }

        ledger.owners.insert((collection, asset_id), to);
        ledger.approvals.remove(&(collection, asset_id));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
