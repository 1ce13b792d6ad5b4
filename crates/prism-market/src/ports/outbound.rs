//! # Driven Ports (Outbound)
//!
//! The marketplace's external collaborators, as narrow capability
//! interfaces: move value, answer ownership, move an asset. Adapters keep
//! their ledgers in namespaces of the same shared store, so the host
//! rollback that guards a purchase also restores collaborator state.

use crate::errors::AssetError;
use prism_storage::SharedStore;
use prism_types::{Address, U256};

// =============================================================================
// PAYMENT ASSET
// =============================================================================

/// Fungible value transfer: move `amount` from A to B, fail loudly on
/// insufficiency.
pub trait PaymentAsset: Send + Sync {
    /// Moves value between accounts of one payment asset.
    fn transfer(
        &self,
        store: &mut SharedStore,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AssetError>;

    /// Current balance of a holder.
    fn balance_of(&self, store: &SharedStore, token: Address, holder: Address) -> U256;
}

// =============================================================================
// ASSET REGISTRY
// =============================================================================

/// Non-fungible asset custody: ownership queries, approval checks, and
/// operator-mediated transfer.
pub trait AssetRegistry: Send + Sync {
    /// Current owner of an asset.
    fn owner_of(
        &self,
        store: &SharedStore,
        collection: Address,
        asset_id: U256,
    ) -> Result<Address, AssetError>;

    /// Returns true if `operator` may move the asset on the owner's
    /// behalf.
    fn is_approved(
        &self,
        store: &SharedStore,
        collection: Address,
        asset_id: U256,
        operator: Address,
    ) -> bool;

    /// Moves an asset from its owner to a recipient. `operator` must be
    /// the owner or hold an approval; any approval is consumed by the
    /// transfer.
    fn transfer(
        &self,
        store: &mut SharedStore,
        collection: Address,
        asset_id: U256,
        from: Address,
        to: Address,
        operator: Address,
    ) -> Result<(), AssetError>;
}
