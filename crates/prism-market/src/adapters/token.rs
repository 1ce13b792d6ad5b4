//! # In-Memory Payment Asset
//!
//! Balance ledger living in its own namespace of the shared store. Because
//! the ledger is store-resident, a purchase that fails after a payment
//! step has its balance changes rolled back by the host together with the
//! marketplace state.

use crate::errors::AssetError;
use crate::ports::PaymentAsset;
use prism_storage::{SharedStore, StorageNamespace};
use prism_types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balances per (payment asset, holder).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenLedger {
    balances: HashMap<(Address, Address), U256>,
}

impl StorageNamespace for TokenLedger {
    const TAG: &'static str = "prism.assets.token";
}

impl TokenLedger {
    fn balance(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or_else(U256::zero)
    }
}

/// Store-backed fungible-asset adapter.
#[derive(Clone, Copy, Debug, Default)]
pub struct InMemoryToken;

impl InMemoryToken {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Credits a holder. Fixture seeding, host-level.
    pub fn mint(&self, store: &mut SharedStore, token: Address, holder: Address, amount: U256) {
        let ledger = store.write::<TokenLedger>();
        let balance = ledger.balance(token, holder);
        ledger
            .balances
            .insert((token, holder), balance.saturating_add(amount));
    }
}

impl PaymentAsset for InMemoryToken {
    fn transfer(
        &self,
        store: &mut SharedStore,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), AssetError> {
        if from.is_zero() || to.is_zero() {
            return Err(AssetError::ZeroAccount);
        }
        if amount.is_zero() {
            return Ok(());
        }

        let ledger = store.write::<TokenLedger>();
        let available = ledger.balance(token, from);
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        ledger.balances.insert((token, from), available - amount);
        let to_balance = ledger.balance(token, to);
        ledger
            .balances
            .insert((token, to), to_balance.saturating_add(amount));
        Ok(())
    }

    fn balance_of(&self, store: &SharedStore, token: Address, holder: Address) -> U256 {
        store.read(|ledger: &TokenLedger| ledger.balance(token, holder))
    }
}

// =============================================================================
// TESTS
// =============================================================================
