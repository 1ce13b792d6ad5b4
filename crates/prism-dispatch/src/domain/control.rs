//! # Control Ownership
//!
//! The single privileged address with exclusive rights to mutate the
//! routing table and administrative configuration. Set at dispatcher
//! construction, replaceable only by itself.

use crate::errors::DispatchError;
use prism_storage::{SharedStore, StorageNamespace};
use prism_types::Address;
use serde::{Deserialize, Serialize};

/// The control-owner region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    /// The current control owner.
    pub owner: Address,
}

impl StorageNamespace for ControlState {
    const TAG: &'static str = "prism.dispatch.control";
}

/// Fails with `NotAuthorized` unless the caller is the control owner.
pub fn enforce_owner(store: &SharedStore, caller: Address) -> Result<(), DispatchError> {
    let owner = store.read(|state: &ControlState| state.owner);
    if owner == caller {
        Ok(())
    } else {
        Err(DispatchError::NotAuthorized { caller })
    }
}

// =============================================================================
// TESTS
// =============================================================================
