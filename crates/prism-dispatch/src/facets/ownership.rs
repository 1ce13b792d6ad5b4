//! # Ownership Facet
//!
//! Reads and transfers the control owner. Transfer is restricted to the
//! current owner; the zero address is never a valid owner.

use crate::abi;
use crate::context::CallContext;
use crate::domain::{enforce_owner, ControlState};
use crate::errors::DispatchError;
use crate::ports::Facet;
use prism_types::{Address, Bytes, Event, Selector};
use tracing::info;

/// Operation signatures.
pub mod sig {
    /// Current control owner.
    pub const OWNER: &str = "dispatch.owner";
    /// Hand control to a new owner. Owner-only.
    pub const TRANSFER_CONTROL: &str = "dispatch.transferControl";
}

/// The built-in ownership facet.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnershipFacet;

impl OwnershipFacet {
    /// Creates the facet.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Facet for OwnershipFacet {
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == abi::selector(sig::OWNER) {
            let owner = ctx.store.read(|state: &ControlState| state.owner);
            abi::encode_ret(&owner)
        } else if selector == abi::selector(sig::TRANSFER_CONTROL) {
            enforce_owner(ctx.store, ctx.caller)?;
            let new_owner: Address = abi::decode_args(input)?;
            if new_owner.is_zero() {
                return Err(DispatchError::InvalidAddress {
                    context: "new control owner",
                });
            }

            let state = ctx.store.write::<ControlState>();
            let previous_owner = state.owner;
            state.owner = new_owner;

            info!(%previous_owner, %new_owner, "control transferred");
            ctx.emit(Event::OwnershipTransferred {
                previous_owner,
                new_owner,
            });
            abi::encode_ret(&())
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            abi::selector(sig::OWNER),
            abi::selector(sig::TRANSFER_CONTROL),
        ]
    }
}
