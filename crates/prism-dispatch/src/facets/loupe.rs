//! # Loupe Facet
//!
//! Read-only introspection over the routing table: which facets exist,
//! which selectors each implements, and which facet answers a selector.

use crate::abi;
use crate::context::CallContext;
use crate::domain::RouteTable;
use crate::errors::DispatchError;
use crate::ports::Facet;
use prism_types::{Address, Bytes, Selector};
use serde::{Deserialize, Serialize};

/// Operation signatures.
pub mod sig {
    /// Full facet inventory: every facet with its selectors.
    pub const FACETS: &str = "dispatch.facets";
    /// All facet addresses, in list order.
    pub const FACET_ADDRESSES: &str = "dispatch.facetAddresses";
    /// Selectors implemented by one facet.
    pub const FACET_SELECTORS: &str = "dispatch.facetSelectors";
    /// The facet mapped to one selector (zero address when unmapped).
    pub const FACET_ADDRESS: &str = "dispatch.facetAddress";
}

/// One facet and its selectors, as reported by the inventory query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetInfo {
    /// The facet's address.
    pub address: Address,
    /// Selectors currently mapped to it.
    pub selectors: Vec<Selector>,
}

/// The built-in introspection facet.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoupeFacet;

impl LoupeFacet {
    /// Creates the facet.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Facet for LoupeFacet {
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == abi::selector(sig::FACETS) {
            let inventory = ctx.store.read(|table: &RouteTable| {
                table
                    .facet_addresses()
                    .iter()
                    .map(|&address| FacetInfo {
                        address,
                        selectors: table
                            .selectors_of(address)
                            .map(<[Selector]>::to_vec)
                            .unwrap_or_default(),
                    })
                    .collect::<Vec<_>>()
            });
            abi::encode_ret(&inventory)
        } else if selector == abi::selector(sig::FACET_ADDRESSES) {
            let addresses = ctx
                .store
                .read(|table: &RouteTable| table.facet_addresses().to_vec());
            abi::encode_ret(&addresses)
        } else if selector == abi::selector(sig::FACET_SELECTORS) {
            let facet: Address = abi::decode_args(input)?;
            let selectors = ctx.store.read(|table: &RouteTable| {
                table
                    .selectors_of(facet)
                    .map(<[Selector]>::to_vec)
                    .unwrap_or_default()
            });
            abi::encode_ret(&selectors)
        } else if selector == abi::selector(sig::FACET_ADDRESS) {
            let wanted: Selector = abi::decode_args(input)?;
            let address = ctx
                .store
                .read(|table: &RouteTable| table.resolve(wanted))
                .unwrap_or(Address::ZERO);
            abi::encode_ret(&address)
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            abi::selector(sig::FACETS),
            abi::selector(sig::FACET_ADDRESSES),
            abi::selector(sig::FACET_SELECTORS),
            abi::selector(sig::FACET_ADDRESS),
        ]
    }
}
