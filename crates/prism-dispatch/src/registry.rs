//! # Facet Registry
//!
//! The code space: address → installed facet implementation. Installation
//! is the analogue of deployment and is host-level (not routed, not rolled
//! back); making an installed facet *reachable* is the cut protocol's job.
//! Code is immutable once installed — upgrades install new code at a new
//! address and re-route selectors.

use crate::errors::DispatchError;
use crate::ports::Facet;
use prism_types::Address;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Address-indexed facet code.
#[derive(Clone, Default)]
pub struct FacetRegistry {
    facets: HashMap<Address, Arc<dyn Facet>>,
}

impl FacetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs code at an address.
    ///
    /// Fails with `InvalidAddress` for the zero address and
    /// `CodeAlreadyRegistered` if the address is occupied.
    pub fn install(&mut self, address: Address, facet: Arc<dyn Facet>) -> Result<(), DispatchError> {
        if address.is_zero() {
            return Err(DispatchError::InvalidAddress {
                context: "facet code address",
            });
        }
        if self.facets.contains_key(&address) {
            return Err(DispatchError::CodeAlreadyRegistered { address });
        }
        self.facets.insert(address, facet);
        Ok(())
    }

    /// Returns the code installed at an address.
    #[must_use]
    pub fn code_at(&self, address: Address) -> Option<Arc<dyn Facet>> {
        self.facets.get(&address).cloned()
    }

    /// Returns true if executable code is installed at the address.
    #[must_use]
    pub fn has_code(&self, address: Address) -> bool {
        self.facets.contains_key(&address)
    }

    /// Number of installed facets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Returns true if nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl fmt::Debug for FacetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetRegistry")
            .field("installed", &self.facets.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
