//! # Routing Table
//!
//! The bidirectional selector ↔ facet mapping plus the ordered facet list
//! used for introspection. Removal is O(1) via swap-with-last at both
//! levels: a facet's selector list and the global facet list.
//!
//! Mutation methods validate before each single-selector step but may leave
//! the table partially mutated when a later step fails; batch atomicity is
//! the host's job (the dispatcher snapshots the store before every call and
//! restores it on failure).

use crate::errors::DispatchError;
use prism_storage::StorageNamespace;
use prism_types::{Address, Selector};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

// =============================================================================
// ENTRIES
// =============================================================================

/// One selector's route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntry {
    /// Facet implementing the selector.
    pub facet: Address,
    /// Index of the selector inside its facet's selector list. Kept
    /// consistent with the list so removal can swap-and-pop.
    pub selector_position: u32,
}

/// Per-facet bookkeeping: its selectors and its slot in the global list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRecord {
    /// The facet's address.
    pub address: Address,
    /// Selectors currently mapped to this facet. Order is maintenance
    /// order, perturbed by swap-and-pop removals.
    pub selectors: Vec<Selector>,
    /// Index of the facet inside the global facet list.
    pub list_position: u32,
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// The routing table region.
///
/// A record exists exactly while its facet has at least one mapped
/// selector; the global facet list mirrors the record set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteTable {
    routes: HashMap<Selector, RoutingEntry>,
    records: HashMap<Address, FacetRecord>,
    facet_list: Vec<Address>,
}

impl StorageNamespace for RouteTable {
    const TAG: &'static str = "prism.dispatch.routes";
}

impl RouteTable {
    /// Resolves the facet implementing a selector.
    #[must_use]
    pub fn resolve(&self, selector: Selector) -> Option<Address> {
        self.routes.get(&selector).map(|entry| entry.facet)
    }

    /// Returns a selector's full routing entry.
    #[must_use]
    pub fn entry(&self, selector: Selector) -> Option<&RoutingEntry> {
        self.routes.get(&selector)
    }

    /// All facet addresses with at least one mapped selector, in list order.
    #[must_use]
    pub fn facet_addresses(&self) -> &[Address] {
        &self.facet_list
    }

    /// A facet's bookkeeping record, if it has any selectors.
    #[must_use]
    pub fn record(&self, facet: Address) -> Option<&FacetRecord> {
        self.records.get(&facet)
    }

    /// Selectors currently mapped to a facet.
    #[must_use]
    pub fn selectors_of(&self, facet: Address) -> Option<&[Selector]> {
        self.records.get(&facet).map(|r| r.selectors.as_slice())
    }

    /// Number of mapped selectors.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Iterates all routes. Used by the invariant checks.
    pub fn iter_routes(&self) -> impl Iterator<Item = (&Selector, &RoutingEntry)> {
        self.routes.iter()
    }

    // -------------------------------------------------------------------------
    // MUTATION
    // -------------------------------------------------------------------------

    /// Maps currently-unmapped selectors to a facet.
    ///
    /// The facet's record (and its slot in the global list) is created on
    /// its first selector.
    pub fn add(&mut self, facet: Address, selectors: &[Selector]) -> Result<(), DispatchError> {
        if facet.is_zero() {
            return Err(DispatchError::InvalidAddress {
                context: "add target facet",
            });
        }
        for &selector in selectors {
            self.add_one(facet, selector)?;
        }
        Ok(())
    }

    /// Re-maps currently-mapped selectors to a different facet.
    ///
    /// The old mapping is removed before the new one is installed, so a
    /// selector is never double-mapped, even transiently.
    pub fn replace(&mut self, facet: Address, selectors: &[Selector]) -> Result<(), DispatchError> {
        if facet.is_zero() {
            return Err(DispatchError::InvalidAddress {
                context: "replace target facet",
            });
        }
        for &selector in selectors {
            let current = self
                .routes
                .get(&selector)
                .ok_or(DispatchError::SelectorNotFound { selector })?
                .facet;
            if current == facet {
                return Err(DispatchError::RedundantReplace { selector, facet });
            }
            self.remove_one(selector)?;
            self.add_one(facet, selector)?;
        }
        Ok(())
    }

    /// Unmaps currently-mapped selectors.
    pub fn remove(&mut self, selectors: &[Selector]) -> Result<(), DispatchError> {
        for &selector in selectors {
            self.remove_one(selector)?;
        }
        Ok(())
    }

    fn add_one(&mut self, facet: Address, selector: Selector) -> Result<(), DispatchError> {
        if let Some(existing) = self.routes.get(&selector) {
            return Err(DispatchError::DuplicateSelector {
                selector,
                facet: existing.facet,
            });
        }

        let next_list_position = self.facet_list.len() as u32;
        let record = match self.records.entry(facet) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                self.facet_list.push(facet);
                vacant.insert(FacetRecord {
                    address: facet,
                    selectors: Vec::new(),
                    list_position: next_list_position,
                })
            }
        };

        let selector_position = record.selectors.len() as u32;
        record.selectors.push(selector);
        self.routes.insert(
            selector,
            RoutingEntry {
                facet,
                selector_position,
            },
        );
        Ok(())
    }

    fn remove_one(&mut self, selector: Selector) -> Result<(), DispatchError> {
        let entry = self
            .routes
            .remove(&selector)
            .ok_or(DispatchError::SelectorNotFound { selector })?;

        let record = self.records.get_mut(&entry.facet).ok_or_else(|| {
            DispatchError::Internal(format!(
                "route for {selector} names facet {} without a record",
                entry.facet
            ))
        })?;

        // Swap the removed selector with the last one and pop, fixing the
        // moved selector's recorded position.
        let position = entry.selector_position as usize;
        let last = record.selectors.len() - 1;
        if position != last {
            let moved = record.selectors[last];
            record.selectors.swap(position, last);
            if let Some(moved_entry) = self.routes.get_mut(&moved) {
                moved_entry.selector_position = position as u32;
            }
        }
        record.selectors.pop();

        // A facet with zero selectors must not remain listed: swap-and-pop
        // the global list as well.
        if record.selectors.is_empty() {
            let list_position = record.list_position as usize;
            self.records.remove(&entry.facet);

            let last_index = self.facet_list.len() - 1;
            if list_position != last_index {
                let moved_facet = self.facet_list[last_index];
                self.facet_list.swap(list_position, last_index);
                if let Some(moved_record) = self.records.get_mut(&moved_facet) {
                    moved_record.list_position = list_position as u32;
                }
            }
            self.facet_list.pop();
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
