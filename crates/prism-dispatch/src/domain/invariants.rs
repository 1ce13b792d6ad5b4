//! # Routing Invariants
//!
//! Consistency checks over the routing table. The mutation code maintains
//! these by construction; the checks exist so tests (and debug assertions
//! at upgrade time) can prove it after arbitrary cut sequences.

use crate::domain::routes::RouteTable;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Every route's facet has a record, and that record contains the selector.
#[must_use]
pub fn check_route_record_agreement(table: &RouteTable) -> bool {
    table.iter_routes().all(|(selector, entry)| {
        table
            .record(entry.facet)
            .is_some_and(|record| record.selectors.contains(selector))
    })
}

/// Every selector's recorded position matches its actual index in its
/// facet's selector list.
#[must_use]
pub fn check_position_consistency(table: &RouteTable) -> bool {
    table.facet_addresses().iter().all(|&facet| {
        let Some(record) = table.record(facet) else {
            return false;
        };
        record.selectors.iter().enumerate().all(|(index, &selector)| {
            table.entry(selector).is_some_and(|entry| {
                entry.facet == facet && entry.selector_position as usize == index
            })
        })
    })
}

/// No facet record with zero selectors exists.
#[must_use]
pub fn check_no_empty_facets(table: &RouteTable) -> bool {
    table
        .facet_addresses()
        .iter()
        .all(|&facet| table.record(facet).is_some_and(|r| !r.selectors.is_empty()))
}

/// The global facet list and the record set mirror each other, and every
/// record's list position matches its actual index.
#[must_use]
pub fn check_facet_list_consistency(table: &RouteTable) -> bool {
    table
        .facet_addresses()
        .iter()
        .enumerate()
        .all(|(index, &facet)| {
            table
                .record(facet)
                .is_some_and(|record| record.list_position as usize == index)
        })
}

/// Checks all routing invariants at once.
#[must_use]
pub fn check_all_route_invariants(table: &RouteTable) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_route_record_agreement(table) {
        violations.push(InvariantViolation::RouteRecordMismatch);
    }
    if !check_position_consistency(table) {
        violations.push(InvariantViolation::PositionMismatch);
    }
    if !check_no_empty_facets(table) {
        violations.push(InvariantViolation::EmptyFacetRecord);
    }
    if !check_facet_list_consistency(table) {
        violations.push(InvariantViolation::FacetListMismatch);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all routing invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific routing-table inconsistency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A route names a facet whose record is missing the selector.
    RouteRecordMismatch,
    /// A recorded selector position disagrees with the list index.
    PositionMismatch,
    /// A facet record exists with zero selectors.
    EmptyFacetRecord,
    /// The global facet list disagrees with the record set.
    FacetListMismatch,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RouteRecordMismatch => write!(f, "route and facet record disagree"),
            Self::PositionMismatch => write!(f, "selector position disagrees with list index"),
            Self::EmptyFacetRecord => write!(f, "facet record with zero selectors"),
            Self::FacetListMismatch => write!(f, "facet list disagrees with record set"),
        }
    }
}

/// Convenience used by tests after successful cuts.
#[must_use]
pub fn table_is_consistent(table: &RouteTable) -> bool {
    check_all_route_invariants(table).is_valid()
}

// =============================================================================
// TESTS
// =============================================================================
