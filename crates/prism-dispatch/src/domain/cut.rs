//! # Cut Protocol
//!
//! The batched routing-table mutation. A cut is a list of entries (add /
//! replace / remove), applied in order, plus an optional one-shot
//! initializer call. Application here is pure table mutation; code-target
//! validation and the initializer sub-call happen in the cut facet, and
//! batch atomicity comes from the host rollback around the whole call.

use crate::domain::routes::RouteTable;
use crate::errors::DispatchError;
use prism_types::{Address, Bytes, CutAction, FacetChange, Selector};
use serde::{Deserialize, Serialize};

// =============================================================================
// CUT DESCRIPTION
// =============================================================================

/// One entry of a cut batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutEntry {
    /// Target facet. Must be the zero address for removals and a
    /// code-bearing address for adds and replaces.
    pub facet: Address,
    /// Mutation kind.
    pub action: CutAction,
    /// Selectors affected. Must be non-empty.
    pub selectors: Vec<Selector>,
}

impl CutEntry {
    /// An add entry.
    #[must_use]
    pub fn add(facet: Address, selectors: Vec<Selector>) -> Self {
        Self {
            facet,
            action: CutAction::Add,
            selectors,
        }
    }

    /// A replace entry.
    #[must_use]
    pub fn replace(facet: Address, selectors: Vec<Selector>) -> Self {
        Self {
            facet,
            action: CutAction::Replace,
            selectors,
        }
    }

    /// A remove entry. Removals never name a facet.
    #[must_use]
    pub fn remove(selectors: Vec<Selector>) -> Self {
        Self {
            facet: Address::ZERO,
            action: CutAction::Remove,
            selectors,
        }
    }
}

/// The optional one-shot initialization call issued after a cut applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initializer {
    /// Address of the module to call. Needs registered code but not a
    /// route; the call goes straight to the code registry.
    pub target: Address,
    /// Operation to invoke on the target.
    pub selector: Selector,
    /// Encoded arguments for the operation.
    pub args: Bytes,
}

// =============================================================================
// APPLICATION
// =============================================================================

/// Validates that every add/replace entry targets registered code.
///
/// Runs before any table mutation so the common failure mode (typo'd
/// address) is caught without relying on rollback.
pub fn validate_code_targets(
    entries: &[CutEntry],
    has_code: impl Fn(Address) -> bool,
) -> Result<(), DispatchError> {
    for entry in entries {
        match entry.action {
            CutAction::Add | CutAction::Replace => {
                if !has_code(entry.facet) {
                    return Err(DispatchError::NoCodeAtTarget {
                        target: entry.facet,
                    });
                }
            }
            CutAction::Remove => {}
        }
    }
    Ok(())
}

/// Applies a cut batch to the routing table, in entry order.
///
/// Any failure aborts with the table possibly part-mutated; the caller's
/// host rollback discards the partial state together with everything else
/// in the failed invocation.
pub fn apply_cut(table: &mut RouteTable, entries: &[CutEntry]) -> Result<(), DispatchError> {
    for entry in entries {
        if entry.selectors.is_empty() {
            return Err(DispatchError::EmptySelectors { facet: entry.facet });
        }
        match entry.action {
            CutAction::Add => table.add(entry.facet, &entry.selectors)?,
            CutAction::Replace => table.replace(entry.facet, &entry.selectors)?,
            CutAction::Remove => {
                if !entry.facet.is_zero() {
                    return Err(DispatchError::RemoveTargetMustBeEmpty {
                        target: entry.facet,
                    });
                }
                table.remove(&entry.selectors)?;
            }
        }
    }
    Ok(())
}

/// Converts a batch into its event description.
#[must_use]
pub fn describe_cut(entries: &[CutEntry]) -> Vec<FacetChange> {
    entries
        .iter()
        .map(|entry| FacetChange {
            facet: entry.facet,
            action: entry.action,
            selectors: entry.selectors.clone(),
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
