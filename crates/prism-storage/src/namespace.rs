//! # Namespace Derivation
//!
//! Deterministic region identifiers. A namespace is named by a constant
//! human-readable tag; its identifier is the Keccak-256 digest of that tag.
//! Derivation is a pure function of the tag, so every facet referencing the
//! same tag computes the same region on every call.

use prism_types::{keccak256, Hash};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NAMESPACE ID
// =============================================================================

/// Identifier of one storage region.
///
/// Collision resistance of Keccak-256 guarantees two distinct tags never
/// share a region.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceId(Hash);

impl NamespaceId {
    /// Derives the identifier for a tag.
    #[must_use]
    pub fn derive(tag: &str) -> Self {
        Self(keccak256(tag.as_bytes()))
    }

    /// Returns the underlying digest.
    #[must_use]
    pub const fn as_hash(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.0)
    }
}

// =============================================================================
// STORAGE NAMESPACE TRAIT
// =============================================================================

/// Binds a region type to its constant tag.
///
/// Implementors are the logical storage groups of the system (routing
/// table, control state, marketplace ledger, collaborator ledgers). The
/// contract is one type per tag: a tag must be bound to exactly one Rust
/// type across the whole build, the same way a hashed storage slot layout
/// must be declared once.
///
/// A region that was never written reads as `Default`.
pub trait StorageNamespace: Default + Clone + Send + Sync + 'static {
    /// The constant human-readable tag this region is derived from.
    const TAG: &'static str;

    /// The derived region identifier.
    #[must_use]
    fn id() -> NamespaceId {
        NamespaceId::derive(Self::TAG)
    }
}

// =============================================================================
// TESTS
// =============================================================================
