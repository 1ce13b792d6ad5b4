//! # Prism Storage - Namespaced Shared Store
//!
//! One mutable state space shared by every facet, partitioned into regions
//! addressed by hashed tags. This is what lets independently compiled
//! modules share storage safely without a common base layout: a facet only
//! needs its tag constant to find its region, and two distinct tags can
//! never land on the same region.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Disjoint regions: distinct tags never collide | Keccak-256 derivation in `namespace.rs` |
//! | Pure derivation: same tag, same region, every call | `NamespaceId::derive` has no runtime state |
//! | One type per tag | documented contract of `StorageNamespace`, checked on every access |
//! | Whole-store rollback restores every region | `SharedStore::snapshot` / `restore` |
//!
//! ## Isolation Caveat
//!
//! Isolation between facets is by convention only: any code holding a
//! mutable store reference may open any namespace it knows the tag for.
//! The platform does not enforce per-facet write boundaries.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod namespace;
pub mod store;

pub use namespace::{NamespaceId, StorageNamespace};
pub use store::{SharedStore, StoreSnapshot};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
