//! # Prism Shared Types
//!
//! Value objects, hashing helpers, and the cross-crate event schema.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary
//!   (addresses, hashes, selectors, events) is defined here.
//! - **Value semantics**: these types are defined by their value, not
//!   identity. All are `Clone` and serde-serializable.
//! - **No behavior**: routing, storage, and marketplace logic live in their
//!   own crates; this crate only names things.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod events;
pub mod hashing;
pub mod value_objects;

pub use events::{CutAction, Event, FacetChange};
pub use hashing::{keccak256, selector};
pub use value_objects::{Address, Bytes, Hash, Selector, U256};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
