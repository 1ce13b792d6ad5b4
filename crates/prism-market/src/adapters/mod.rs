//! # Adapters
//!
//! Store-backed implementations of the collaborator ports, with host-level
//! fixture mutators (mint, approve) in the manner of an in-memory state
//! adapter.

pub mod assets;
pub mod token;

pub use assets::{AssetLedger, InMemoryAssetRegistry};
pub use token::{InMemoryToken, TokenLedger};
