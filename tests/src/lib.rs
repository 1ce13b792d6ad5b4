//! # Prism Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared world builder and test facets
//! │
//! ├── integration/      # End-to-end flows through the dispatcher
//! │   ├── routing_flows.rs
//! │   └── market_flows.rs
//! │
//! └── exploits/         # Attack simulations against known weaknesses
//!     ├── reentrancy.rs
//!     └── rogue_facet.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p prism-tests
//!
//! # By category
//! cargo test -p prism-tests integration::
//! cargo test -p prism-tests exploits::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;
pub mod fixtures;
pub mod integration;
