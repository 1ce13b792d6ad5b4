//! # Prism Dispatch - Selector-Routed Upgradeable Dispatch
//!
//! ## Purpose
//!
//! One stable dispatcher address routes every call, by 4-byte selector, to
//! the facet implementing it. The routing table is mutated only through
//! the batched cut protocol; facets execute in the dispatcher's identity
//! against the shared namespaced store. Callers never learn facet
//! addresses — upgrades re-route selectors, nothing else moves.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | A selector maps to at most one facet | `domain/routes.rs` - `RouteTable::add_one` |
//! | Recorded positions match actual indices | `domain/routes.rs` - swap-and-pop in `remove_one` |
//! | A facet with zero selectors is never listed | `domain/routes.rs` - `remove_one` |
//! | Only the control owner mutates the table | `facets/cut.rs` - `enforce_owner` |
//! | A failed call leaves no state change | `dispatcher.rs` - snapshot/restore in `execute` |
//! | Events reach the sink only on commit | `dispatcher.rs` - buffered in `CallContext` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Route table | `domain/routes.rs` | selector ↔ facet mapping, O(1) removal |
//! | Cut protocol | `domain/cut.rs` | batched add/replace/remove + initializer |
//! | Invariant checks | `domain/invariants.rs` | consistency proofs for tests |
//! | Dispatcher | `dispatcher.rs` | resolution, rollback, event flush |
//! | Built-in facets | `facets/` | cut, loupe, ownership |
//! | Call codec | `abi.rs` | selector derivation, bincode payloads |
//!
//! ## Usage Example
//!
//! ```ignore
//! use prism_dispatch::prelude::*;
//!
//! let mut dispatcher = Dispatcher::new(config, sink)?;
//! dispatcher.install_facet(market_address, Arc::new(market_facet))?;
//! dispatcher.cut(env, vec![CutEntry::add(market_address, selectors)], None)?;
//!
//! let output = dispatcher.execute(env, selector, payload.as_slice())?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod abi;
pub mod adapters;
pub mod context;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod facets;
pub mod ports;
pub mod registry;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        apply_cut, check_all_route_invariants, describe_cut, enforce_owner, table_is_consistent,
        ControlState, CutEntry, FacetRecord, Initializer, InvariantCheckResult,
        InvariantViolation, RouteTable, RoutingEntry,
    };

    // Context
    pub use crate::context::{CallContext, CallEnv};

    // Ports
    pub use crate::ports::{EventSink, Facet, NullEventSink};

    // Registry & dispatcher
    pub use crate::dispatcher::{
        addresses, create_test_dispatcher, Dispatcher, DispatcherConfig, DispatchStats,
    };
    pub use crate::registry::FacetRegistry;

    // Built-in facets
    pub use crate::facets::{CutArgs, CutFacet, FacetInfo, LoupeFacet, OwnershipFacet};

    // Adapters
    pub use crate::adapters::{RecordingEventSink, TracingEventSink};

    // Errors
    pub use crate::errors::DispatchError;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
