//! # Dispatch Domain
//!
//! Pure routing state and the mutation protocol over it. No I/O, no
//! facet invocation; the dispatcher and the cut facet drive these types.

pub mod control;
pub mod cut;
pub mod invariants;
pub mod routes;

pub use control::{enforce_owner, ControlState};
pub use cut::{apply_cut, describe_cut, validate_code_targets, CutEntry, Initializer};
pub use invariants::{
    check_all_route_invariants, table_is_consistent, InvariantCheckResult, InvariantViolation,
};
pub use routes::{FacetRecord, RouteTable, RoutingEntry};
