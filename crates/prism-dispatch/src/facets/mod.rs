//! # Built-in Facets
//!
//! The three facets every dispatcher ships with: cut (table mutation),
//! loupe (introspection), and ownership (control transfer). They are
//! ordinary facets — registered in the code registry and reached through
//! the routing table like any application facet.

pub mod cut;
pub mod loupe;
pub mod ownership;

pub use cut::{CutArgs, CutFacet};
pub use loupe::{FacetInfo, LoupeFacet};
pub use ownership::OwnershipFacet;
