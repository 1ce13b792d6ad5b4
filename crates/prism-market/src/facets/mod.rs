//! # Marketplace Facets
//!
//! The ledger facet and the configuration facet. Both are ordinary routed
//! facets, made reachable by a cut like anything else.

pub mod admin;
pub mod market;

pub use admin::AdminFacet;
pub use market::{
    AssetRefArgs, BulkRemoveArgs, ListAssetArgs, MarketFacet, PaginationArgs, UpdatePriceArgs,
};
