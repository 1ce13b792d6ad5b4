//! # Driver Ports (Inbound)
//!
//! The contract every routable logic module implements. The dispatcher is
//! the only caller; a facet never invokes another facet directly — nested
//! calls go through [`crate::context::CallContext::delegate`] so caller
//! identity and storage context are preserved.

use crate::context::CallContext;
use crate::errors::DispatchError;
use prism_types::{Bytes, Selector};

/// An independently registered unit of logic reachable through the
/// dispatcher.
///
/// A facet executes in the dispatcher's identity and storage (delegated
/// execution): it sees the original caller, reads and writes the shared
/// namespaced store, and returns its result verbatim to the dispatcher.
///
/// Implementations match on the selector and fail with
/// [`DispatchError::UnknownFunction`] for selectors they do not implement;
/// the routing table normally prevents that from ever happening.
pub trait Facet: Send + Sync {
    /// Executes one operation.
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError>;

    /// The selectors this facet implements. Used to build cut batches at
    /// deployment time; the routing table remains the only runtime
    /// authority on what is reachable.
    fn selectors(&self) -> Vec<Selector>;
}
