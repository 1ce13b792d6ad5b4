//! # Error Types
//!
//! All error types for routing, cut application, and call dispatch.
//! Facet-level application errors travel through [`DispatchError::Facet`]
//! unmodified, so the original typed error is recoverable by downcast at
//! the call site.

use prism_types::{Address, Selector};
use thiserror::Error;

// =============================================================================
// DISPATCH ERRORS
// =============================================================================

/// Errors that can occur while routing, cutting, or executing a call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Caller is not the control owner.
    #[error("caller {caller} is not the control owner")]
    NotAuthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// No facet is mapped for the selector.
    #[error("no facet mapped for selector {selector}")]
    UnknownFunction {
        /// The unmapped selector.
        selector: Selector,
    },

    /// Add requires every selector to be currently unmapped.
    #[error("selector {selector} is already mapped to facet {facet}")]
    DuplicateSelector {
        /// The colliding selector.
        selector: Selector,
        /// The facet it is already mapped to.
        facet: Address,
    },

    /// Replace and Remove require every selector to be currently mapped.
    #[error("selector {selector} is not mapped to any facet")]
    SelectorNotFound {
        /// The unmapped selector.
        selector: Selector,
    },

    /// Replacing a selector with the facet it already routes to.
    #[error("selector {selector} already routes to facet {facet}")]
    RedundantReplace {
        /// The selector left unchanged.
        selector: Selector,
        /// The facet on both sides of the replace.
        facet: Address,
    },

    /// Remove entries never name a facet; the existing mapping decides.
    #[error("remove entries must carry the zero facet address, got {target}")]
    RemoveTargetMustBeEmpty {
        /// The non-zero address the entry carried.
        target: Address,
    },

    /// A cut entry carried no selectors.
    #[error("cut entry for facet {facet} has no selectors")]
    EmptySelectors {
        /// The entry's facet address.
        facet: Address,
    },

    /// Add/Replace target has no registered code.
    #[error("no code registered at facet address {target}")]
    NoCodeAtTarget {
        /// The codeless address.
        target: Address,
    },

    /// Code registration attempted at an occupied address.
    #[error("code already registered at {address}")]
    CodeAlreadyRegistered {
        /// The occupied address.
        address: Address,
    },

    /// The optional one-shot initializer of a cut failed; the whole cut
    /// (including already-applied table mutations) is rolled back.
    #[error("cut initializer failed: {reason}")]
    InitializationFailed {
        /// Stringified failure of the nested initializer call.
        reason: String,
    },

    /// A zero or otherwise invalid address where a real one is required.
    #[error("invalid address: {context}")]
    InvalidAddress {
        /// What the address was supposed to be.
        context: &'static str,
    },

    /// Nested delegated calls exceeded the depth limit.
    #[error("call depth exceeded: {depth} > {max}")]
    CallDepthExceeded {
        /// Depth the call would have reached.
        depth: u16,
        /// Configured maximum.
        max: u16,
    },

    /// Argument payload could not be encoded or decoded.
    #[error("call data codec error: {reason}")]
    MalformedCallData {
        /// Codec failure detail.
        reason: String,
    },

    /// Return payload could not be encoded or decoded.
    #[error("return data codec error: {reason}")]
    MalformedReturnData {
        /// Codec failure detail.
        reason: String,
    },

    /// Routing state is internally inconsistent (should not happen).
    #[error("internal error: {0}")]
    Internal(String),

    /// An application-level facet failure, forwarded verbatim.
    #[error(transparent)]
    Facet(#[from] anyhow::Error),
}

impl DispatchError {
    /// Wraps a typed facet error for verbatim forwarding.
    pub fn facet<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Facet(anyhow::Error::new(err))
    }

    /// Recovers the typed facet error, if this is one.
    #[must_use]
    pub fn as_facet<E>(&self) -> Option<&E>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::Facet(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
