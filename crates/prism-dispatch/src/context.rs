//! # Call Context
//!
//! The execution context a facet runs in. Delegated execution means a
//! facet sees the *original* caller and the dispatcher's own address and
//! storage — the context carries all three, plus the event buffer and the
//! nested-call hook.

use crate::errors::DispatchError;
use crate::registry::FacetRegistry;
use prism_storage::SharedStore;
use prism_types::{Address, Bytes, Event, Selector};

/// Execution limits.
pub mod limits {
    /// Maximum nested delegated-call depth.
    pub const MAX_CALL_DEPTH: u16 = 1024;
}

// =============================================================================
// CALL ENVIRONMENT
// =============================================================================

/// Host-provided facts about one inbound call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallEnv {
    /// The external caller issuing the call.
    pub caller: Address,
    /// Call timestamp (unix seconds), fixed for the whole invocation.
    pub timestamp: u64,
}

impl CallEnv {
    /// Creates a call environment.
    #[must_use]
    pub const fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// What a facet sees while executing.
///
/// Nested calls via [`Self::delegate`] reuse the same context (same
/// caller, same `this`, same store) — that *is* the delegated-execution
/// model; only the depth counter changes.
pub struct CallContext<'a> {
    /// Original external caller, preserved through nesting.
    pub caller: Address,
    /// The dispatcher's own address; facets execute in its identity.
    pub this: Address,
    /// Call timestamp (unix seconds).
    pub timestamp: u64,
    /// The shared namespaced store.
    pub store: &'a mut SharedStore,
    registry: &'a FacetRegistry,
    events: Vec<Event>,
    depth: u16,
}

impl<'a> CallContext<'a> {
    /// Builds the top-level context for one invocation.
    ///
    /// Normally the dispatcher constructs this; it is public for facet
    /// unit tests and embedders driving facets without a dispatcher (no
    /// snapshot rollback in that case).
    pub fn new(
        env: CallEnv,
        this: Address,
        store: &'a mut SharedStore,
        registry: &'a FacetRegistry,
    ) -> Self {
        Self {
            caller: env.caller,
            this,
            timestamp: env.timestamp,
            store,
            registry,
            events: Vec::new(),
            depth: 0,
        }
    }

    /// Buffers an audit-log event. Events reach the sink only if the whole
    /// invocation commits.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns true if executable code is installed at the address.
    #[must_use]
    pub fn has_code(&self, address: Address) -> bool {
        self.registry.has_code(address)
    }

    /// Current nesting depth (0 for the top-level call).
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Invokes another module in this same context (nested delegated
    /// call): same caller, same identity, same storage, same transaction.
    ///
    /// The target needs registered code but not a route — the cut
    /// initializer uses exactly this to reach a not-yet-routed module.
    pub fn delegate(
        &mut self,
        target: Address,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if self.depth >= limits::MAX_CALL_DEPTH {
            return Err(DispatchError::CallDepthExceeded {
                depth: self.depth.saturating_add(1),
                max: limits::MAX_CALL_DEPTH,
            });
        }
        let facet = self
            .registry
            .code_at(target)
            .ok_or(DispatchError::NoCodeAtTarget { target })?;

        self.depth += 1;
        let result = facet.call(self, selector, input);
        self.depth -= 1;
        result
    }

    /// Consumes the context, yielding the buffered events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

// =============================================================================
// TESTS
// =============================================================================
