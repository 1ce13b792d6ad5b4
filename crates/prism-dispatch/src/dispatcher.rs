//! # Dispatcher
//!
//! The single stable entry point. Every inbound call resolves its facet
//! through the routing table, executes it against the shared store, and
//! returns the result verbatim. The store is snapshotted before each call
//! and restored on failure, so a failed call leaves no observable state
//! change — this is the host's transactional rollback, and it is what
//! makes batch cuts and multi-step purchases all-or-nothing.

use crate::abi;
use crate::context::{CallContext, CallEnv};
use crate::domain::{ControlState, CutEntry, Initializer, RouteTable};
use crate::errors::DispatchError;
use crate::facets::{cut, loupe, ownership, CutArgs, CutFacet, FacetInfo, LoupeFacet, OwnershipFacet};
use crate::ports::{EventSink, Facet, NullEventSink};
use crate::registry::FacetRegistry;
use prism_storage::SharedStore;
use prism_types::{Address, Bytes, Selector};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// WELL-KNOWN ADDRESSES
// =============================================================================

/// Reserved low addresses for the built-in facets.
pub mod addresses {
    use prism_types::Address;

    /// The cut facet.
    pub const CUT_FACET: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01]);
    /// The loupe facet.
    pub const LOUPE_FACET: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x02]);
    /// The ownership facet.
    pub const OWNERSHIP_FACET: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x03]);
}

// =============================================================================
// CONFIGURATION & STATS
// =============================================================================

/// Dispatcher construction parameters.
#[derive(Clone, Copy, Debug)]
pub struct DispatcherConfig {
    /// The dispatcher's own address — the stable address callers use and
    /// the identity facets execute under.
    pub address: Address,
    /// Initial control owner.
    pub owner: Address,
}

/// Call counters. Host-level bookkeeping, never rolled back.
#[derive(Clone, Copy, Debug, Default)]
pub struct DispatchStats {
    /// Total calls received.
    pub calls_executed: u64,
    /// Calls that committed.
    pub successful_calls: u64,
    /// Calls that failed and were rolled back.
    pub failed_calls: u64,
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// The selector-routed dispatcher.
pub struct Dispatcher {
    address: Address,
    store: SharedStore,
    registry: FacetRegistry,
    sink: Arc<dyn EventSink>,
    stats: DispatchStats,
}

impl Dispatcher {
    /// Creates a dispatcher with the built-in cut, loupe, and ownership
    /// facets installed and routed.
    pub fn new(config: DispatcherConfig, sink: Arc<dyn EventSink>) -> Result<Self, DispatchError> {
        if config.owner.is_zero() {
            return Err(DispatchError::InvalidAddress {
                context: "initial control owner",
            });
        }
        if config.address.is_zero() {
            return Err(DispatchError::InvalidAddress {
                context: "dispatcher address",
            });
        }

        let mut store = SharedStore::new();
        store.write::<ControlState>().owner = config.owner;

        let mut registry = FacetRegistry::new();
        let cut_facet = CutFacet::new();
        let loupe_facet = LoupeFacet::new();
        let ownership_facet = OwnershipFacet::new();

        let table = store.write::<RouteTable>();
        table.add(addresses::CUT_FACET, &cut_facet.selectors())?;
        table.add(addresses::LOUPE_FACET, &loupe_facet.selectors())?;
        table.add(addresses::OWNERSHIP_FACET, &ownership_facet.selectors())?;

        registry.install(addresses::CUT_FACET, Arc::new(cut_facet))?;
        registry.install(addresses::LOUPE_FACET, Arc::new(loupe_facet))?;
        registry.install(addresses::OWNERSHIP_FACET, Arc::new(ownership_facet))?;

        info!(
            address = %config.address,
            owner = %config.owner,
            "dispatcher constructed"
        );

        Ok(Self {
            address: config.address,
            store,
            registry,
            sink,
            stats: DispatchStats::default(),
        })
    }

    /// The dispatcher's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Read access to the shared store, for host-level inspection.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Mutable host-level access to the shared store (fixture seeding:
    /// minting balances, assets). Not routed, not rolled back.
    pub fn store_mut(&mut self) -> &mut SharedStore {
        &mut self.store
    }

    /// Call counters.
    #[must_use]
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Installs facet code at an address (deployment). The code is not
    /// reachable until a cut routes selectors to it.
    pub fn install_facet(
        &mut self,
        address: Address,
        facet: Arc<dyn Facet>,
    ) -> Result<(), DispatchError> {
        debug!(%address, "facet code installed");
        self.registry.install(address, facet)
    }

    // -------------------------------------------------------------------------
    // EXECUTION
    // -------------------------------------------------------------------------

    /// Executes one inbound call.
    ///
    /// Resolution failure is `UnknownFunction`. Everything the facet did —
    /// any namespace, any collaborator ledger — is discarded if it fails;
    /// buffered events reach the sink only on commit.
    pub fn execute(
        &mut self,
        env: CallEnv,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        self.stats.calls_executed += 1;

        let Some(facet_address) = self.store.read(|table: &RouteTable| table.resolve(selector))
        else {
            self.stats.failed_calls += 1;
            debug!(%selector, caller = %env.caller, "unknown function");
            return Err(DispatchError::UnknownFunction { selector });
        };

        let Some(facet) = self.registry.code_at(facet_address) else {
            // Routes are only ever cut toward registered code; reaching
            // this means the table and registry disagree.
            self.stats.failed_calls += 1;
            warn!(%selector, %facet_address, "route to unregistered code");
            return Err(DispatchError::NoCodeAtTarget {
                target: facet_address,
            });
        };

        let snapshot = self.store.snapshot();
        let mut ctx = CallContext::new(env, self.address, &mut self.store, &self.registry);

        match facet.call(&mut ctx, selector, input) {
            Ok(output) => {
                let events = ctx.into_events();
                for event in &events {
                    self.sink.publish(event);
                }
                self.stats.successful_calls += 1;
                debug!(
                    %selector,
                    facet = %facet_address,
                    events = events.len(),
                    "call committed"
                );
                Ok(output)
            }
            Err(err) => {
                self.store.restore(snapshot);
                self.stats.failed_calls += 1;
                debug!(%selector, facet = %facet_address, error = %err, "call rolled back");
                Err(err)
            }
        }
    }

    fn call_typed<A, R>(
        &mut self,
        env: CallEnv,
        signature: &str,
        args: &A,
    ) -> Result<R, DispatchError>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let (selector, payload) = abi::encode_call(signature, args)?;
        let output = self.execute(env, selector, payload.as_slice())?;
        abi::decode_ret(&output)
    }

    // -------------------------------------------------------------------------
    // TYPED SURFACE (routed through `execute`)
    // -------------------------------------------------------------------------

    /// Applies a batched routing-table mutation. Owner-only.
    pub fn cut(
        &mut self,
        env: CallEnv,
        entries: Vec<CutEntry>,
        initializer: Option<Initializer>,
    ) -> Result<(), DispatchError> {
        self.call_typed(
            env,
            cut::sig::CUT,
            &CutArgs {
                entries,
                initializer,
            },
        )
    }

    /// Full facet inventory.
    pub fn facets(&mut self, env: CallEnv) -> Result<Vec<FacetInfo>, DispatchError> {
        self.call_typed(env, loupe::sig::FACETS, &())
    }

    /// All facet addresses.
    pub fn facet_addresses(&mut self, env: CallEnv) -> Result<Vec<Address>, DispatchError> {
        self.call_typed(env, loupe::sig::FACET_ADDRESSES, &())
    }

    /// Selectors of one facet (empty if it has none).
    pub fn facet_selectors(
        &mut self,
        env: CallEnv,
        facet: Address,
    ) -> Result<Vec<Selector>, DispatchError> {
        self.call_typed(env, loupe::sig::FACET_SELECTORS, &facet)
    }

    /// Facet mapped to a selector; the zero address when unmapped.
    pub fn facet_address_of(
        &mut self,
        env: CallEnv,
        selector: Selector,
    ) -> Result<Address, DispatchError> {
        self.call_typed(env, loupe::sig::FACET_ADDRESS, &selector)
    }

    /// Current control owner.
    pub fn owner(&mut self, env: CallEnv) -> Result<Address, DispatchError> {
        self.call_typed(env, ownership::sig::OWNER, &())
    }

    /// Hands control to a new owner. Owner-only.
    pub fn transfer_control(
        &mut self,
        env: CallEnv,
        new_owner: Address,
    ) -> Result<(), DispatchError> {
        self.call_typed(env, ownership::sig::TRANSFER_CONTROL, &new_owner)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("address", &self.address)
            .field("store", &self.store)
            .field("registry", &self.registry)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

/// Creates a dispatcher with a throwaway address and a null sink.
pub fn create_test_dispatcher(owner: Address) -> Dispatcher {
    Dispatcher::new(
        DispatcherConfig {
            address: Address::from_low_u64(0xD15),
            owner,
        },
        Arc::new(NullEventSink),
    )
    .expect("test dispatcher construction")
}

// =============================================================================
// TESTS
// =============================================================================
