//! # Cut Facet
//!
//! The routed entry point for routing-table mutation. Owner-only. Applies
//! the batch, emits the routing-changed event with the full batch
//! description, then issues the optional one-shot initializer call; an
//! initializer failure aborts the whole cut (host rollback discards the
//! already-applied table mutations).

use crate::abi;
use crate::context::CallContext;
use crate::domain::{apply_cut, describe_cut, enforce_owner, validate_code_targets};
use crate::domain::{CutEntry, Initializer, RouteTable};
use crate::errors::DispatchError;
use crate::ports::Facet;
use prism_types::{Bytes, Event, Selector};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Operation signatures.
pub mod sig {
    /// Batched routing-table mutation.
    pub const CUT: &str = "dispatch.cut";
}

/// Arguments of the cut operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutArgs {
    /// The batch, applied in order.
    pub entries: Vec<CutEntry>,
    /// Optional one-shot initialization call.
    pub initializer: Option<Initializer>,
}

/// The built-in cut facet.
#[derive(Clone, Copy, Debug, Default)]
pub struct CutFacet;

impl CutFacet {
    /// Creates the facet.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn handle_cut(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, DispatchError> {
        enforce_owner(ctx.store, ctx.caller)?;
        let args: CutArgs = abi::decode_args(input)?;

        validate_code_targets(&args.entries, |address| ctx.has_code(address))?;
        apply_cut(ctx.store.write::<RouteTable>(), &args.entries)?;

        info!(
            entries = args.entries.len(),
            routes = ctx.store.read(RouteTable::route_count),
            "routing table updated"
        );
        ctx.emit(Event::RoutingChanged {
            changes: describe_cut(&args.entries),
            initializer: args.initializer.as_ref().map(|init| init.target),
        });

        if let Some(init) = &args.initializer {
            ctx.delegate(init.target, init.selector, init.args.as_slice())
                .map_err(|err| DispatchError::InitializationFailed {
                    reason: err.to_string(),
                })?;
        }

        abi::encode_ret(&())
    }
}

impl Facet for CutFacet {
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == abi::selector(sig::CUT) {
            self.handle_cut(ctx, input)
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![abi::selector(sig::CUT)]
    }
}
