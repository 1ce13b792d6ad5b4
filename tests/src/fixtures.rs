//! # Test Fixtures
//!
//! The shared world builder (dispatcher + marketplace + funded actors) and
//! small purpose-built facets used by the routing and exploit tests.

use prism_dispatch::prelude::*;
use prism_market::prelude::*;
use prism_storage::{SharedStore, StorageNamespace};
use prism_types::{Address, Bytes, Selector, U256};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs the env-filter subscriber once for the whole test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// WELL-KNOWN ACTORS
// =============================================================================

/// Fixed timestamp used by every test call.
pub const NOW: u64 = 1_700_000_000;

/// Control owner of the test dispatcher.
pub const OWNER: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x01]);
/// Default seller.
pub const SELLER: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x02]);
/// Default buyer.
pub const BUYER: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x03]);
/// Fee recipient.
pub const TREASURY: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x04]);
/// The payment asset address.
pub const PAY_TOKEN: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x05]);
/// The asset collection used by market tests.
pub const COLLECTION: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x06]);
/// The dispatcher's own address.
pub const DISPATCHER: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0x10]);

/// Call environment for a caller at the fixed timestamp.
#[must_use]
pub fn env(caller: Address) -> CallEnv {
    CallEnv::new(caller, NOW)
}

// =============================================================================
// WORLD
// =============================================================================

/// A dispatcher with the marketplace deployed, configured at 250 bps, and
/// an event recorder attached.
pub struct World {
    pub dispatcher: Dispatcher,
    pub sink: Arc<RecordingEventSink>,
    pub token: InMemoryToken,
    pub assets: InMemoryAssetRegistry,
}

impl World {
    /// Builds the standard marketplace world.
    pub fn new() -> Self {
        init_tracing();

        let sink = Arc::new(RecordingEventSink::new());
        let mut dispatcher = Dispatcher::new(
            DispatcherConfig {
                address: DISPATCHER,
                owner: OWNER,
            },
            sink.clone(),
        )
        .expect("dispatcher construction");

        let token = InMemoryToken::new();
        let assets = InMemoryAssetRegistry::new();
        install_market(&mut dispatcher, env(OWNER), Arc::new(token), Arc::new(assets))
            .expect("market deployment");

        dispatcher
            .set_payment_asset(env(OWNER), PAY_TOKEN)
            .expect("configure payment asset");
        dispatcher
            .set_fee_recipient(env(OWNER), TREASURY)
            .expect("configure fee recipient");
        dispatcher.set_fee(env(OWNER), 250).expect("configure fee");

        // Deployment/config noise is not interesting to assertions
        sink.take();

        Self {
            dispatcher,
            sink,
            token,
            assets,
        }
    }

    /// Builds a world without any marketplace configuration.
    pub fn unconfigured() -> Self {
        init_tracing();

        let sink = Arc::new(RecordingEventSink::new());
        let mut dispatcher = Dispatcher::new(
            DispatcherConfig {
                address: DISPATCHER,
                owner: OWNER,
            },
            sink.clone(),
        )
        .expect("dispatcher construction");

        let token = InMemoryToken::new();
        let assets = InMemoryAssetRegistry::new();
        install_market(&mut dispatcher, env(OWNER), Arc::new(token), Arc::new(assets))
            .expect("market deployment");
        sink.take();

        Self {
            dispatcher,
            sink,
            token,
            assets,
        }
    }

    /// Credits a holder with payment-asset balance.
    pub fn fund(&mut self, holder: Address, amount: u64) {
        self.token
            .mint(self.dispatcher.store_mut(), PAY_TOKEN, holder, U256::from(amount));
    }

    /// Current payment-asset balance of a holder.
    #[must_use]
    pub fn balance(&self, holder: Address) -> U256 {
        self.token
            .balance_of(self.dispatcher.store(), PAY_TOKEN, holder)
    }

    /// Mints an asset to an owner.
    pub fn mint_asset(&mut self, asset_id: u64, owner: Address) {
        self.assets
            .mint_asset(self.dispatcher.store_mut(), COLLECTION, U256::from(asset_id), owner);
    }

    /// Approves the dispatcher to move an asset.
    pub fn approve_dispatcher(&mut self, asset_id: u64) {
        self.assets
            .approve(self.dispatcher.store_mut(), COLLECTION, U256::from(asset_id), DISPATCHER);
    }

    /// Mints an asset to `owner`, approves the dispatcher, and lists it.
    pub fn list(&mut self, asset_id: u64, seller: Address, price: u64) {
        self.mint_asset(asset_id, seller);
        self.approve_dispatcher(asset_id);
        self.dispatcher
            .list_asset(env(seller), COLLECTION, U256::from(asset_id), U256::from(price))
            .expect("listing");
    }

    /// Current owner of an asset.
    #[must_use]
    pub fn asset_owner(&self, asset_id: u64) -> Address {
        self.assets
            .owner_of(self.dispatcher.store(), COLLECTION, U256::from(asset_id))
            .expect("asset exists")
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Downcasts a dispatch error to the marketplace error it wraps.
#[must_use]
pub fn market_err(err: &DispatchError) -> Option<&MarketError> {
    err.as_facet::<MarketError>()
}

// =============================================================================
// TEST FACETS
// =============================================================================

/// Operation signatures of the test facets.
pub mod test_sig {
    /// Returns the facet's fixed reply value.
    pub const PING: &str = "test.ping";
    /// Writes the marker region.
    pub const INIT_MARK: &str = "test.initMark";
    /// Always fails.
    pub const INIT_FAIL: &str = "test.initFail";
}

/// Marker region written by the init test facet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitMarker {
    pub value: u64,
}

impl StorageNamespace for InitMarker {
    const TAG: &'static str = "prism.tests.init_marker";
}

/// Facet answering `test.ping` with a fixed value. Two instances with
/// different replies stand in for v1/v2 of an upgraded module.
pub struct PingFacet {
    pub reply: u64,
}

impl Facet for PingFacet {
    fn call(
        &self,
        _ctx: &mut CallContext<'_>,
        selector: Selector,
        _input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == prism_dispatch::abi::selector(test_sig::PING) {
            prism_dispatch::abi::encode_ret(&self.reply)
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![prism_dispatch::abi::selector(test_sig::PING)]
    }
}

/// Initializer target: `test.initMark` records the passed value in the
/// marker region; `test.initFail` always errors.
pub struct InitFacet;

impl Facet for InitFacet {
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == prism_dispatch::abi::selector(test_sig::INIT_MARK) {
            let value: u64 = prism_dispatch::abi::decode_args(input)?;
            ctx.store.write::<InitMarker>().value = value;
            prism_dispatch::abi::encode_ret(&())
        } else if selector == prism_dispatch::abi::selector(test_sig::INIT_FAIL) {
            Err(DispatchError::Internal("initializer exploded".to_string()))
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            prism_dispatch::abi::selector(test_sig::INIT_MARK),
            prism_dispatch::abi::selector(test_sig::INIT_FAIL),
        ]
    }
}
