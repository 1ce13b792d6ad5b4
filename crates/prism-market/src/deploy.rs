//! # Deployment
//!
//! Installs the marketplace facets and routes their selectors in one cut.
//! The cut goes through the dispatcher like any other, so it is owner-only
//! and atomic.

use crate::facets::{AdminFacet, MarketFacet};
use crate::ports::{AssetRegistry, PaymentAsset};
use prism_dispatch::context::CallEnv;
use prism_dispatch::dispatcher::Dispatcher;
use prism_dispatch::domain::CutEntry;
use prism_dispatch::errors::DispatchError;
use prism_dispatch::ports::Facet;
use std::sync::Arc;

/// Reserved addresses for the marketplace facets.
pub mod addresses {
    use prism_types::Address;

    /// The market facet.
    pub const MARKET_FACET: Address =
        Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x10]);
    /// The admin facet.
    pub const ADMIN_FACET: Address =
        Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x11]);
}

/// Installs and routes the market and admin facets.
///
/// `env.caller` must be the control owner.
pub fn install_market(
    dispatcher: &mut Dispatcher,
    env: CallEnv,
    payments: Arc<dyn PaymentAsset>,
    assets: Arc<dyn AssetRegistry>,
) -> Result<(), DispatchError> {
    let market = MarketFacet::new(payments, assets);
    let admin = AdminFacet::new();
    let market_selectors = market.selectors();
    let admin_selectors = admin.selectors();

    dispatcher.install_facet(addresses::MARKET_FACET, Arc::new(market))?;
    dispatcher.install_facet(addresses::ADMIN_FACET, Arc::new(admin))?;

    dispatcher.cut(
        env,
        vec![
            CutEntry::add(addresses::MARKET_FACET, market_selectors),
            CutEntry::add(addresses::ADMIN_FACET, admin_selectors),
        ],
        None,
    )
}
