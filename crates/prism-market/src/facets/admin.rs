//! # Admin Facet
//!
//! Marketplace configuration: payment asset, fee rate, fee recipient.
//! Setters are owner-only; getters are public. The fee rate is hard-capped
//! at 10%.

use crate::domain::{limits, MarketConfig};
use crate::errors::MarketError;
use prism_dispatch::abi;
use prism_dispatch::context::CallContext;
use prism_dispatch::domain::enforce_owner;
use prism_dispatch::errors::DispatchError;
use prism_dispatch::ports::Facet;
use prism_types::{Address, Bytes, Event, Selector};
use tracing::info;

/// Operation signatures.
pub mod sig {
    /// Set the payment asset. Owner-only.
    pub const SET_PAYMENT_ASSET: &str = "admin.setPaymentAsset";
    /// Set the fee rate in basis points. Owner-only.
    pub const SET_FEE: &str = "admin.setFee";
    /// Set the fee recipient. Owner-only.
    pub const SET_FEE_RECIPIENT: &str = "admin.setFeeRecipient";
    /// Current payment asset.
    pub const PAYMENT_ASSET: &str = "admin.paymentAsset";
    /// Current fee rate.
    pub const FEE_BPS: &str = "admin.feeBps";
    /// Current fee recipient.
    pub const FEE_RECIPIENT: &str = "admin.feeRecipient";
}

/// The marketplace configuration facet.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminFacet;

impl AdminFacet {
    /// Creates the facet.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Facet for AdminFacet {
    fn call(
        &self,
        ctx: &mut CallContext<'_>,
        selector: Selector,
        input: &[u8],
    ) -> Result<Bytes, DispatchError> {
        if selector == abi::selector(sig::SET_PAYMENT_ASSET) {
            enforce_owner(ctx.store, ctx.caller)?;
            let asset: Address = abi::decode_args(input)?;
            if asset.is_zero() {
                return Err(DispatchError::facet(MarketError::InvalidAddress {
                    context: "payment asset",
                }));
            }
            ctx.store.write::<MarketConfig>().payment_asset = asset;
            info!(%asset, "payment asset configured");
            ctx.emit(Event::PaymentAssetUpdated { asset });
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::SET_FEE) {
            enforce_owner(ctx.store, ctx.caller)?;
            let fee_bps: u16 = abi::decode_args(input)?;
            if fee_bps > limits::MAX_FEE_BPS {
                return Err(DispatchError::facet(MarketError::FeeExceedsMaximum {
                    bps: fee_bps,
                    max: limits::MAX_FEE_BPS,
                }));
            }
            ctx.store.write::<MarketConfig>().fee_bps = fee_bps;
            info!(fee_bps, "fee rate configured");
            ctx.emit(Event::FeeUpdated { fee_bps });
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::SET_FEE_RECIPIENT) {
            enforce_owner(ctx.store, ctx.caller)?;
            let recipient: Address = abi::decode_args(input)?;
            if recipient.is_zero() {
                return Err(DispatchError::facet(MarketError::InvalidAddress {
                    context: "fee recipient",
                }));
            }
            ctx.store.write::<MarketConfig>().fee_recipient = recipient;
            info!(%recipient, "fee recipient configured");
            ctx.emit(Event::FeeRecipientUpdated { recipient });
            abi::encode_ret(&())
        } else if selector == abi::selector(sig::PAYMENT_ASSET) {
            let asset = ctx.store.read(|c: &MarketConfig| c.payment_asset);
            abi::encode_ret(&asset)
        } else if selector == abi::selector(sig::FEE_BPS) {
            let fee_bps = ctx.store.read(|c: &MarketConfig| c.fee_bps);
            abi::encode_ret(&fee_bps)
        } else if selector == abi::selector(sig::FEE_RECIPIENT) {
            let recipient = ctx.store.read(|c: &MarketConfig| c.fee_recipient);
            abi::encode_ret(&recipient)
        } else {
            Err(DispatchError::UnknownFunction { selector })
        }
    }

    fn selectors(&self) -> Vec<Selector> {
        vec![
            abi::selector(sig::SET_PAYMENT_ASSET),
            abi::selector(sig::SET_FEE),
            abi::selector(sig::SET_FEE_RECIPIENT),
            abi::selector(sig::PAYMENT_ASSET),
            abi::selector(sig::FEE_BPS),
            abi::selector(sig::FEE_RECIPIENT),
        ]
    }
}
