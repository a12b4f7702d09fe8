//! UPI recharge links.
//!
//! Recharging is a fire-and-forget redirect: the server builds a
//! `upi://pay` deep link with the fixed payee identity and the requested
//! amount, the page navigates to it, and no payment confirmation is ever
//! observed.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::PaymentConfig;
use crate::types::GameError;

/// Build a recharge deep link for the requested amount.
///
/// Errors with [`GameError::RechargeBelowMinimum`] under the configured
/// minimum (₹100 by default) and builds no link.
pub fn recharge_link(cfg: &PaymentConfig, amount: Decimal) -> Result<String, GameError> {
    if amount < cfg.min_recharge {
        return Err(GameError::RechargeBelowMinimum {
            requested: amount,
            minimum: cfg.min_recharge,
        });
    }

    let url = format!(
        "upi://pay?pa={}&pn={}&am={}&cu={}&tn={}",
        cfg.payee_vpa,
        urlencoding::encode(&cfg.payee_name),
        amount.normalize(),
        cfg.currency,
        urlencoding::encode(&cfg.note),
    );
    info!(amount = %amount, "Recharge link issued");
    Ok(url)
}
