//! Game API route handlers.
//!
//! All endpoints return JSON. Validation failures come back as HTTP 400
//! with an `error` message — the page surfaces them as blocking alerts,
//! matching the original game's behavior.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::game::driver::GameSnapshot;
use crate::game::Game;
use crate::types::{CashOutReceipt, GameError};

pub type AppState = Arc<Game>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StartFlipRequest {
    pub stake: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StartFlipResponse {
    /// The stake actually debited, after clamping to the table limits.
    pub stake: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CashOutResponse {
    pub settled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<CashOutReceipt>,
}

#[derive(Debug, Deserialize)]
pub struct RechargeRequest {
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct RechargeResponse {
    /// `upi://pay` deep link; the page navigates to it.
    pub url: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Wraps a [`GameError`] into a 400 response with a JSON body.
#[derive(Debug)]
pub struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/state
pub async fn get_state(State(game): State<AppState>) -> Json<GameSnapshot> {
    Json(game.snapshot().await)
}

/// POST /api/flip/start
///
/// The stake is clamped to the configured [min, max] bounds the same way
/// the numeric input field bounds it.
pub async fn start_flip(
    State(game): State<AppState>,
    Json(req): Json<StartFlipRequest>,
) -> Result<Json<StartFlipResponse>, ApiError> {
    let stake = game.config().clamp_stake(req.stake);
    game.start_flip(stake).await?;
    Ok(Json(StartFlipResponse { stake }))
}

/// POST /api/flip/cashout
///
/// Settles the active flip. While idle this is a no-op and reports
/// `settled: false` rather than an error.
pub async fn cash_out(State(game): State<AppState>) -> Json<CashOutResponse> {
    let receipt = game.cash_out().await;
    Json(CashOutResponse {
        settled: receipt.is_some(),
        receipt,
    })
}

/// POST /api/recharge
pub async fn recharge(
    State(game): State<AppState>,
    Json(req): Json<RechargeRequest>,
) -> Result<Json<RechargeResponse>, ApiError> {
    let url = game.recharge(req.amount)?;
    Ok(Json(RechargeResponse { url }))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, PaymentConfig};
    use rust_decimal_macros::dec;

    fn test_state() -> AppState {
        Arc::new(Game::new(GameConfig::default(), PaymentConfig::default()))
    }

    #[tokio::test]
    async fn test_get_state_handler() {
        let Json(snap) = get_state(State(test_state())).await;
        assert_eq!(snap.wallet.bonus, dec!(50));
        assert!(!snap.flipping);
    }

    #[tokio::test]
    async fn test_start_flip_clamps_stake() {
        let state = test_state();
        let Json(resp) = start_flip(
            State(state.clone()),
            Json(StartFlipRequest { stake: dec!(5) }),
        )
        .await
        .unwrap();
        assert_eq!(resp.stake, dec!(10));
        state.cash_out().await;
    }

    #[tokio::test]
    async fn test_start_flip_insufficient_after_drain() {
        let state = test_state();
        // Stake the whole 50 bonus, cash out at x1.0 → ₹5.00 credited.
        // The next 10 stake then exceeds the remaining total.
        let Json(_) = start_flip(
            State(state.clone()),
            Json(StartFlipRequest { stake: dec!(50) }),
        )
        .await
        .unwrap();
        state.cash_out().await;
        // Remaining: 5.00 winnings credited; a 10 stake now exceeds total.
        let err = start_flip(
            State(state.clone()),
            Json(StartFlipRequest { stake: dec!(10) }),
        )
        .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_cash_out_idle_reports_unsettled() {
        let Json(resp) = cash_out(State(test_state())).await;
        assert!(!resp.settled);
        assert!(resp.receipt.is_none());
    }

    #[tokio::test]
    async fn test_recharge_below_minimum_is_400() {
        let result = recharge(
            State(test_state()),
            Json(RechargeRequest { amount: dec!(50) }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_recharge_returns_upi_link() {
        let Json(resp) = recharge(
            State(test_state()),
            Json(RechargeRequest { amount: dec!(200) }),
        )
        .await
        .unwrap();
        assert!(resp.url.starts_with("upi://pay?"));
        assert!(resp.url.contains("am=200"));
    }
}
