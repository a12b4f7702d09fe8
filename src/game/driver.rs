//! Async driver around the flip machine.
//!
//! Owns the one-per-flip interval task as an explicit, cancellable
//! handle. The original UI stored the interval handle in ambient view
//! state; here the handle lives inside the game object, so rapid
//! start/cash-out clicks can't race each other past the machine's
//! in-progress guard.

use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::{GameConfig, PaymentConfig};
use crate::game::machine::{FlipMachine, TickResult};
use crate::payment;
use crate::types::{CashOutReceipt, GameError, Wallet};

/// Snapshot of game state for the UI.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GameSnapshot {
    pub wallet: Wallet,
    pub total: Decimal,
    pub flipping: bool,
    pub multiplier: Decimal,
    pub outcome: crate::types::FlipOutcome,
    pub min_stake: Decimal,
    pub max_stake: Decimal,
    pub stake_step: Decimal,
    pub min_recharge: Decimal,
}

/// Shared, concurrency-safe game handle used by the dashboard.
pub struct Game {
    machine: Arc<RwLock<FlipMachine>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
    game_cfg: GameConfig,
    payment_cfg: PaymentConfig,
}

impl Game {
    /// Fresh game: a wallet holding the configured signup bonus, live
    /// clock and RNG.
    pub fn new(game_cfg: GameConfig, payment_cfg: PaymentConfig) -> Self {
        let machine = FlipMachine::new(Wallet::with_bonus(game_cfg.starting_bonus));
        Self::with_machine(machine, game_cfg, payment_cfg)
    }

    /// Wrap an existing machine (tests inject deterministic parts here).
    pub fn with_machine(
        machine: FlipMachine,
        game_cfg: GameConfig,
        payment_cfg: PaymentConfig,
    ) -> Self {
        Self {
            machine: Arc::new(RwLock::new(machine)),
            ticker: Mutex::new(None),
            tick_interval: Duration::from_millis(game_cfg.tick_interval_ms),
            game_cfg,
            payment_cfg,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.game_cfg
    }

    /// Start a flip and spawn its tick task.
    ///
    /// The machine's in-progress guard makes this atomic: a second call
    /// while a flip is alive fails before any second timer exists.
    pub async fn start_flip(&self, stake: Decimal) -> Result<(), GameError> {
        self.machine.write().await.start_flip(stake)?;

        let machine = Arc::clone(&self.machine);
        let period = self.tick_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first interval tick completes immediately; consume it so
            // the multiplier starts growing one full period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let result = machine.write().await.tick();
                if !matches!(result, TickResult::Alive { .. }) {
                    debug!(?result, "Tick task stopping");
                    break;
                }
            }
        });

        let mut slot = self.ticker.lock().await;
        if let Some(old) = slot.replace(handle) {
            // A previous flip's task that already ran to completion.
            old.abort();
        }
        Ok(())
    }

    /// Cancel the tick task and settle the flip. No-op while idle.
    pub async fn cash_out(&self) -> Option<CashOutReceipt> {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
        self.machine.write().await.cash_out()
    }

    /// Build a UPI recharge link for the requested amount.
    pub fn recharge(&self, amount: Decimal) -> Result<String, GameError> {
        payment::recharge_link(&self.payment_cfg, amount)
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        let machine = self.machine.read().await;
        GameSnapshot {
            wallet: machine.wallet().clone(),
            total: machine.wallet().total(),
            flipping: machine.is_flipping(),
            multiplier: machine.multiplier(),
            outcome: machine.outcome(),
            min_stake: self.game_cfg.min_stake,
            max_stake: self.game_cfg.max_stake,
            stake_step: self.game_cfg.stake_step,
            min_recharge: self.payment_cfg.min_recharge,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
