//! Flip state machine.
//!
//! Owns the wallet, the flip lifecycle (Idle → Flipping → Success/Fail →
//! Idle), multiplier accrual, and the fail-streak log. Fully synchronous;
//! the async interval driver in [`crate::game::driver`] calls `tick` once
//! per second while a flip is alive. Time and randomness are injected so
//! the whole machine is deterministic under test.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::rng::{RandomSource, ThreadRngSource};
use crate::types::{CashOutReceipt, FlipOutcome, GameError, Wallet};

/// Period of the multiplier tick while a flip is alive.
pub const TICK_INTERVAL_MS: u64 = 1000;
/// Lower bound of the randomized failure delay.
pub const BASE_DELAY_MS: f64 = 5000.0;
/// Width of the randomized failure delay range: [5000, 8000) ms.
pub const DELAY_SPREAD_MS: f64 = 3000.0;
/// Forced delay after a fail streak. Effectively a guaranteed loss.
pub const PENALTY_DELAY_MS: u64 = 70_000;
/// Trailing window for counting recent failures.
pub const FAIL_WINDOW_MS: u64 = 10_000;
/// Failures within the window that trigger the penalty delay.
pub const FAIL_STREAK: usize = 3;
/// A per-tick draw above this value crashes the flip (30% per tick).
pub const TICK_FAIL_THRESHOLD: f64 = 0.7;
/// Multiplier growth per surviving tick.
pub const MULTIPLIER_STEP: Decimal = dec!(0.1);
/// Earnings = stake × PAYOUT_RATE × multiplier.
pub const PAYOUT_RATE: Decimal = dec!(0.1);

/// Transient state of an in-progress flip.
#[derive(Debug, Clone)]
struct FlipSession {
    stake: Decimal,
    started_ms: u64,
    fail_at_ms: u64,
    /// Snapshot of the fail log pruned to the trailing window at start;
    /// becomes the new log (plus the fresh timestamp) if this flip fails.
    recent_fails: Vec<u64>,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    /// No flip in progress; nothing happened.
    Idle,
    /// The flip survived the tick and the multiplier grew.
    Alive { multiplier: Decimal },
    /// The flip crashed; stake is lost.
    Failed,
}

pub struct FlipMachine {
    wallet: Wallet,
    outcome: FlipOutcome,
    multiplier: Decimal,
    session: Option<FlipSession>,
    fail_log: Vec<u64>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
}

impl FlipMachine {
    /// Machine with wall-clock time and thread RNG.
    pub fn new(wallet: Wallet) -> Self {
        Self::with_parts(wallet, Box::new(SystemClock), Box::new(ThreadRngSource))
    }

    /// Machine with injected time and randomness.
    pub fn with_parts(
        wallet: Wallet,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            wallet,
            outcome: FlipOutcome::None,
            multiplier: dec!(1.0),
            session: None,
            fail_log: Vec::new(),
            clock,
            rng,
        }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn outcome(&self) -> FlipOutcome {
        self.outcome
    }

    /// Current multiplier. Holds its last value after a flip ends, until
    /// the next start resets it — matches what the UI displays.
    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    pub fn is_flipping(&self) -> bool {
        self.session.is_some()
    }

    /// Credit a recharge straight into the withdrawable amount.
    ///
    /// The real flow never observes payment completion (the UPI link is
    /// fire-and-forget); this exists for simulations and tests.
    pub fn credit_recharge(&mut self, amount: Decimal) {
        self.wallet.amount += amount;
    }

    /// Start a flip: debit the stake (bonus first), schedule the failure
    /// delay, and reset the multiplier.
    ///
    /// Errors with [`GameError::FlipInProgress`] while a session is alive —
    /// the overlapping-timer guard — and [`GameError::InsufficientBalance`]
    /// when the wallet can't cover the stake (wallet untouched).
    pub fn start_flip(&mut self, stake: Decimal) -> Result<(), GameError> {
        if self.session.is_some() {
            return Err(GameError::FlipInProgress);
        }
        self.wallet.debit(stake)?;

        let now = self.clock.now_ms();
        let recent_fails: Vec<u64> = self
            .fail_log
            .iter()
            .copied()
            .filter(|&t| now.saturating_sub(t) < FAIL_WINDOW_MS)
            .collect();

        let fail_at_ms = if recent_fails.len() >= FAIL_STREAK {
            debug!(
                recent_fails = recent_fails.len(),
                "Fail streak detected — forcing penalty delay"
            );
            PENALTY_DELAY_MS
        } else {
            (BASE_DELAY_MS + self.rng.next_unit() * DELAY_SPREAD_MS) as u64
        };

        self.multiplier = dec!(1.0);
        self.outcome = FlipOutcome::None;
        self.session = Some(FlipSession {
            stake,
            started_ms: now,
            fail_at_ms,
            recent_fails,
        });

        info!(
            stake = %stake,
            fail_at_ms,
            wallet = %self.wallet,
            "Flip started"
        );
        Ok(())
    }

    /// Advance the flip by one tick.
    ///
    /// The elapsed-time check runs before the random draw; either alone
    /// crashes the flip. A crash consumes no draw when the delay has
    /// already expired.
    pub fn tick(&mut self) -> TickResult {
        let Some(session) = &self.session else {
            return TickResult::Idle;
        };

        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(session.started_ms);
        if elapsed >= session.fail_at_ms {
            self.fail(now);
            return TickResult::Failed;
        }

        if self.rng.next_unit() > TICK_FAIL_THRESHOLD {
            self.fail(now);
            return TickResult::Failed;
        }

        self.multiplier = (self.multiplier + MULTIPLIER_STEP).round_dp(2);
        TickResult::Alive {
            multiplier: self.multiplier,
        }
    }

    /// Settle the current flip. No-op (returns `None`) while idle.
    ///
    /// Earnings = stake × 0.1 × multiplier, rounded to 2 decimals,
    /// credited to both winnings and the withdrawable amount.
    pub fn cash_out(&mut self) -> Option<CashOutReceipt> {
        let session = self.session.take()?;
        self.outcome = FlipOutcome::Success;
        let earnings = (session.stake * PAYOUT_RATE * self.multiplier).round_dp(2);
        self.wallet.credit_winnings(earnings);

        let receipt = CashOutReceipt {
            stake: session.stake,
            multiplier: self.multiplier,
            earnings,
        };
        info!(receipt = %receipt, wallet = %self.wallet, "Cashed out");
        Some(receipt)
    }

    fn fail(&mut self, now: u64) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.outcome = FlipOutcome::Fail;
        // The log is replaced by the window snapshot taken at start plus
        // this failure — pruning happens at flip start, not here.
        self.fail_log = session.recent_fails;
        self.fail_log.push(now);
        info!(stake = %session.stake, fails_in_window = self.fail_log.len(), "Bottle fell");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
