//! Shared types for the BottleFlip game.
//!
//! The wallet, flip outcome, and domain errors used across the game
//! engine, payment, and dashboard modules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// The player's in-memory wallet.
///
/// `bonus` is non-withdrawable promotional balance, consumed before
/// recharged funds. `winnings` is a running total for display; cashed-out
/// earnings are credited to both `winnings` and `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub bonus: Decimal,
    pub amount: Decimal,
    pub winnings: Decimal,
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "₹{:.2} (bonus ₹{:.2}, recharge ₹{:.2}) | winnings ₹{:.2}",
            self.total(),
            self.bonus,
            self.amount,
            self.winnings,
        )
    }
}

impl Wallet {
    /// A fresh wallet holding only the given signup bonus.
    pub fn with_bonus(bonus: Decimal) -> Self {
        Self {
            bonus,
            amount: Decimal::ZERO,
            winnings: Decimal::ZERO,
        }
    }

    /// Spendable balance: bonus + recharged amount. Derived, never stored.
    pub fn total(&self) -> Decimal {
        self.bonus + self.amount
    }

    /// Debit a stake, drawing from bonus first and the remainder from
    /// the recharged amount. Neither balance ever goes negative; an
    /// insufficient total leaves the wallet untouched.
    pub fn debit(&mut self, stake: Decimal) -> Result<(), GameError> {
        if self.total() < stake {
            return Err(GameError::InsufficientBalance {
                needed: stake,
                available: self.total(),
            });
        }
        if self.bonus >= stake {
            self.bonus -= stake;
        } else {
            let remainder = stake - self.bonus;
            self.bonus = Decimal::ZERO;
            self.amount -= remainder;
        }
        Ok(())
    }

    /// Credit cashed-out earnings to both the winnings total and the
    /// withdrawable amount.
    pub fn credit_winnings(&mut self, earnings: Decimal) {
        self.winnings += earnings;
        self.amount += earnings;
    }
}

// ---------------------------------------------------------------------------
// Flip outcome
// ---------------------------------------------------------------------------

/// Result of the last flip. Display only — nothing branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipOutcome {
    None,
    Success,
    Fail,
}

impl fmt::Display for FlipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipOutcome::None => write!(f, "none"),
            FlipOutcome::Success => write!(f, "success"),
            FlipOutcome::Fail => write!(f, "fail"),
        }
    }
}

/// Settlement details returned by a successful cash-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashOutReceipt {
    pub stake: Decimal,
    pub multiplier: Decimal,
    pub earnings: Decimal,
}

impl fmt::Display for CashOutReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stake ₹{:.2} @ x{:.2} → ₹{:.2}",
            self.stake, self.multiplier, self.earnings,
        )
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Domain errors. All of these surface to the player as blocking
/// alerts in the UI; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Insufficient balance: need ₹{needed:.2}, have ₹{available:.2} — recharge your wallet to continue playing")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    #[error("Minimum recharge is ₹{minimum}, got ₹{requested}")]
    RechargeBelowMinimum { requested: Decimal, minimum: Decimal },

    #[error("A flip is already in progress")]
    FlipInProgress,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wallet_with_bonus() {
        let w = Wallet::with_bonus(dec!(50));
        assert_eq!(w.bonus, dec!(50));
        assert_eq!(w.amount, Decimal::ZERO);
        assert_eq!(w.winnings, Decimal::ZERO);
        assert_eq!(w.total(), dec!(50));
    }

    #[test]
    fn test_debit_from_bonus_only() {
        let mut w = Wallet::with_bonus(dec!(50));
        w.debit(dec!(10)).unwrap();
        assert_eq!(w.bonus, dec!(40));
        assert_eq!(w.amount, Decimal::ZERO);
    }

    #[test]
    fn test_debit_spills_into_amount() {
        let mut w = Wallet {
            bonus: dec!(5),
            amount: dec!(20),
            winnings: Decimal::ZERO,
        };
        w.debit(dec!(10)).unwrap();
        assert_eq!(w.bonus, Decimal::ZERO);
        assert_eq!(w.amount, dec!(15));
    }

    #[test]
    fn test_debit_exact_bonus() {
        let mut w = Wallet::with_bonus(dec!(10));
        w.debit(dec!(10)).unwrap();
        assert_eq!(w.bonus, Decimal::ZERO);
        assert_eq!(w.amount, Decimal::ZERO);
    }

    #[test]
    fn test_debit_insufficient_leaves_wallet_untouched() {
        let mut w = Wallet {
            bonus: dec!(3),
            amount: dec!(4),
            winnings: dec!(1),
        };
        let err = w.debit(dec!(10)).unwrap_err();
        assert!(matches!(err, GameError::InsufficientBalance { .. }));
        assert_eq!(w.bonus, dec!(3));
        assert_eq!(w.amount, dec!(4));
        assert_eq!(w.winnings, dec!(1));
    }

    #[test]
    fn test_debit_never_goes_negative() {
        let mut w = Wallet {
            bonus: dec!(7),
            amount: dec!(3),
            winnings: Decimal::ZERO,
        };
        w.debit(dec!(10)).unwrap();
        assert!(w.bonus >= Decimal::ZERO);
        assert!(w.amount >= Decimal::ZERO);
    }

    #[test]
    fn test_credit_winnings_hits_both_fields() {
        let mut w = Wallet::with_bonus(dec!(40));
        w.credit_winnings(dec!(1.50));
        assert_eq!(w.winnings, dec!(1.50));
        assert_eq!(w.amount, dec!(1.50));
        assert_eq!(w.bonus, dec!(40));
    }

    #[test]
    fn test_wallet_display() {
        let w = Wallet::with_bonus(dec!(50));
        let s = format!("{w}");
        assert!(s.contains("50.00"));
        assert!(s.contains("winnings"));
    }

    #[test]
    fn test_wallet_serialization_roundtrip() {
        let w = Wallet {
            bonus: dec!(12.50),
            amount: dec!(7.25),
            winnings: dec!(3.00),
        };
        let json = serde_json::to_string(&w).unwrap();
        let parsed: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total(), dec!(19.75));
    }

    #[test]
    fn test_outcome_display_and_serde() {
        assert_eq!(format!("{}", FlipOutcome::Success), "success");
        assert_eq!(
            serde_json::to_string(&FlipOutcome::Fail).unwrap(),
            "\"fail\""
        );
        let parsed: FlipOutcome = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, FlipOutcome::None);
    }

    #[test]
    fn test_receipt_display() {
        let r = CashOutReceipt {
            stake: dec!(10),
            multiplier: dec!(1.5),
            earnings: dec!(1.50),
        };
        let s = format!("{r}");
        assert!(s.contains("x1.50"));
        assert!(s.contains("1.50"));
    }

    #[test]
    fn test_error_display() {
        let e = GameError::InsufficientBalance {
            needed: dec!(10),
            available: dec!(4),
        };
        let s = format!("{e}");
        assert!(s.contains("10.00"));
        assert!(s.contains("4.00"));

        let e = GameError::RechargeBelowMinimum {
            requested: dec!(50),
            minimum: dec!(100),
        };
        assert!(format!("{e}").contains("100"));
    }
}
