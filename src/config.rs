//! Configuration loading from TOML.
//!
//! Reads `config.toml` into strongly-typed structs. Every section and
//! field has a default so the binary runs out of the box without a
//! config file.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use tracing::warn;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub payment: PaymentConfig,
    pub dashboard: DashboardConfig,
}

/// Game tuning: starting balance, stake bounds, tick period.
///
/// The odds themselves (failure delay range, per-tick crash chance,
/// penalty rules) are fixed constants in [`crate::game::machine`].
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub starting_bonus: Decimal,
    pub min_stake: Decimal,
    pub max_stake: Decimal,
    pub stake_step: Decimal,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_bonus: dec!(50),
            min_stake: dec!(10),
            max_stake: dec!(100),
            stake_step: dec!(10),
            tick_interval_ms: crate::game::machine::TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Clamp a requested stake to the configured bounds, the way the
    /// stake input field does.
    pub fn clamp_stake(&self, stake: Decimal) -> Decimal {
        stake.clamp(self.min_stake, self.max_stake)
    }
}

/// Fixed payee identity for UPI recharge links.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaymentConfig {
    pub payee_vpa: String,
    pub payee_name: String,
    pub note: String,
    pub currency: String,
    pub min_recharge: Decimal,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            payee_vpa: "9953887662@ptyes".to_string(),
            payee_name: "Dakuf Games".to_string(),
            note: "Dakuf Wallet Recharge".to_string(),
            currency: "INR".to_string(),
            min_recharge: dec!(100),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing. A malformed file is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).exists() {
            warn!(path, "No config file found — using built-in defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.game.starting_bonus, dec!(50));
        assert_eq!(cfg.game.min_stake, dec!(10));
        assert_eq!(cfg.game.max_stake, dec!(100));
        assert_eq!(cfg.game.tick_interval_ms, 1000);
        assert_eq!(cfg.payment.min_recharge, dec!(100));
        assert_eq!(cfg.payment.currency, "INR");
        assert!(cfg.dashboard.enabled);
    }

    #[test]
    fn test_parse_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [game]
            starting_bonus = 75.0
            max_stake = 200.0

            [dashboard]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.game.starting_bonus, dec!(75));
        assert_eq!(cfg.game.max_stake, dec!(200));
        // Untouched fields keep their defaults.
        assert_eq!(cfg.game.min_stake, dec!(10));
        assert_eq!(cfg.dashboard.port, 9000);
        assert_eq!(cfg.payment.payee_name, "Dakuf Games");
    }

    #[test]
    fn test_clamp_stake() {
        let game = GameConfig::default();
        assert_eq!(game.clamp_stake(dec!(5)), dec!(10));
        assert_eq!(game.clamp_stake(dec!(50)), dec!(50));
        assert_eq!(game.clamp_stake(dec!(500)), dec!(100));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = AppConfig::load_or_default("/definitely/not/here.toml").unwrap();
        assert_eq!(cfg.game.starting_bonus, dec!(50));
    }
}
