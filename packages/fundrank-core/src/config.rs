//! Metrics engine configuration.
//!
//! The defaults are the business parameters the rankings are built on; a TOML
//! file can override any subset of them.
//!
//! ```toml
//! trading_days = 252
//! risk_free_rate = 0.04
//!
//! [thresholds]
//! conservative_below = 0.05
//! balanced_below = 0.12
//!
//! [weights]
//! sharpe = 0.5
//! cagr = 0.3
//! drawdown = 0.2
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Trading days per year used for annualization.
pub const TRADING_DAYS: u32 = 252;

/// Annual risk-free rate used by the Sharpe ratio.
pub const RISK_FREE_RATE: f64 = 0.04;

/// Volatility cut-offs between risk tiers.
///
/// Intervals are half-open with the lower bound inclusive:
/// `[0, conservative_below)` is Conservative, `[conservative_below,
/// balanced_below)` is Balanced and everything above is Aggressive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskThresholds {
    pub conservative_below: f64,
    pub balanced_below: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            conservative_below: 0.05,
            balanced_below: 0.12,
        }
    }
}

/// Weights of the composite score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreWeights {
    pub sharpe: f64,
    pub cagr: f64,
    /// Applied to the absolute max drawdown and subtracted
    pub drawdown: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sharpe: 0.5,
            cagr: 0.3,
            drawdown: 0.2,
        }
    }
}

/// Parameters of the metrics engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Observations per year; the CAGR exponent uses the observation count
    /// divided by this, not elapsed calendar time
    pub trading_days: u32,
    /// Annual risk-free rate (0.04 for 4%)
    pub risk_free_rate: f64,
    pub thresholds: RiskThresholds,
    pub weights: ScoreWeights,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            trading_days: TRADING_DAYS,
            risk_free_rate: RISK_FREE_RATE,
            thresholds: RiskThresholds::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl MetricsConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MetricsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "Loaded metrics config");
        Ok(config)
    }

    /// Check the parameters make sense together.
    pub fn validate(&self) -> Result<()> {
        if self.trading_days == 0 {
            return Err(Error::InvalidParameter(
                "trading_days must be positive".to_string(),
            ));
        }

        if !self.risk_free_rate.is_finite() {
            return Err(Error::InvalidParameter(
                "risk_free_rate must be finite".to_string(),
            ));
        }

        let t = &self.thresholds;
        if !(t.conservative_below.is_finite() && t.balanced_below.is_finite())
            || t.conservative_below < 0.0
            || t.conservative_below > t.balanced_below
        {
            return Err(Error::InvalidParameter(format!(
                "thresholds must satisfy 0 <= conservative_below <= balanced_below (got {} and {})",
                t.conservative_below, t.balanced_below
            )));
        }

        let w = &self.weights;
        if ![w.sharpe, w.cagr, w.drawdown].iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParameter(
                "score weights must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
