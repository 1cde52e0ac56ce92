//! Risk classification and the composite ranking score.

use crate::config::{RiskThresholds, ScoreWeights};
use crate::types::RiskClass;

/// Assign a risk tier from annualized volatility.
///
/// Lower bounds are inclusive: a volatility exactly at
/// `conservative_below` is Balanced and one exactly at `balanced_below` is
/// Aggressive.
pub fn classify(volatility: Option<f64>, thresholds: &RiskThresholds) -> RiskClass {
    match volatility {
        None => RiskClass::Unknown,
        Some(v) if v < thresholds.conservative_below => RiskClass::Conservative,
        Some(v) if v < thresholds.balanced_below => RiskClass::Balanced,
        Some(_) => RiskClass::Aggressive,
    }
}

/// Weighted blend of Sharpe, CAGR and drawdown used to rank within a tier.
///
/// Undefined inputs count as zero here, and only here; the score itself is
/// always defined.
/// A CAGR that overflowed is undefined too, so a fund whose growth is too
/// large to represent gets no credit for it and ranks on Sharpe and drawdown.
pub fn composite_score(
    sharpe: Option<f64>,
    cagr: Option<f64>,
    max_drawdown: Option<f64>,
    weights: &ScoreWeights,
) -> f64 {
    weights.sharpe * sharpe.unwrap_or(0.0) + weights.cagr * cagr.unwrap_or(0.0)
        - weights.drawdown * max_drawdown.unwrap_or(0.0).abs()
}
