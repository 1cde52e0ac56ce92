//! Per-fund metrics engine.
//!
//! Provides growth, risk and scoring calculations, and the engine that maps
//! them over every fund of a cleaned dataset.

mod engine;
mod growth;
mod risk;
mod score;

pub use engine::{compute_fund, compute_metrics};
pub use growth::cagr;
pub use risk::{annual_volatility, max_drawdown, sample_std_dev, sharpe_ratio};
pub use score::{classify, composite_score};

/// Keep finite values, map everything else to the undefined sentinel.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
