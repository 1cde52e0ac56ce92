//! Period-over-period returns from NAV series.

use crate::types::{FundSeries, ReturnObservation};

/// Simple returns between consecutive NAVs: `nav[i] / nav[i - 1] - 1`.
///
/// The first NAV has no predecessor and yields no return, so the output is
/// one shorter than the input (empty for fewer than two NAVs). Pairs that
/// produce a non-finite value, which only happens when a non-positive NAV
/// slipped past cleaning, are left out.
///
/// # Example
///
/// ```rust
/// use fundrank_core::period_returns;
///
/// let returns = period_returns(&[100.0, 110.0, 121.0]);
/// assert_eq!(returns.len(), 2);
/// assert!((returns[0] - 0.10).abs() < 1e-12);
/// ```
pub fn period_returns(navs: &[f64]) -> Vec<f64> {
    navs.windows(2)
        .map(|w| w[1] / w[0] - 1.0)
        .filter(|r| r.is_finite())
        .collect()
}

/// Dated return series of one fund, aligned to the later NAV of each pair.
pub fn return_series(series: &FundSeries) -> Vec<ReturnObservation> {
    series
        .observations
        .windows(2)
        .filter_map(|w| {
            let value = w[1].nav / w[0].nav - 1.0;
            value.is_finite().then_some(ReturnObservation {
                date: w[1].date,
                value,
            })
        })
        .collect()
}
