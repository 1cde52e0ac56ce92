//! Risk metrics: volatility, Sharpe ratio and max drawdown.

use super::finite;

/// Sample standard deviation (n - 1 denominator).
///
/// `None` for fewer than two values, where the sample deviation is undefined.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    finite(variance.sqrt())
}

/// Annualized volatility of a return series.
///
/// # Arguments
///
/// * `returns` - Period returns (e.g., 0.01 for 1%)
/// * `trading_days` - Periods per year
///
/// # Returns
///
/// Sample standard deviation scaled by `sqrt(trading_days)`, or `None` when
/// there are not enough returns to measure dispersion.
pub fn annual_volatility(returns: &[f64], trading_days: u32) -> Option<f64> {
    sample_std_dev(returns).map(|std| std * f64::from(trading_days).sqrt())
}

/// Sharpe ratio from an annual growth rate and annualized volatility.
///
/// # Arguments
///
/// * `cagr` - Compound annual growth rate
/// * `volatility` - Annualized volatility
/// * `risk_free_rate` - Annual risk-free rate (e.g., 0.04 for 4%)
///
/// # Returns
///
/// `(cagr - risk_free_rate) / volatility`, or `None` when either input is
/// undefined or volatility is zero.
pub fn sharpe_ratio(
    cagr: Option<f64>,
    volatility: Option<f64>,
    risk_free_rate: f64,
) -> Option<f64> {
    match (cagr, volatility) {
        (Some(c), Some(v)) if v != 0.0 => finite((c - risk_free_rate) / v),
        _ => None,
    }
}

/// Maximum drawdown of a NAV series.
///
/// Each NAV is compared to the highest NAV seen up to that point; the result
/// is the most negative `nav / running_max - 1`, e.g. -0.15 for a 15% fall.
/// It is never positive, and `None` only for an empty series.
pub fn max_drawdown(navs: &[f64]) -> Option<f64> {
    let (&first, rest) = navs.split_first()?;

    let mut running_max = first;
    let mut worst = 0.0_f64;
    for &nav in rest {
        if nav > running_max {
            running_max = nav;
        }
        let drawdown = nav / running_max - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    Some(worst)
}
