//! Metrics engine: one record per fund.

use super::{annual_volatility, cagr, classify, composite_score, max_drawdown, sharpe_ratio};
use crate::config::MetricsConfig;
use crate::dataset::CleanDataset;
use crate::returns::period_returns;
use crate::types::{FundMetrics, MetricsTable};

/// Compute every metric for one fund from its date-ordered NAVs.
///
/// Never fails: a history too short for a metric leaves that metric `None`
/// and a fund without a measurable volatility is classified `Unknown`.
pub fn compute_fund(scheme: &str, navs: &[f64], config: &MetricsConfig) -> FundMetrics {
    let returns = period_returns(navs);

    let cagr = cagr(navs, config.trading_days);
    let volatility = annual_volatility(&returns, config.trading_days);
    let sharpe = sharpe_ratio(cagr, volatility, config.risk_free_rate);
    let max_drawdown = max_drawdown(navs);
    let risk_class = classify(volatility, &config.thresholds);
    let score = composite_score(sharpe, cagr, max_drawdown, &config.weights);

    tracing::debug!(
        scheme,
        observations = navs.len(),
        ?cagr,
        ?volatility,
        %risk_class,
        score,
        "Computed fund metrics"
    );

    FundMetrics {
        scheme: scheme.to_string(),
        cagr,
        volatility,
        sharpe,
        max_drawdown,
        risk_class,
        score,
    }
}

/// Compute the metrics table for a cleaned dataset, one row per fund in
/// scheme order.
pub fn compute_metrics(dataset: &CleanDataset, config: &MetricsConfig) -> MetricsTable {
    let rows = dataset
        .funds()
        .iter()
        .map(|fund| compute_fund(&fund.scheme, &fund.navs(), config))
        .collect();

    MetricsTable::new(rows)
}
