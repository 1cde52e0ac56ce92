//! End-to-end run: raw table to metrics table.

use crate::config::MetricsConfig;
use crate::dataset::{clean, CleanDataset, CleaningReport, RawTable};
use crate::metrics::compute_metrics;
use crate::types::MetricsTable;
use crate::{Error, Result};

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Cleaned per-fund NAV histories the metrics were computed from
    pub dataset: CleanDataset,
    /// One row per fund
    pub metrics: MetricsTable,
}

impl Analysis {
    pub fn report(&self) -> &CleaningReport {
        &self.dataset.report
    }
}

/// Clean a raw NAV table and compute metrics for every fund.
///
/// Each call starts from scratch; nothing is carried over between runs.
///
/// # Errors
///
/// - `Error::Schema` when a required column is missing
/// - `Error::EmptyDataset` when cleaning leaves no rows
/// - `Error::InsufficientHistory` when no fund has two observations, so not a
///   single return can be computed
/// - `Error::InvalidParameter` when `config` does not validate
pub fn analyze(raw: RawTable, config: &MetricsConfig) -> Result<Analysis> {
    config.validate()?;

    let dataset = clean(raw)?;
    if dataset.return_count() == 0 {
        return Err(Error::InsufficientHistory);
    }

    let metrics = compute_metrics(&dataset, config);

    let report = &dataset.report;
    tracing::info!(
        funds = metrics.len(),
        rows_kept = report.rows_kept,
        rows_dropped = report.rows_dropped(),
        "Computed fund metrics"
    );

    Ok(Analysis { dataset, metrics })
}
