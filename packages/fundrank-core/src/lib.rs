//! Fundrank Core - Mutual fund metrics and risk-matched ranking library.
//!
//! This crate turns a raw per-date, per-fund NAV table into per-fund statistics
//! and ranks funds within a risk tier:
//!
//! - **Dataset cleaning**: Schema check, date parsing, sorting and de-duplication
//! - **Returns**: Period-over-period return series per fund
//! - **Metrics**: CAGR, annualized volatility, Sharpe ratio, max drawdown
//! - **Ranking**: Risk classification, composite score, top-K per tier
//!
//! # Example
//!
//! ```rust
//! use fundrank_core::{analyze, recommend, MetricsConfig, RawRow, RawTable, RiskProfile};
//!
//! let mut raw = RawTable::with_standard_columns();
//! for (date, nav) in [("2024-01-01", 100.0), ("2024-01-02", 100.1), ("2024-01-03", 100.3)] {
//!     raw.push(RawRow::new("Alpha Bond Fund", date, nav));
//! }
//!
//! let analysis = analyze(raw, &MetricsConfig::default()).unwrap();
//! let picks = recommend(&analysis.metrics, RiskProfile::Aggressive, 3).unwrap();
//! assert!(picks.len() <= 3);
//! ```

pub mod config;
pub mod dataset;
pub mod metrics;
pub mod pipeline;
pub mod ranking;
pub mod returns;
pub mod types;

// Re-export commonly used types
pub use config::{MetricsConfig, RiskThresholds, ScoreWeights};
pub use dataset::{clean, load_csv, load_csv_path, CleanDataset, CleaningReport, RawRow, RawTable};
pub use types::{
    FundMetrics, FundSeries, MetricsTable, NavObservation, ReturnObservation, RiskClass,
    RiskProfile,
};

// Re-export main functionality
pub use metrics::{
    annual_volatility, cagr, classify, composite_score, compute_fund, compute_metrics,
    max_drawdown, sharpe_ratio,
};
pub use pipeline::{analyze, Analysis};
pub use ranking::{recommend, risk_distribution};
pub use returns::{period_returns, return_series};

/// Error types for fundrank-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("CSV must contain: Scheme Name, Date, NAV (missing: {})", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("No valid rows remain after cleaning")]
    EmptyDataset,

    #[error("Not enough NAV history to compute metrics")]
    InsufficientHistory,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for fundrank-core operations.
pub type Result<T> = std::result::Result<T, Error>;
