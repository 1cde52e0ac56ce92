//! Core data types for the fund metrics pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single NAV observation of a fund.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NavObservation {
    /// Observation date
    pub date: NaiveDate,
    /// Net asset value per unit (always positive after cleaning)
    pub nav: f64,
}

impl NavObservation {
    pub fn new(date: NaiveDate, nav: f64) -> Self {
        Self { date, nav }
    }
}

/// A period-over-period return, aligned to the later of the two NAV dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReturnObservation {
    /// Date of the NAV the return ends on
    pub date: NaiveDate,
    /// Simple return, e.g. 0.01 for 1%
    pub value: f64,
}

/// The cleaned NAV history of one fund, ascending by date with unique dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundSeries {
    /// Fund identifier (the `Scheme Name` column)
    pub scheme: String,
    /// Observations, strictly increasing by date
    pub observations: Vec<NavObservation>,
}

impl FundSeries {
    pub fn new(scheme: impl Into<String>, observations: Vec<NavObservation>) -> Self {
        Self {
            scheme: scheme.into(),
            observations,
        }
    }

    /// NAV values in date order.
    pub fn navs(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.nav).collect()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First and last observation dates, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

/// Risk tier assigned from annualized volatility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskClass {
    Conservative,
    Balanced,
    Aggressive,
    /// Volatility could not be computed
    Unknown,
}

impl RiskClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::Conservative => "Conservative",
            RiskClass::Balanced => "Balanced",
            RiskClass::Aggressive => "Aggressive",
            RiskClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk tier an investor can ask recommendations for.
///
/// Has no `Unknown` variant: that class is an outcome of classification,
/// never a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RiskProfile {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskProfile {
    /// The risk class a fund must carry to match this profile.
    pub fn risk_class(self) -> RiskClass {
        match self {
            RiskProfile::Conservative => RiskClass::Conservative,
            RiskProfile::Balanced => RiskClass::Balanced,
            RiskProfile::Aggressive => RiskClass::Aggressive,
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.risk_class().as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskProfile::Conservative),
            "balanced" => Ok(RiskProfile::Balanced),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(crate::Error::InvalidParameter(format!(
                "unknown risk profile: {other}"
            ))),
        }
    }
}

/// Metrics for one fund.
///
/// `None` marks a metric that is undefined for the fund's history (too few
/// observations, zero volatility, ...). It serializes as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundMetrics {
    /// Fund identifier
    #[serde(rename = "Scheme")]
    pub scheme: String,
    /// Compound annual growth rate (0.12 for 12%)
    #[serde(rename = "CAGR")]
    pub cagr: Option<f64>,
    /// Annualized volatility of returns
    #[serde(rename = "Volatility")]
    pub volatility: Option<f64>,
    /// Sharpe ratio against the configured risk-free rate
    #[serde(rename = "Sharpe")]
    pub sharpe: Option<f64>,
    /// Deepest decline from a running peak, always <= 0
    #[serde(rename = "MaxDrawdown")]
    pub max_drawdown: Option<f64>,
    /// Risk tier derived from volatility
    #[serde(rename = "RiskClass")]
    pub risk_class: RiskClass,
    /// Composite score used for ranking within a tier
    #[serde(rename = "MFScore")]
    pub score: f64,
}

/// One metrics row per fund, ordered by scheme name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MetricsTable {
    pub rows: Vec<FundMetrics>,
}

impl MetricsTable {
    pub fn new(rows: Vec<FundMetrics>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FundMetrics> {
        self.rows.iter()
    }

    /// Look up a fund by scheme name.
    pub fn get(&self, scheme: &str) -> Option<&FundMetrics> {
        self.rows.iter().find(|r| r.scheme == scheme)
    }

    /// Scheme names in table order.
    pub fn schemes(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.scheme.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a MetricsTable {
    type Item = &'a FundMetrics;
    type IntoIter = std::slice::Iter<'a, FundMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
