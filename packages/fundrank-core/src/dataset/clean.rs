//! Row-level cleaning of a raw NAV table.

use super::{require_columns, CleanDataset, CleaningReport, RawTable};
use crate::types::{FundSeries, NavObservation};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%b-%Y", "%d %b %Y", "%Y%m%d",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date from the formats NAV exports commonly use.
///
/// Slashed dates are read month-first, so `03/04/2024` is 4 March; day-first
/// is only used when the month-first reading is impossible (`15/03/2024`).
/// Timestamps keep only their date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Clean a raw table into per-fund NAV series.
///
/// Rows with a blank scheme, an unparseable date or a NAV that is not a
/// positive finite number are dropped. Each fund's observations end up in
/// ascending date order; when a date repeats, the row appearing last in the
/// input wins.
pub fn clean(raw: RawTable) -> Result<CleanDataset> {
    require_columns(&raw.columns)?;

    let mut report = CleaningReport {
        rows_read: raw.rows.len(),
        ..Default::default()
    };

    let mut grouped: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();

    for row in raw.rows {
        let scheme = row.scheme.trim();
        if scheme.is_empty() {
            report.missing_scheme += 1;
            continue;
        }

        let Some(date) = parse_date(&row.date) else {
            report.invalid_dates += 1;
            continue;
        };

        let nav = match row.nav {
            Some(nav) if nav.is_finite() && nav > 0.0 => nav,
            other => {
                tracing::warn!(scheme, %date, nav = ?other, "Dropping row with invalid NAV");
                report.invalid_navs += 1;
                continue;
            }
        };

        let previous = grouped
            .entry(scheme.to_string())
            .or_default()
            .insert(date, nav);
        if previous.is_some() {
            report.duplicate_dates += 1;
        }
    }

    let funds: Vec<FundSeries> = grouped
        .into_iter()
        .map(|(scheme, navs)| {
            let observations = navs
                .into_iter()
                .map(|(date, nav)| NavObservation::new(date, nav))
                .collect();
            FundSeries::new(scheme, observations)
        })
        .collect();

    report.rows_kept = funds.iter().map(FundSeries::len).sum();
    report.funds = funds.len();

    if report.invalid_dates > 0 {
        tracing::warn!(count = report.invalid_dates, "Dropped rows with unparseable dates");
    }

    if funds.is_empty() {
        return Err(Error::EmptyDataset);
    }

    tracing::debug!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        funds = report.funds,
        "Cleaned NAV table"
    );

    Ok(CleanDataset { funds, report })
}
