//! NAV dataset ingestion and cleaning.
//!
//! Turns a raw `Scheme Name, Date, NAV` table into per-fund series that are
//! sorted by date, free of duplicate dates and of rows that cannot be used.

mod clean;
mod loader;

pub use clean::{clean, parse_date};
pub use loader::{load_csv, load_csv_path};

use crate::types::FundSeries;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column holding the fund identifier.
pub const SCHEME_COLUMN: &str = "Scheme Name";
/// Column holding the observation date.
pub const DATE_COLUMN: &str = "Date";
/// Column holding the net asset value.
pub const NAV_COLUMN: &str = "NAV";

/// Columns every input table must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [SCHEME_COLUMN, DATE_COLUMN, NAV_COLUMN];

/// One uncleaned input row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub scheme: String,
    /// Date as found in the input, parsed during cleaning
    pub date: String,
    /// `None` when the input cell was not a number
    pub nav: Option<f64>,
}

impl RawRow {
    pub fn new(scheme: impl Into<String>, date: impl Into<String>, nav: f64) -> Self {
        Self {
            scheme: scheme.into(),
            date: date.into(),
            nav: Some(nav),
        }
    }

    /// Build a row from the textual NAV cell of a file.
    pub fn from_text(scheme: &str, date: &str, nav: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            date: date.to_string(),
            nav: nav.trim().parse::<f64>().ok(),
        }
    }
}

/// An uncleaned input table: the column names seen plus the rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// A table carrying exactly the required columns.
    pub fn with_standard_columns() -> Self {
        Self::new(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect())
    }

    pub fn push(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Strip whitespace and a leading UTF-8 BOM from a column header.
pub fn normalize_column(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub scheme: usize,
    pub date: usize,
    pub nav: usize,
}

/// Resolve the required columns, failing with every missing name.
pub(crate) fn require_columns<S: AsRef<str>>(columns: &[S]) -> Result<ColumnIndex> {
    let normalized: Vec<String> = columns.iter().map(|c| normalize_column(c.as_ref())).collect();
    let position = |name: &str| normalized.iter().position(|c| c == name);

    match (
        position(SCHEME_COLUMN),
        position(DATE_COLUMN),
        position(NAV_COLUMN),
    ) {
        (Some(scheme), Some(date), Some(nav)) => Ok(ColumnIndex { scheme, date, nav }),
        _ => {
            let missing = REQUIRED_COLUMNS
                .iter()
                .filter(|name| position(name).is_none())
                .map(|name| name.to_string())
                .collect();
            Err(Error::Schema { missing })
        }
    }
}

/// What cleaning kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the raw table
    pub rows_read: usize,
    /// Observations left after cleaning
    pub rows_kept: usize,
    /// Rows with a blank scheme name
    pub missing_scheme: usize,
    /// Rows whose date could not be parsed
    pub invalid_dates: usize,
    /// Rows whose NAV was missing, non-numeric, non-finite or not positive
    pub invalid_navs: usize,
    /// Earlier rows replaced by a later row for the same scheme and date
    pub duplicate_dates: usize,
    /// Distinct funds after cleaning
    pub funds: usize,
}

impl CleaningReport {
    /// Total rows removed for any reason.
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

/// Cleaned NAV histories, one per fund, ordered by scheme name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanDataset {
    pub funds: Vec<FundSeries>,
    pub report: CleaningReport,
}

impl CleanDataset {
    pub fn funds(&self) -> &[FundSeries] {
        &self.funds
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    /// Look up a fund by scheme name.
    pub fn get(&self, scheme: &str) -> Option<&FundSeries> {
        self.funds.iter().find(|f| f.scheme == scheme)
    }

    /// NAV histories of the selected schemes, in the order requested.
    ///
    /// Unknown scheme names are skipped.
    pub fn history<S: AsRef<str>>(&self, schemes: &[S]) -> Vec<&FundSeries> {
        schemes.iter().filter_map(|s| self.get(s.as_ref())).collect()
    }

    /// Total number of return observations the dataset yields.
    pub fn return_count(&self) -> usize {
        self.funds.iter().map(|f| f.len().saturating_sub(1)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_from_text() {
        let row = RawRow::from_text("Alpha", "2024-01-01", " 10.25 ");
        assert_eq!(row.nav, Some(10.25));

        let row = RawRow::from_text("Alpha", "2024-01-01", "n/a");
        assert_eq!(row.nav, None);
    }

    #[test]
    fn test_require_columns_trims_headers() {
        let columns = vec!["\u{feff} Scheme Name", "NAV ", " Date", "Extra"];
        let index = require_columns(&columns).unwrap();

        assert_eq!(
            index,
            ColumnIndex {
                scheme: 0,
                date: 2,
                nav: 1
            }
        );
    }

    #[test]
    fn test_require_columns_reports_missing() {
        let columns = vec!["Scheme Name", "Price"];
        let result = require_columns(&columns);

        match result {
            Err(Error::Schema { missing }) => {
                assert_eq!(missing, vec!["Date".to_string(), "NAV".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_cleaning_report_rows_dropped() {
        let report = CleaningReport {
            rows_read: 10,
            rows_kept: 7,
            ..Default::default()
        };
        assert_eq!(report.rows_dropped(), 3);
    }
}
