//! CSV loading of NAV tables.

use super::{normalize_column, require_columns, RawRow, RawTable};
use crate::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a `Scheme Name, Date, NAV` CSV into a raw table.
///
/// Headers are trimmed and extra columns are ignored. A missing required
/// column fails before any row is read. Short rows are tolerated; their
/// missing cells count as blank.
pub fn load_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(normalize_column).collect();
    let index = require_columns(&columns)?;

    let mut table = RawTable::new(columns);
    for result in reader.records() {
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("");
        table.push(RawRow::from_text(
            cell(index.scheme),
            cell(index.date),
            cell(index.nav),
        ));
    }

    tracing::debug!(rows = table.len(), "Loaded NAV CSV");
    Ok(table)
}

/// Read a NAV CSV file from disk.
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    tracing::info!(path = %path.display(), "Reading NAV file");
    load_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_csv() {
        let data = "Scheme Name,Date,NAV\n\
                    Alpha,2024-01-01,10.0\n\
                    Alpha,2024-01-02,10.5\n\
                    Beta,2024-01-01,abc\n";

        let table = load_csv(data.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["Scheme Name", "Date", "NAV"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0], RawRow::new("Alpha", "2024-01-01", 10.0));
        assert_eq!(table.rows[2].nav, None);
    }

    #[test]
    fn test_load_csv_reordered_and_padded_headers() {
        let data = " NAV , Category ,Date, Scheme Name \n\
                    12.5, Debt, 2024-01-01, Alpha Fund \n";

        let table = load_csv(data.as_bytes()).unwrap();

        assert_eq!(table.rows[0], RawRow::new("Alpha Fund", "2024-01-01", 12.5));
    }

    #[test]
    fn test_load_csv_short_row() {
        let data = "Scheme Name,Date,NAV\nAlpha,2024-01-01\n";

        let table = load_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].nav, None);
    }

    #[test]
    fn test_load_csv_missing_column() {
        let data = "Scheme,Date,NAV\nAlpha,2024-01-01,10.0\n";

        match load_csv(data.as_bytes()) {
            Err(Error::Schema { missing }) => assert_eq!(missing, vec!["Scheme Name"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_csv_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Scheme Name,Date,NAV").unwrap();
        writeln!(file, "Alpha,2024-01-01,10.0").unwrap();

        let table = load_csv_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_csv_path_missing_file() {
        let result = load_csv_path("/nonexistent/navs.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
