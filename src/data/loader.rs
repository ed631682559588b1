use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{LoanDataset, LoanRecord};

/// Columns the loan schema requires. Extra columns in the file are ignored.
const REQUIRED_COLUMNS: [&str; 6] = [
    "country",
    "borrower_genders",
    "loan_amount",
    "date",
    "term_in_months",
    "sector",
];

/// Structural problems with the source file, beyond row-level parse errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("file contains no loan records")]
    Empty,
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the loan dataset from a CSV file.
///
/// Read exactly once at startup; any failure here is fatal for the process.
/// There is no retry and no partial load.
pub fn load_csv(path: &Path) -> Result<LoanDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<LoanRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(LoadError::Empty.into());
    }

    log::debug!("parsed {} loan records from {}", records.len(), path.display());
    Ok(LoanDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("loanscope-{}-{}.csv", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_well_formed_file() {
        let path = write_temp_csv(
            "well-formed",
            "country,borrower_genders,loan_amount,date,term_in_months,sector,extra\n\
             Kenya,female,250.0,2014-03-01,8,Food,ignored\n\
             Peru,male,1000.0,2015-11-20,14,Retail,ignored\n",
        );
        let ds = load_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.countries, vec!["Kenya", "Peru"]);
        assert_eq!(ds.records[0].term_in_months, 8);
        assert_eq!(ds.records[1].year(), 2015);
    }

    #[test]
    fn missing_column_is_fatal() {
        let path =
            write_temp_csv("no-column", "country,loan_amount,date\nKenya,250.0,2014-03-01\n");
        let err = load_csv(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_csv(Path::new("/nonexistent/loans.csv")).is_err());
    }
}
