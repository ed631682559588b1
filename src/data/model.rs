use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// LoanRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single microloan (one row of the source dataset).
///
/// `borrower_genders` is kept exactly as the source renders it: a loan with
/// several borrowers carries one delimited string (e.g. `"female, female"`)
/// which is treated as a single categorical value, never split per borrower.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanRecord {
    pub country: String,
    pub borrower_genders: String,
    pub loan_amount: f64,
    /// Disbursal date, ISO-8601 in the source file.
    pub date: NaiveDate,
    pub term_in_months: u32,
    pub sector: String,
}

impl LoanRecord {
    /// Calendar year of the loan date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month of the loan date (1 = January).
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

// ---------------------------------------------------------------------------
// LoanDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed choice sets for the filter
/// widgets. Loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct LoanDataset {
    /// All loans (rows), in file order.
    pub records: Vec<LoanRecord>,
    /// Sorted distinct countries.
    pub countries: Vec<String>,
    /// Sorted distinct `borrower_genders` values.
    pub genders: Vec<String>,
    /// Sorted distinct loan years.
    pub years: Vec<i32>,
    /// Dataset-wide (min, max) of `loan_amount`, both inclusive.
    pub amount_bounds: (f64, f64),
}

impl LoanDataset {
    /// Build the choice-set indices from the loaded records.
    pub fn from_records(records: Vec<LoanRecord>) -> Self {
        let mut countries: BTreeSet<String> = BTreeSet::new();
        let mut genders: BTreeSet<String> = BTreeSet::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();
        let mut min_amount = f64::INFINITY;
        let mut max_amount = f64::NEG_INFINITY;

        for rec in &records {
            countries.insert(rec.country.clone());
            genders.insert(rec.borrower_genders.clone());
            years.insert(rec.year());
            min_amount = min_amount.min(rec.loan_amount);
            max_amount = max_amount.max(rec.loan_amount);
        }

        let amount_bounds = if records.is_empty() {
            (0.0, 0.0)
        } else {
            (min_amount, max_amount)
        };

        LoanDataset {
            records,
            countries: countries.into_iter().collect(),
            genders: genders.into_iter().collect(),
            years: years.into_iter().collect(),
            amount_bounds,
        }
    }

    /// Number of loans.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, amount: f64, date: &str) -> LoanRecord {
        LoanRecord {
            country: country.to_string(),
            borrower_genders: "female".to_string(),
            loan_amount: amount,
            date: date.parse().unwrap(),
            term_in_months: 12,
            sector: "Agriculture".to_string(),
        }
    }

    #[test]
    fn choice_sets_are_sorted_and_distinct() {
        let ds = LoanDataset::from_records(vec![
            record("Peru", 300.0, "2015-03-01"),
            record("Kenya", 100.0, "2014-06-15"),
            record("Peru", 900.0, "2014-01-20"),
        ]);

        assert_eq!(ds.countries, vec!["Kenya", "Peru"]);
        assert_eq!(ds.years, vec![2014, 2015]);
        assert_eq!(ds.amount_bounds, (100.0, 900.0));
    }

    #[test]
    fn empty_dataset_has_degenerate_bounds() {
        let ds = LoanDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.amount_bounds, (0.0, 0.0));
    }
}
