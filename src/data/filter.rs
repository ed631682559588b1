use std::collections::BTreeSet;

use super::model::LoanDataset;

// ---------------------------------------------------------------------------
// Selection – the current filter widget state
// ---------------------------------------------------------------------------

/// The user's active filter choices, rebuilt by the sidebar each frame.
///
/// All predicates compose by logical AND. Multi-valued filters hold the set of
/// *selected* values: an empty set matches nothing, a full set everything.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Single country choice; `None` until the user picks one.
    pub country: Option<String>,
    /// Selected `borrower_genders` values.
    pub genders: BTreeSet<String>,
    /// Inclusive [min, max] loan amount range.
    pub amount_range: (f64, f64),
    /// Selected loan years.
    pub years: BTreeSet<i32>,
}

impl Selection {
    /// The default-selection policy: every distinct gender and year selected,
    /// the amount range opened to the dataset-wide bounds, no country yet.
    pub fn with_defaults(dataset: &LoanDataset) -> Self {
        Selection {
            country: None,
            genders: dataset.genders.iter().cloned().collect(),
            amount_range: dataset.amount_bounds,
            years: dataset.years.iter().copied().collect(),
        }
    }

    /// The caption line echoing the active filters, e.g.
    /// `Data for Country: Kenya | Gender: female, male | Loan Amount: (25, 10000) | Years: 2014, 2015`.
    pub fn caption(&self) -> String {
        let genders: Vec<&str> = self.genders.iter().map(String::as_str).collect();
        let years: Vec<String> = self.years.iter().map(|y| y.to_string()).collect();
        format!(
            "Data for Country: {} | Gender: {} | Loan Amount: ({}, {}) | Years: {}",
            self.country.as_deref().unwrap_or("-"),
            genders.join(", "),
            self.amount_range.0,
            self.amount_range.1,
            years.join(", "),
        )
    }
}

// ---------------------------------------------------------------------------
// Filter application
// ---------------------------------------------------------------------------

/// Return indices of loans that pass all active filters.
///
/// A loan passes when:
/// * its country equals the selected country (none selected → empty view,
///   the caller short-circuits to a prompt)
/// * its `borrower_genders` value is in the selected gender set
/// * its amount lies within the inclusive [min, max] range
/// * its loan year is in the selected year set
pub fn filtered_indices(dataset: &LoanDataset, selection: &Selection) -> Vec<usize> {
    let Some(country) = selection.country.as_deref() else {
        return Vec::new();
    };
    let (min_amount, max_amount) = selection.amount_range;

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            rec.country == country
                && selection.genders.contains(&rec.borrower_genders)
                && rec.loan_amount >= min_amount
                && rec.loan_amount <= max_amount
                && selection.years.contains(&rec.year())
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LoanRecord;

    fn record(country: &str, gender: &str, amount: f64, date: &str) -> LoanRecord {
        LoanRecord {
            country: country.to_string(),
            borrower_genders: gender.to_string(),
            loan_amount: amount,
            date: date.parse().unwrap(),
            term_in_months: 12,
            sector: "Food".to_string(),
        }
    }

    fn fixture() -> LoanDataset {
        LoanDataset::from_records(vec![
            record("Kenya", "female", 100.0, "2014-01-10"),
            record("Kenya", "male", 400.0, "2014-06-01"),
            record("Kenya", "female", 900.0, "2015-02-14"),
            record("Peru", "female", 250.0, "2014-03-03"),
            record("Peru", "female, female", 800.0, "2016-09-09"),
        ])
    }

    #[test]
    fn filters_compose_conjunctively() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Kenya".to_string());
        sel.genders = ["female".to_string()].into();
        sel.amount_range = (100.0, 500.0);
        sel.years = [2014].into();

        let view = filtered_indices(&ds, &sel);
        assert_eq!(view, vec![0]);
        for &i in &view {
            let rec = &ds.records[i];
            assert_eq!(rec.country, "Kenya");
            assert_eq!(rec.borrower_genders, "female");
            assert!(rec.loan_amount >= 100.0 && rec.loan_amount <= 500.0);
            assert_eq!(rec.year(), 2014);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Peru".to_string());

        assert_eq!(filtered_indices(&ds, &sel), filtered_indices(&ds, &sel));
    }

    #[test]
    fn no_country_yields_empty_view() {
        let ds = fixture();
        let sel = Selection::with_defaults(&ds);
        assert!(sel.country.is_none());
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn bounds_equal_to_dataset_extremes_exclude_nothing() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Kenya".to_string());
        sel.amount_range = ds.amount_bounds;

        // 100.0 and 900.0 sit exactly on the bounds and must be included.
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn disjoint_filters_yield_empty_view() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Peru".to_string());
        sel.genders = ["male".to_string()].into();

        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn defaults_select_everything() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        assert_eq!(sel.genders.len(), ds.genders.len());
        assert_eq!(sel.years.len(), ds.years.len());
        assert_eq!(sel.amount_range, ds.amount_bounds);

        sel.country = Some("Kenya".to_string());
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn multi_borrower_gender_string_is_one_category() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Peru".to_string());
        sel.genders = ["female, female".to_string()].into();

        // Only the multi-borrower loan matches; "female" alone is a
        // different categorical value.
        assert_eq!(filtered_indices(&ds, &sel), vec![4]);
    }

    #[test]
    fn caption_echoes_the_selection() {
        let ds = fixture();
        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Kenya".to_string());
        sel.genders = ["female".to_string(), "male".to_string()].into();
        sel.amount_range = (100.0, 900.0);
        sel.years = [2014, 2015].into();

        assert_eq!(
            sel.caption(),
            "Data for Country: Kenya | Gender: female, male | Loan Amount: (100, 900) | Years: 2014, 2015"
        );
    }
}
