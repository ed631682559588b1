use crate::data::filter::{filtered_indices, Selection};
use crate::data::model::LoanDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once before the event loop starts and never changes;
/// every mutator here only rewrites the `Selection` and recomputes the
/// filtered view from scratch.
pub struct AppState {
    /// The immutable loan dataset.
    pub dataset: LoanDataset,

    /// Current filter widget values.
    pub selection: Selection,

    /// Indices of loans passing the current filters (recomputed on change).
    pub visible_indices: Vec<usize>,
}

impl AppState {
    /// Wrap a freshly loaded dataset with the default select-all filters.
    pub fn new(dataset: LoanDataset) -> Self {
        let selection = Selection::with_defaults(&dataset);
        let visible_indices = filtered_indices(&dataset, &selection);
        Self {
            dataset,
            selection,
            visible_indices,
        }
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.selection);
    }

    /// Choose the single country filter.
    pub fn set_country(&mut self, country: String) {
        self.selection.country = Some(country);
        self.refilter();
    }

    /// Toggle a single gender value in the gender filter.
    pub fn toggle_gender(&mut self, gender: &str) {
        if !self.selection.genders.remove(gender) {
            self.selection.genders.insert(gender.to_string());
        }
        self.refilter();
    }

    /// Toggle a single year in the year filter.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
        self.refilter();
    }

    /// Select all genders.
    pub fn select_all_genders(&mut self) {
        self.selection.genders = self.dataset.genders.iter().cloned().collect();
        self.refilter();
    }

    /// Deselect all genders.
    pub fn select_no_genders(&mut self) {
        self.selection.genders.clear();
        self.refilter();
    }

    /// Select all years.
    pub fn select_all_years(&mut self) {
        self.selection.years = self.dataset.years.iter().copied().collect();
        self.refilter();
    }

    /// Deselect all years.
    pub fn select_no_years(&mut self) {
        self.selection.years.clear();
        self.refilter();
    }

    /// Set the amount range, clamped to the dataset bounds and kept ordered.
    pub fn set_amount_range(&mut self, mut lo: f64, mut hi: f64) {
        let (min, max) = self.dataset.amount_bounds;
        lo = lo.clamp(min, max);
        hi = hi.clamp(min, max);
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        self.selection.amount_range = (lo, hi);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LoanRecord;

    fn dataset() -> LoanDataset {
        let record = |country: &str, amount: f64, date: &str| LoanRecord {
            country: country.to_string(),
            borrower_genders: "female".to_string(),
            loan_amount: amount,
            date: date.parse().unwrap(),
            term_in_months: 12,
            sector: "Food".to_string(),
        };
        LoanDataset::from_records(vec![
            record("Kenya", 100.0, "2014-01-01"),
            record("Kenya", 500.0, "2015-01-01"),
            record("Peru", 900.0, "2015-06-01"),
        ])
    }

    #[test]
    fn starts_in_the_no_country_state() {
        let state = AppState::new(dataset());
        assert!(state.selection.country.is_none());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn mutators_refilter_immediately() {
        let mut state = AppState::new(dataset());

        state.set_country("Kenya".to_string());
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.toggle_year(2015);
        assert_eq!(state.visible_indices, vec![0]);

        state.select_all_years();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn amount_range_is_clamped_and_ordered() {
        let mut state = AppState::new(dataset());
        state.set_country("Peru".to_string());

        state.set_amount_range(2000.0, -50.0);
        assert_eq!(state.selection.amount_range, (100.0, 900.0));
        assert_eq!(state.visible_indices, vec![2]);
    }
}
