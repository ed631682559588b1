use std::collections::BTreeMap;

use super::model::LoanDataset;

// ---------------------------------------------------------------------------
// Grouped tables – one per chart panel
// ---------------------------------------------------------------------------
//
// Everything in this module is a pure function over the dataset plus a list
// of row indices (the filtered view). Tables are rebuilt on every render and
// dropped afterwards; nothing is cached.

/// Row count per sector over the view, descending by count (name breaks ties
/// so the ordering is stable across frames).
pub fn sector_counts(dataset: &LoanDataset, view: &[usize]) -> Vec<(String, usize)> {
    counts_by(view, |i| dataset.records[i].sector.clone())
}

/// Row count per `borrower_genders` value over the view, descending.
pub fn gender_counts(dataset: &LoanDataset, view: &[usize]) -> Vec<(String, usize)> {
    counts_by(view, |i| dataset.records[i].borrower_genders.clone())
}

fn counts_by(view: &[usize], key: impl Fn(usize) -> String) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for &i in view {
        *counts.entry(key(i)).or_default() += 1;
    }
    let mut table: Vec<(String, usize)> = counts.into_iter().collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

/// One bucket of the loan-term histogram: `[lo, hi)` except the last bucket,
/// which also includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TermBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Histogram of `term_in_months` over the view in `bins` equal-width buckets.
/// A view whose terms are all identical collapses to a single bucket.
pub fn term_histogram(dataset: &LoanDataset, view: &[usize], bins: usize) -> Vec<TermBin> {
    if view.is_empty() || bins == 0 {
        return Vec::new();
    }

    let terms: Vec<f64> = view
        .iter()
        .map(|&i| dataset.records[i].term_in_months as f64)
        .collect();
    let min = terms.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = terms.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![TermBin {
            lo: min,
            hi: max,
            count: terms.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for t in &terms {
        let idx = (((t - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| TermBin {
            lo: min + width * i as f64,
            hi: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Total loan amount per calendar month for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub year: i32,
    /// (month 1–12, summed amount), in Jan…Dec order. Months with no loans
    /// are absent.
    pub totals: Vec<(u32, f64)>,
}

/// Sum of `loan_amount` grouped by (year, month) over the view, one series
/// per year, years ascending and months in calendar order within each.
pub fn monthly_loan_totals(dataset: &LoanDataset, view: &[usize]) -> Vec<MonthlySeries> {
    let mut sums: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for &i in view {
        let rec = &dataset.records[i];
        *sums.entry((rec.year(), rec.month())).or_default() += rec.loan_amount;
    }

    let mut series: Vec<MonthlySeries> = Vec::new();
    for ((year, month), total) in sums {
        match series.last_mut() {
            Some(s) if s.year == year => s.totals.push((month, total)),
            _ => series.push(MonthlySeries {
                year,
                totals: vec![(month, total)],
            }),
        }
    }
    series
}

/// Mean `loan_amount` per country over the *full* dataset, descending,
/// truncated to `top_n`. Deliberately ignores the active filters so the
/// ranking always reflects the whole dataset.
pub fn top_countries_by_mean_amount(dataset: &LoanDataset, top_n: usize) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in &dataset.records {
        let entry = sums.entry(rec.country.as_str()).or_insert((0.0, 0));
        entry.0 += rec.loan_amount;
        entry.1 += 1;
    }

    let mut means: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(country, (sum, n))| (country.to_string(), sum / n as f64))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    means.truncate(top_n);
    means
}

// ---------------------------------------------------------------------------
// Summary scalars
// ---------------------------------------------------------------------------

/// `loan_amount` of every row in the view, in view order.
pub fn view_amounts(dataset: &LoanDataset, view: &[usize]) -> Vec<f64> {
    view.iter().map(|&i| dataset.records[i].loan_amount).collect()
}

/// Arithmetic mean; `None` on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median with mid-interpolation between the two central values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, 0.5))
}

/// Most frequent value; the smallest one wins ties.
pub fn mode(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best = (sorted[0], 0usize);
    let mut run = (sorted[0], 0usize);
    for &v in &sorted {
        if v == run.0 {
            run.1 += 1;
        } else {
            run = (v, 1);
        }
        if run.1 > best.1 {
            best = run;
        }
    }
    Some(best.0)
}

/// Quantile by linear interpolation over an already-sorted slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Descriptive-statistics table
// ---------------------------------------------------------------------------

/// Descriptive statistics for one numeric column of the view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1); NaN for a single row.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// The describe table over the view's numeric columns: `loan_amount`,
/// `term_in_months`, and the derived loan year. Empty view → empty table.
pub fn describe(dataset: &LoanDataset, view: &[usize]) -> Vec<ColumnSummary> {
    if view.is_empty() {
        return Vec::new();
    }

    let columns: [(&'static str, Vec<f64>); 3] = [
        ("loan_amount", view_amounts(dataset, view)),
        (
            "term_in_months",
            view.iter()
                .map(|&i| dataset.records[i].term_in_months as f64)
                .collect(),
        ),
        (
            "year",
            view.iter()
                .map(|&i| dataset.records[i].year() as f64)
                .collect(),
        ),
    ];

    columns
        .into_iter()
        .map(|(column, values)| summarize(column, &values))
        .collect()
}

fn summarize(column: &'static str, values: &[f64]) -> ColumnSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    ColumnSummary {
        column,
        count: n,
        mean,
        std,
        min: sorted[0],
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, Selection};
    use crate::data::model::LoanRecord;

    fn record(
        country: &str,
        gender: &str,
        amount: f64,
        date: &str,
        term: u32,
        sector: &str,
    ) -> LoanRecord {
        LoanRecord {
            country: country.to_string(),
            borrower_genders: gender.to_string(),
            loan_amount: amount,
            date: date.parse().unwrap(),
            term_in_months: term,
            sector: sector.to_string(),
        }
    }

    fn fixture() -> LoanDataset {
        LoanDataset::from_records(vec![
            record("Kenya", "female", 100.0, "2014-01-10", 6, "Food"),
            record("Kenya", "female", 200.0, "2014-01-25", 8, "Food"),
            record("Kenya", "male", 200.0, "2014-06-01", 14, "Retail"),
            record("Kenya", "female", 300.0, "2015-02-14", 20, "Agriculture"),
            record("Peru", "female", 1000.0, "2014-03-03", 26, "Retail"),
            record("Peru", "male", 2000.0, "2015-09-09", 36, "Food"),
        ])
    }

    fn full_view(ds: &LoanDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn sector_counts_sorted_descending() {
        let ds = fixture();
        let table = sector_counts(&ds, &full_view(&ds));
        assert_eq!(
            table,
            vec![
                ("Food".to_string(), 3),
                ("Retail".to_string(), 2),
                ("Agriculture".to_string(), 1),
            ]
        );
    }

    #[test]
    fn summary_scalars_match_hand_computed_fixture() {
        let amounts = [100.0, 200.0, 200.0, 300.0];
        assert_eq!(mean(&amounts), Some(200.0));
        assert_eq!(median(&amounts), Some(200.0));
        assert_eq!(mode(&amounts), Some(200.0));
    }

    #[test]
    fn median_interpolates_between_central_values() {
        assert_eq!(median(&[100.0, 200.0, 300.0, 400.0]), Some(250.0));
    }

    #[test]
    fn mode_ties_resolve_to_smallest_value() {
        assert_eq!(mode(&[300.0, 100.0, 300.0, 100.0]), Some(100.0));
    }

    #[test]
    fn empty_view_aggregates_are_empty_without_panicking() {
        let ds = fixture();
        let view: Vec<usize> = Vec::new();

        assert!(sector_counts(&ds, &view).is_empty());
        assert!(gender_counts(&ds, &view).is_empty());
        assert!(term_histogram(&ds, &view, 30).is_empty());
        assert!(monthly_loan_totals(&ds, &view).is_empty());
        assert!(describe(&ds, &view).is_empty());
        assert_eq!(mean(&view_amounts(&ds, &view)), None);
        assert_eq!(median(&view_amounts(&ds, &view)), None);
        assert_eq!(mode(&view_amounts(&ds, &view)), None);
    }

    #[test]
    fn top_countries_ignores_the_active_selection() {
        let ds = fixture();

        let mut sel = Selection::with_defaults(&ds);
        sel.country = Some("Kenya".to_string());
        let narrow_view = filtered_indices(&ds, &sel);
        assert!(!narrow_view.is_empty());

        // Computed from the full dataset regardless of any view.
        let table = top_countries_by_mean_amount(&ds, 10);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].0, "Peru");
        assert_eq!(table[0].1, 1500.0);
        assert_eq!(table[1].0, "Kenya");
        assert_eq!(table[1].1, 200.0);
        assert!(table.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn top_countries_truncates_to_requested_size() {
        let records: Vec<LoanRecord> = (0..12)
            .map(|i| {
                record(
                    &format!("Country{i:02}"),
                    "female",
                    100.0 * (i + 1) as f64,
                    "2014-01-01",
                    12,
                    "Food",
                )
            })
            .collect();
        let ds = LoanDataset::from_records(records);

        let table = top_countries_by_mean_amount(&ds, 10);
        assert_eq!(table.len(), 10);
        assert_eq!(table[0].0, "Country11");
        assert_eq!(table[9].0, "Country02");
    }

    #[test]
    fn histogram_conserves_mass_and_bin_count() {
        let ds = fixture();
        let view = full_view(&ds);
        let bins = term_histogram(&ds, &view, 30);

        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), view.len());
        assert_eq!(bins.first().unwrap().lo, 6.0);
        assert_eq!(bins.last().unwrap().hi, 36.0);
    }

    #[test]
    fn histogram_of_identical_terms_is_one_bin() {
        let ds = LoanDataset::from_records(vec![
            record("Kenya", "female", 100.0, "2014-01-01", 12, "Food"),
            record("Kenya", "female", 200.0, "2014-02-01", 12, "Food"),
        ]);
        let bins = term_histogram(&ds, &full_view(&ds), 30);
        assert_eq!(
            bins,
            vec![TermBin {
                lo: 12.0,
                hi: 12.0,
                count: 2
            }]
        );
    }

    #[test]
    fn monthly_totals_group_by_year_in_calendar_order() {
        let ds = fixture();
        let series = monthly_loan_totals(&ds, &full_view(&ds));

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].year, 2014);
        assert_eq!(
            series[0].totals,
            vec![(1, 300.0), (3, 1000.0), (6, 200.0)]
        );
        assert_eq!(series[1].year, 2015);
        assert_eq!(series[1].totals, vec![(2, 300.0), (9, 2000.0)]);
    }

    #[test]
    fn gender_counts_keep_multi_borrower_values_whole() {
        let ds = LoanDataset::from_records(vec![
            record("Kenya", "female", 100.0, "2014-01-01", 12, "Food"),
            record("Kenya", "female, female", 200.0, "2014-02-01", 12, "Food"),
            record("Kenya", "female", 300.0, "2014-03-01", 12, "Food"),
        ]);
        let table = gender_counts(&ds, &full_view(&ds));
        assert_eq!(
            table,
            vec![
                ("female".to_string(), 2),
                ("female, female".to_string(), 1),
            ]
        );
    }

    #[test]
    fn describe_matches_hand_computed_quartiles() {
        let ds = LoanDataset::from_records(vec![
            record("Kenya", "female", 100.0, "2014-01-01", 6, "Food"),
            record("Kenya", "female", 200.0, "2014-02-01", 12, "Food"),
            record("Kenya", "female", 300.0, "2014-03-01", 18, "Food"),
            record("Kenya", "female", 400.0, "2014-04-01", 24, "Food"),
        ]);
        let table = describe(&ds, &full_view(&ds));

        let amounts = &table[0];
        assert_eq!(amounts.column, "loan_amount");
        assert_eq!(amounts.count, 4);
        assert_eq!(amounts.mean, 250.0);
        assert_eq!(amounts.min, 100.0);
        assert_eq!(amounts.q25, 175.0);
        assert_eq!(amounts.median, 250.0);
        assert_eq!(amounts.q75, 325.0);
        assert_eq!(amounts.max, 400.0);
        // Sample std of 100,200,300,400.
        assert!((amounts.std - 129.099_444_873_580_56).abs() < 1e-9);

        let years = &table[2];
        assert_eq!(years.column, "year");
        assert_eq!(years.median, 2014.0);
    }
}
