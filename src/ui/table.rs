use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{self, ColumnSummary};
use crate::data::model::LoanDataset;

// ---------------------------------------------------------------------------
// Dataset summary block
// ---------------------------------------------------------------------------

/// Render the summary scalars (mean/median/mode of the loan amount) and the
/// descriptive-statistics grid for the current view.
pub fn summary_block(ui: &mut Ui, dataset: &LoanDataset, view: &[usize]) {
    let amounts = aggregate::view_amounts(dataset, view);

    ui.label(scalar_line("Mean Loan Amount", aggregate::mean(&amounts), 2));
    ui.label(scalar_line("Median Loan Amount", aggregate::median(&amounts), 2));
    ui.label(scalar_line("Mode Loan Amount", aggregate::mode(&amounts), 0));
    ui.add_space(6.0);

    let table = aggregate::describe(dataset, view);
    if table.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }
    describe_grid(ui, &table);
}

fn scalar_line(label: &str, value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{label}: {v:.decimals$}"),
        None => format!("{label}: n/a"),
    }
}

fn describe_grid(ui: &mut Ui, table: &[ColumnSummary]) {
    egui::Grid::new("describe_grid")
        .striped(true)
        .min_col_width(90.0)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for col in table {
                ui.label(RichText::new(col.column).strong());
            }
            ui.end_row();

            let stat_rows: [(&str, fn(&ColumnSummary) -> String); 8] = [
                ("count", |c| c.count.to_string()),
                ("mean", |c| format!("{:.2}", c.mean)),
                ("std", |c| format!("{:.2}", c.std)),
                ("min", |c| format!("{:.2}", c.min)),
                ("25%", |c| format!("{:.2}", c.q25)),
                ("50%", |c| format!("{:.2}", c.median)),
                ("75%", |c| format!("{:.2}", c.q75)),
                ("max", |c| format!("{:.2}", c.max)),
            ];

            for (name, cell) in stat_rows {
                ui.label(RichText::new(name).strong());
                for col in table {
                    ui.label(cell(col));
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Filtered-rows table
// ---------------------------------------------------------------------------

/// Scrollable table of every loan in the current view, in dataset order.
pub fn filtered_table(ui: &mut Ui, dataset: &LoanDataset, view: &[usize]) {
    if view.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Date", "Country", "Sector", "Borrower Genders", "Amount", "Term"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|body| {
            body.rows(row_height, view.len(), |mut row| {
                let rec = &dataset.records[view[row.index()]];
                row.col(|ui| {
                    ui.label(rec.date.to_string());
                });
                row.col(|ui| {
                    ui.label(&rec.country);
                });
                row.col(|ui| {
                    ui.label(&rec.sector);
                });
                row.col(|ui| {
                    ui.label(&rec.borrower_genders);
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.loan_amount));
                });
                row.col(|ui| {
                    ui.label(format!("{} months", rec.term_in_months));
                });
            });
        });
}
