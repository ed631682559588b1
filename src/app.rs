use eframe::egui;

use crate::data::aggregate;
use crate::data::model::LoanDataset;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LoanScopeApp {
    pub state: AppState,
}

impl LoanScopeApp {
    pub fn new(dataset: LoanDataset) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for LoanScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + row counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts, summary, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            // Deliberate short-circuit: without a country there is nothing
            // to render this cycle.
            if self.state.selection.country.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Please select a country from the sidebar");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    central_column(ui, &self.state);
                });
        });
    }
}

/// The fixed top-to-bottom report: caption, five chart panels, summary
/// block, and the filtered-rows table. Every aggregate is recomputed from
/// the current view on each pass and discarded afterwards.
fn central_column(ui: &mut egui::Ui, state: &AppState) {
    let dataset = &state.dataset;
    let view = &state.visible_indices;

    ui.label(egui::RichText::new(state.selection.caption()).weak());

    section(ui, "Distribution of Loan Sector", |ui| {
        charts::sector_bar_chart(ui, &aggregate::sector_counts(dataset, view));
    });

    section(ui, "Distribution of Loan Term (in Months)", |ui| {
        charts::term_histogram_chart(ui, &aggregate::term_histogram(dataset, view, 30));
    });

    section(ui, "Monthly Loan Amounts Over Time", |ui| {
        charts::monthly_loans_chart(ui, &aggregate::monthly_loan_totals(dataset, view));
    });

    section(ui, "Top 10 Countries with Highest Average Loan Amount", |ui| {
        // Always over the full dataset, never the filtered view.
        charts::top_countries_chart(ui, &aggregate::top_countries_by_mean_amount(dataset, 10));
    });

    section(ui, "Distribution of Borrower Genders", |ui| {
        charts::gender_donut_chart(ui, &aggregate::gender_counts(dataset, view));
    });

    section(ui, "Dataset Summary", |ui| {
        table::summary_block(ui, dataset, view);
    });

    section(ui, "Filtered Data", |ui| {
        table::filtered_table(ui, dataset, view);
    });
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.add_space(12.0);
    ui.heading(title);
    ui.add_space(4.0);
    add_contents(ui);
}
