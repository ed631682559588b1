mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::LoanScopeApp;
use eframe::egui;

/// Fixed source-data location; the dashboard takes no CLI flags.
const DATA_PATH: &str = "kiva_loans_cleaned.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Load once, before the event loop. A missing or malformed file is fatal:
    // the process exits here and never opens a window.
    let dataset = data::loader::load_csv(Path::new(DATA_PATH))
        .with_context(|| format!("loading loan data from {DATA_PATH}"))?;
    log::info!(
        "Loaded {} loan records across {} countries ({}–{})",
        dataset.len(),
        dataset.countries.len(),
        dataset.years.first().copied().unwrap_or_default(),
        dataset.years.last().copied().unwrap_or_default(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LoanScope – Kiva Loan Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(LoanScopeApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("starting UI: {e}"))
}
