use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the sidebar. Widget changes go through the `AppState` mutators,
/// which rewrite the `Selection` and recompute the filtered view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            country_filter(ui, state);
            ui.separator();
            gender_filter(ui, state);
            ui.separator();
            amount_filter(ui, state);
            ui.separator();
            year_filter(ui, state);
        });
}

/// Single-choice country selector. Starts unselected; the central panel
/// shows a prompt until a country is picked.
fn country_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Country");

    let countries = state.dataset.countries.clone();
    let current = state.selection.country.clone();

    egui::ComboBox::from_id_salt("country_filter")
        .selected_text(current.clone().unwrap_or_else(|| "Select a country".to_string()))
        .show_ui(ui, |ui: &mut Ui| {
            for country in &countries {
                if ui
                    .selectable_label(current.as_deref() == Some(country.as_str()), country.as_str())
                    .clicked()
                {
                    state.set_country(country.clone());
                }
            }
        });
}

/// Gender multi-select: checkbox per distinct value, defaulting to all.
fn gender_filter(ui: &mut Ui, state: &mut AppState) {
    let genders = state.dataset.genders.clone();
    let header = format!("Gender  ({}/{})", state.selection.genders.len(), genders.len());

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("gender_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_genders();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_genders();
                }
            });

            for gender in &genders {
                let mut checked = state.selection.genders.contains(gender);
                if ui.checkbox(&mut checked, gender.as_str()).changed() {
                    state.toggle_gender(gender);
                }
            }
        });
}

/// Loan amount range as a min/max slider pair over the dataset bounds.
fn amount_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Loan amount");

    let (min, max) = state.dataset.amount_bounds;
    let (mut lo, mut hi) = state.selection.amount_range;

    let lo_changed = ui.add(Slider::new(&mut lo, min..=max).text("min")).changed();
    let hi_changed = ui.add(Slider::new(&mut hi, min..=max).text("max")).changed();
    if lo_changed || hi_changed {
        state.set_amount_range(lo, hi);
    }
}

/// Year multi-select, same idiom as the gender filter.
fn year_filter(ui: &mut Ui, state: &mut AppState) {
    let years = state.dataset.years.clone();
    let header = format!("Year  ({}/{})", state.selection.years.len(), years.len());

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("year_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_years();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_years();
                }
            });

            for &year in &years {
                let mut checked = state.selection.years.contains(&year);
                if ui.checkbox(&mut checked, year.to_string()).changed() {
                    state.toggle_year(year);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: page title plus loaded/matching row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("EDA on Kiva loans");
        ui.separator();
        ui.label(format!(
            "{} loans loaded, {} matching",
            state.dataset.len(),
            state.visible_indices.len()
        ));
    });
}
