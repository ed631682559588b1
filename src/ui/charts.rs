use eframe::egui::{Align2, FontId, Mesh, Sense, Shape, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::data::aggregate::{MonthlySeries, TermBin};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Sector and top-country bar charts
// ---------------------------------------------------------------------------

/// Horizontal bar chart of row counts per sector.
pub fn sector_bar_chart(ui: &mut Ui, counts: &[(String, usize)]) {
    let rows: Vec<(String, f64)> = counts
        .iter()
        .map(|(name, count)| (name.clone(), *count as f64))
        .collect();
    horizontal_bar_chart(ui, "sector_chart", &rows, "Count");
}

/// Horizontal bar chart of the top countries by mean loan amount. Fed from
/// the full dataset, so it never changes with the filters.
pub fn top_countries_chart(ui: &mut Ui, means: &[(String, f64)]) {
    horizontal_bar_chart(ui, "top_countries_chart", means, "Average Loan Amount");
}

/// Shared horizontal bar panel: one colored bar per category, largest on
/// top, category names on the y axis.
fn horizontal_bar_chart(ui: &mut Ui, id: &str, rows: &[(String, f64)], x_label: &str) {
    if rows.is_empty() {
        ui.label("No data for the current selection.");
        return;
    }

    let colors = CategoryColors::new(rows.iter().map(|(name, _)| name.clone()));
    let n = rows.len();

    // Rows arrive sorted descending; place the first at the highest y.
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            Bar::new((n - 1 - i) as f64, *value)
                .name(name)
                .width(0.6)
                .fill(colors.color_for(name))
        })
        .collect();

    let mut labels = vec![String::new(); n];
    for (i, (name, _)) in rows.iter().enumerate() {
        labels[n - 1 - i] = name.clone();
    }

    Plot::new(id)
        .height(300.0)
        .include_x(0.0)
        .x_axis_label(x_label)
        .y_axis_formatter(move |mark: GridMark, _range: &_| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Loan term histogram
// ---------------------------------------------------------------------------

/// Frequency histogram of the loan term buckets.
pub fn term_histogram_chart(ui: &mut Ui, bins: &[TermBin]) {
    if bins.is_empty() {
        ui.label("No data for the current selection.");
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            let width = if bin.hi > bin.lo { bin.hi - bin.lo } else { 1.0 };
            Bar::new((bin.lo + bin.hi) / 2.0, bin.count as f64).width(width)
        })
        .collect();

    Plot::new("term_histogram")
        .height(300.0)
        .include_y(0.0)
        .x_axis_label("Term in Months")
        .y_axis_label("Frequency")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Monthly loan amounts over time
// ---------------------------------------------------------------------------

/// Line chart of summed loan amounts per calendar month, one colored series
/// per year, with point markers on the data points.
pub fn monthly_loans_chart(ui: &mut Ui, series: &[MonthlySeries]) {
    if series.is_empty() {
        ui.label("No data for the current selection.");
        return;
    }

    let colors = CategoryColors::new(series.iter().map(|s| s.year.to_string()));

    Plot::new("monthly_loans")
        .height(320.0)
        .include_y(0.0)
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Total Loan Amount")
        .x_axis_formatter(|mark: GridMark, _range: &_| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 {
                return String::new();
            }
            match rounded as i64 {
                m @ 1..=12 => MONTH_NAMES[m as usize - 1].to_string(),
                _ => String::new(),
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for s in series {
                let year = s.year.to_string();
                let color = colors.color_for(&year);
                let points: Vec<[f64; 2]> = s
                    .totals
                    .iter()
                    .map(|&(month, total)| [month as f64, total])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(&year)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Gender distribution donut
// ---------------------------------------------------------------------------

/// Donut chart of row counts per `borrower_genders` value, with count labels
/// outside the ring and a swatch legend underneath.
pub fn gender_donut_chart(ui: &mut Ui, counts: &[(String, usize)]) {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        ui.label("No data for the current selection.");
        return;
    }

    let colors = CategoryColors::new(counts.iter().map(|(name, _)| name.clone()));

    let (rect, _) = ui.allocate_exact_size(Vec2::new(340.0, 340.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let (r_inner, r_outer, r_label) = (80.0_f32, 120.0_f32, 150.0_f32);

    // Slices start at 12 o'clock and run clockwise.
    let mut start = -std::f32::consts::FRAC_PI_2;
    for (name, count) in counts {
        let frac = *count as f32 / total as f32;
        let end = start + frac * std::f32::consts::TAU;
        let color = colors.color_for(name);

        // Ring segment as a triangle strip between the two radii.
        let steps = ((frac * 64.0).ceil() as usize).max(2);
        let mut mesh = Mesh::default();
        for i in 0..=steps {
            let angle = start + (end - start) * i as f32 / steps as f32;
            let dir = Vec2::angled(angle);
            mesh.colored_vertex(center + dir * r_inner, color);
            mesh.colored_vertex(center + dir * r_outer, color);
        }
        for i in 0..steps {
            let base = (2 * i) as u32;
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 3, base + 2);
        }
        painter.add(Shape::mesh(mesh));

        // Count label past the outer edge, centered on the slice.
        let mid = Vec2::angled((start + end) / 2.0);
        painter.text(
            center + mid * r_label,
            Align2::CENTER_CENTER,
            count.to_string(),
            FontId::proportional(15.0),
            ui.visuals().text_color(),
        );

        start = end;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (name, count) in counts {
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter()
                .circle_filled(swatch.center(), 5.0, colors.color_for(name));
            ui.label(format!("{name} ({count})"));
        }
    });
}
