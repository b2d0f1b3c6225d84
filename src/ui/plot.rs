use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::pass_type_color;
use crate::data::model::PassType;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bar charts (central panel)
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 300.0;

/// Axis label for a categorical bar chart: only integer positions get text.
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Show `charts` on a plot whose x axis is labelled with `labels`.
fn show_categorical(
    ui: &mut Ui,
    id: &str,
    labels: Vec<String>,
    y_label: &str,
    charts: Vec<BarChart>,
) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_label(y_label)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Count of passes per value of the selected category, for the selected season.
pub fn distribution_chart(ui: &mut Ui, state: &AppState) {
    if state.category_counts.is_empty() {
        ui.label("No passes sold in this season.");
        return;
    }

    let labels: Vec<String> = state.category_counts.keys().cloned().collect();
    let bars: Vec<Bar> = state
        .category_counts
        .iter()
        .enumerate()
        .map(|(i, (value, &count))| {
            let color = state
                .color_map
                .as_ref()
                .map(|cm| cm.color_for(value))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, count as f64)
                .name(value)
                .fill(color)
                .width(0.6)
        })
        .collect();

    let chart = BarChart::new(bars).name(state.category.label());
    show_categorical(ui, "distribution_plot", labels, "Passes", vec![chart]);
}

/// Average price per season, one bar per pass type, over the full dataset.
pub fn season_pass_type_chart(ui: &mut Ui, state: &AppState) {
    if state.season_averages.is_empty() {
        return;
    }

    let labels: Vec<String> = state
        .season_averages
        .iter()
        .map(|row| row.season.label().to_string())
        .collect();

    let bar_width = 0.25;
    let charts: Vec<BarChart> = PassType::KNOWN
        .iter()
        .enumerate()
        .map(|(k, pass_type)| {
            let offset = (k as f64 - 1.0) * bar_width;
            let bars: Vec<Bar> = state
                .season_averages
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let avg = row.average_for(pass_type).unwrap_or(0.0);
                    Bar::new(i as f64 + offset, avg)
                        .name(format!("{} / {}", row.season.label(), pass_type.label()))
                        .width(bar_width)
                })
                .collect();
            BarChart::new(bars)
                .name(pass_type.label())
                .color(pass_type_color(pass_type))
        })
        .collect();

    show_categorical(ui, "season_pass_type_plot", labels, "Average price ($)", charts);
}
