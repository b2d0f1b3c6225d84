use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SeasonFilter;
use crate::data::loader;
use crate::data::model::{CategoryField, SkiPassDataset};
use crate::report::format_price;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors and headline figure
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Season selector ----
    ui.strong("Season");
    let mut season = state.season.clone();
    egui::ComboBox::from_id_salt("season_filter")
        .selected_text(season.label())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in SeasonFilter::choices() {
                let label = choice.label().to_string();
                ui.selectable_value(&mut season, choice, label);
            }
        });
    state.set_season(season);
    ui.add_space(8.0);

    // ---- Distribution field ----
    ui.strong("Distribution by");
    let mut category = state.category;
    egui::ComboBox::from_id_salt("distribution_by")
        .selected_text(category.label())
        .show_ui(ui, |ui: &mut Ui| {
            for field in CategoryField::ALL {
                ui.selectable_value(&mut category, field, field.label());
            }
        });
    state.set_category(category);
    ui.separator();

    average_price_card(ui, state);
}

/// Headline average price for the current season selection.
fn average_price_card(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        return;
    };
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label("Average Price");
        ui.label(RichText::new(format_price(summary.average_price)).size(32.0).strong());
        ui.label(format!("{} passes", summary.record_count));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload bundled data").clicked() {
                apply_load(state, loader::load_bundled());
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.summary.as_ref().map_or(0, |s| s.record_count);
            ui.label(format!("{} passes loaded, {} visible", ds.len(), visible));
        }

        ui.separator();

        if ui.selectable_label(state.show_table, "Records").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open ski pass data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        apply_load(state, loader::load_file(&path));
    }
}

fn apply_load(state: &mut AppState, result: anyhow::Result<SkiPassDataset>) {
    match result {
        Ok(dataset) => {
            log::info!("Loaded {} passes from {}", dataset.len(), dataset.source);
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
