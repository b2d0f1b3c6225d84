use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::filter_by_season;
use crate::state::AppState;

const HEADERS: [&str; 7] = ["ID", "Season", "Price", "Age", "Level", "Accounted", "Pass type"];

/// Table of the records passing the current season filter.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let rows = filter_by_season(&dataset.records, &state.season);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .max_scroll_height(260.0)
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let record = rows[row.index()];
                row.col(|ui| {
                    ui.label(record.id.to_string());
                });
                row.col(|ui| {
                    ui.label(record.season.label());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", record.price));
                });
                row.col(|ui| {
                    ui.label(record.age.to_string());
                });
                row.col(|ui| {
                    ui.label(record.level.as_str());
                });
                row.col(|ui| {
                    ui.label(if record.accounted { "yes" } else { "no" });
                });
                row.col(|ui| {
                    ui.label(record.pass_type.label());
                });
            });
        });
}
