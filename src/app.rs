use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SkiDashboardApp {
    pub state: AppState,
}

impl SkiDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SkiDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors + average price ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to view ski pass sales  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Ski Pass Dashboard");
                    ui.add_space(8.0);

                    ui.columns(2, |columns: &mut [Ui]| {
                        columns[0].strong(format!("{} Distribution", self.state.category.label()));
                        plot::distribution_chart(&mut columns[0], &self.state);

                        columns[1].strong("Average Price by Season and Pass Type");
                        plot::season_pass_type_chart(&mut columns[1], &self.state);
                    });

                    if self.state.show_table {
                        ui.separator();
                        ui.strong(format!("Passes ({})", self.state.season.label()));
                        table::record_table(ui, &self.state);
                    }
                });
        });
    }
}
