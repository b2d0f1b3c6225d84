mod app;
mod cli;
mod color;
mod data;
mod report;
mod state;
mod ui;

use anyhow::Context;
use app::SkiDashboardApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;
use report::Report;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let dataset = cli.load_dataset()?;
    log::info!("Loaded {} passes from {}", dataset.len(), dataset.source);
    if dataset.is_empty() {
        log::warn!("Dataset {} contains no passes", dataset.source);
    }

    if cli.headless() {
        let report = Report::build(&dataset, &cli.season_filter());
        if cli.json {
            println!("{}", report.to_json().context("serializing summary")?);
        } else {
            print!("{report}");
        }
        return Ok(());
    }

    let mut state = AppState::default();
    state.set_dataset(dataset);
    state.set_season(cli.season_filter());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ski Pass Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SkiDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
