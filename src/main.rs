//! Road Accident Dashboard - interactive charts over road-accident statistics.

use accident_dashboard::config::Config;
use accident_dashboard::data::DataLoader;
use accident_dashboard::gui::DashboardApp;
use accident_dashboard::view::resolve;
use anyhow::Context;
use clap::Parser;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let config = Config::parse();

    let mut loader = DataLoader::new(&config.data_dir);
    let loaded = loader.load();

    if config.dump {
        let dataset = loaded
            .with_context(|| format!("Loading data from {}", loader.data_dir().display()))?;
        let filters = config.filter_state(&dataset.records);
        let filtered = filters.apply(&dataset.records);
        let view = resolve(config.section, &filtered, &dataset);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Err(e) = &loaded {
        log::error!("{e}");
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Road Accident Analysis Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Road Accident Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(loaded, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
