mod app;
mod config;
mod data;
mod filter;
mod state;
mod ui;

use app::OligoViewerApp;
use config::FilterConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = FilterConfig::discover();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Oligo Viewer – Result Grid",
        options,
        Box::new(move |_cc| Ok(Box::new(OligoViewerApp::new(&config)))),
    )
}
