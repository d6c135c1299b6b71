use eframe::egui;

use crate::config::FilterConfig;
use crate::state::AppState;
use crate::ui::{grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OligoViewerApp {
    pub state: AppState,
}

impl OligoViewerApp {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for OligoViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: result grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            grid::result_grid(ui, &self.state);
        });
    }
}
