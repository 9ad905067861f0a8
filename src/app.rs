use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpaceXDashApp {
    pub state: AppState,
}

impl SpaceXDashApp {
    pub fn new(config: DashboardConfig, dataset: LaunchDataset) -> Self {
        let mut state = AppState::new(config);
        state.set_dataset(dataset);
        Self { state }
    }
}

impl eframe::App for SpaceXDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: launches in the scatter filter ----
        egui::SidePanel::right("launch_table")
            .default_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::launch_table(ui, &self.state);
            });

        // ---- Central panel: the dashboard page ----
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| panels::dashboard_page(ui, &mut self.state))
                    .inner
            })
            .inner;

        self.state.dispatch_all(events);
    }
}
