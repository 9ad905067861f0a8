use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Launches currently inside the scatter chart's site and payload filters.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Launches");
    ui.separator();

    let Some(dashboard) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    let records = dashboard.dataset().records();
    let visible = dashboard.visible_indices();
    ui.label(format!("{} of {} launches", visible.len(), records.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("Payload (kg)");
            });
            header.col(|ui| {
                ui.strong("Outcome");
            });
            header.col(|ui| {
                ui.strong("Booster");
            });
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let rec = &records[visible[row.index()]];
                row.col(|ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(rec.outcome.to_string());
                });
                row.col(|ui| {
                    ui.label(&rec.booster_version_category);
                });
            });
        });
}
