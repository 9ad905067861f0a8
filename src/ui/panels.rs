use eframe::egui::{self, Color32, RichText, Ui};

use crate::layout::{DropdownOption, Widget};
use crate::reactive::{Dashboard, InputEvent, WidgetState};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central page – walks the layout tree
// ---------------------------------------------------------------------------

/// Render the dashboard page and return the input changes made this frame.
pub fn dashboard_page(ui: &mut Ui, state: &mut AppState) -> Vec<InputEvent> {
    let AppState {
        dashboard,
        site_search,
        ..
    } = state;

    let Some(dashboard) = dashboard.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch file to begin  (File → Open…)");
        });
        return Vec::new();
    };

    let mut events = Vec::new();
    render_widget(ui, dashboard.layout(), dashboard, site_search, &mut events);
    events
}

fn render_widget(
    ui: &mut Ui,
    widget: &Widget,
    dashboard: &Dashboard,
    site_search: &mut String,
    events: &mut Vec<InputEvent>,
) {
    match widget {
        Widget::Container(children) => {
            for child in children {
                render_widget(ui, child, dashboard, site_search, events);
            }
        }
        Widget::Heading(text) => {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(text)
                        .size(32.0)
                        .strong()
                        .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
        }
        Widget::Paragraph(text) => {
            ui.label(text);
        }
        Widget::Break => ui.add_space(12.0),
        Widget::Dropdown {
            id,
            options,
            placeholder,
            searchable,
            ..
        } => {
            let current = &dashboard.state().site;
            if let Some(value) = site_dropdown(
                ui,
                &id.to_string(),
                options,
                current,
                placeholder,
                *searchable,
                site_search,
            ) {
                events.push(InputEvent::SiteChanged(value));
            }
        }
        Widget::RangeSlider {
            min, max, step, ..
        } => {
            if let Some((low, high)) = range_slider(ui, dashboard.state(), *min, *max, *step) {
                events.push(InputEvent::PayloadChanged(low, high));
            }
        }
        Widget::Graph(output) => match dashboard.figure(*output) {
            Some(figure) => plot::figure(ui, &output.to_string(), figure),
            None => {
                ui.label(format!("{output}: no figure"));
            }
        },
    }
}

/// Combo box over the site options, with an optional filter box inside the
/// popup. Returns the newly picked value.
fn site_dropdown(
    ui: &mut Ui,
    id: &str,
    options: &[DropdownOption],
    current: &str,
    placeholder: &str,
    searchable: bool,
    search: &mut String,
) -> Option<String> {
    let selected_text = options
        .iter()
        .find(|o| o.value == current)
        .map_or(placeholder, |o| o.label.as_str());

    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width().min(480.0))
        .show_ui(ui, |ui: &mut Ui| {
            if searchable {
                ui.add(egui::TextEdit::singleline(&mut *search).hint_text(placeholder));
                ui.separator();
            }
            let needle = search.to_lowercase();
            for opt in options
                .iter()
                .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
            {
                if ui.selectable_label(opt.value == current, &opt.label).clicked() {
                    picked = Some(opt.value.clone());
                }
            }
        });
    picked
}

/// Which handle of the payload range control the user moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handle {
    Low,
    High,
}

/// Keep `low <= high` after one handle moved: the moved handle wins and
/// pushes the other one along.
fn order_handles(low: f64, high: f64, moved: Handle) -> (f64, f64) {
    if low <= high {
        return (low, high);
    }
    match moved {
        Handle::Low => (low, low),
        Handle::High => (high, high),
    }
}

/// Two linked sliders acting as one dual-handle control. Returns the new
/// pair only when the user moved a handle.
///
/// Clamping is off so that handle positions seeded from the data (which
/// need not sit on a step or inside the control's bounds) are never
/// rewritten by merely drawing the slider.
fn range_slider(
    ui: &mut Ui,
    widgets: &WidgetState,
    min: f64,
    max: f64,
    step: f64,
) -> Option<(f64, f64)> {
    let (mut low, mut high) = widgets.payload;
    let mut moved = None;

    ui.horizontal(|ui: &mut Ui| {
        let low_resp = ui.add(
            egui::Slider::new(&mut low, min..=max)
                .step_by(step)
                .clamping(egui::SliderClamping::Never)
                .text("min"),
        );
        if low_resp.changed() {
            moved = Some(Handle::Low);
        }
        let high_resp = ui.add(
            egui::Slider::new(&mut high, min..=max)
                .step_by(step)
                .clamping(egui::SliderClamping::Never)
                .text("max"),
        );
        if high_resp.changed() {
            moved = Some(Handle::High);
        }
    });

    let pair = order_handles(low, high, moved?);
    (pair != widgets.payload).then_some(pair)
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
        });

        ui.separator();

        if let Some(dashboard) = &state.dashboard {
            ui.label(format!(
                "{} launches from {}, {} in range",
                dashboard.dataset().len(),
                state.config.data_path.display(),
                dashboard.visible_indices().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::model::{LaunchDataset, record};

    /// Run one frame with no input events and return what `f` produced.
    fn idle_frame<T>(mut f: impl FnMut(&mut Ui) -> T) -> T {
        let ctx = egui::Context::default();
        let mut out = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                out = Some(f(ui));
            });
        });
        out.expect("frame ran")
    }

    fn off_step_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 600.0, true, "FT"),
            record("A", 9600.0, false, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn test_idle_slider_emits_nothing() {
        let widgets = WidgetState::initial(&off_step_dataset());
        let emitted = idle_frame(|ui| range_slider(ui, &widgets, 0.0, 10_000.0, 1_000.0));
        assert_eq!(emitted, None);
        assert_eq!(widgets.payload, (600.0, 9600.0));
    }

    #[test]
    fn test_idle_slider_keeps_values_outside_bounds() {
        let widgets = WidgetState {
            site: "ALL".to_string(),
            payload: (250.0, 15_600.0),
        };
        let emitted = idle_frame(|ui| range_slider(ui, &widgets, 0.0, 10_000.0, 1_000.0));
        assert_eq!(emitted, None);
    }

    #[test]
    fn test_idle_page_emits_nothing() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(off_step_dataset());
        let events = idle_frame(|ui| dashboard_page(ui, &mut state));
        assert!(events.is_empty());
        assert_eq!(state.dashboard.unwrap().visible_indices(), vec![0, 1]);
    }

    #[test]
    fn test_low_dragged_past_high_pushes_high() {
        assert_eq!(order_handles(7000.0, 5000.0, Handle::Low), (7000.0, 7000.0));
    }

    #[test]
    fn test_high_dragged_below_low_pushes_low() {
        // `low` is an unsnapped data value; the user's `high` must survive.
        assert_eq!(order_handles(600.0, 0.0, Handle::High), (0.0, 0.0));
        assert_eq!(order_handles(2500.0, 2000.0, Handle::High), (2000.0, 2000.0));
    }

    #[test]
    fn test_ordered_handles_untouched() {
        assert_eq!(order_handles(600.0, 9600.0, Handle::Low), (600.0, 9600.0));
        assert_eq!(order_handles(3000.0, 3000.0, Handle::High), (3000.0, 3000.0));
    }
}
