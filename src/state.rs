use std::path::Path;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::model::LaunchDataset;
use crate::reactive::{Dashboard, InputEvent};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Dataset, widget values and current figures. Replaced wholesale when
    /// another file is opened.
    pub dashboard: Option<Dashboard>,

    /// Text typed into the searchable site dropdown.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dashboard: None,
            site_search: String::new(),
            status_message: None,
        }
    }

    /// Build a fresh dashboard around a newly loaded dataset.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        match Dashboard::new(Arc::new(dataset), &self.config) {
            Ok(dashboard) => {
                self.dashboard = Some(dashboard);
                self.site_search.clear();
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build dashboard: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Load a file and, on success, swap in a new dashboard. A failed load
    /// leaves the current dashboard untouched.
    pub fn open_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                self.config.data_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Forward widget changes collected during a frame.
    pub fn dispatch_all(&mut self, events: Vec<InputEvent>) {
        let Some(dashboard) = &mut self.dashboard else {
            return;
        };
        for event in events {
            let updated = dashboard.dispatch(event);
            if !updated.is_empty() {
                log::debug!("recomputed {updated:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Figure;
    use crate::data::model::sample_dataset;
    use crate::reactive::OutputId;

    #[test]
    fn test_failed_open_keeps_dashboard() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(sample_dataset());
        state.open_path(Path::new("/nonexistent/launches.csv"));

        assert!(state.dashboard.is_some());
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }

    #[test]
    fn test_dispatch_all_applies_in_order() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(sample_dataset());
        state.dispatch_all(vec![
            InputEvent::SiteChanged("A".to_string()),
            InputEvent::SiteChanged("B".to_string()),
        ]);

        let dashboard = state.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.state().site, "B");
        match dashboard.figure(OutputId::SuccessPie) {
            Some(Figure::Pie(p)) => assert_eq!(p.total(), 2),
            other => panic!("expected pie, got {other:?}"),
        }
    }
}
