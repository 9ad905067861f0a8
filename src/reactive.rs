//! Input-change dispatch.
//!
//! Every chart is owned by exactly one [`Callback`], which names the widgets
//! it reads. When a widget value changes, [`Dashboard::dispatch`] reruns the
//! callbacks that list that widget and stores the new figures. Handlers are
//! plain functions of the dataset and the current widget values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::callbacks::{payload_scatter_chart, success_pie_chart};
use crate::chart::{EmptyChart, Figure};
use crate::config::DashboardConfig;
use crate::data::filter::{ALL_SITES, PayloadRange, filtered_indices};
use crate::data::model::LaunchDataset;
use crate::error::DashboardError;
use crate::layout::{Widget, build_layout};

// ---------------------------------------------------------------------------
// Identifiers and events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetId {
    SiteDropdown,
    PayloadSlider,
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetId::SiteDropdown => write!(f, "site-dropdown"),
            WidgetId::PayloadSlider => write!(f, "payload-slider"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    SuccessPie,
    PayloadScatter,
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputId::SuccessPie => write!(f, "success-pie-chart"),
            OutputId::PayloadScatter => write!(f, "success-payload-scatter-chart"),
        }
    }
}

/// A new value emitted by one input widget.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SiteChanged(String),
    PayloadChanged(f64, f64),
}

impl InputEvent {
    pub fn widget(&self) -> WidgetId {
        match self {
            InputEvent::SiteChanged(_) => WidgetId::SiteDropdown,
            InputEvent::PayloadChanged(..) => WidgetId::PayloadSlider,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget state
// ---------------------------------------------------------------------------

/// Current values of every input widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    pub site: String,
    pub payload: (f64, f64),
}

impl WidgetState {
    /// Dropdown on "ALL", slider spanning the dataset's payload extent.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        WidgetState {
            site: ALL_SITES.to_string(),
            payload: (dataset.payload_min(), dataset.payload_max()),
        }
    }

    /// Read the initial values declared in a layout tree.
    pub fn from_layout(layout: &Widget) -> Option<Self> {
        let site = match layout.dropdown(WidgetId::SiteDropdown)? {
            Widget::Dropdown { value, .. } => value.clone(),
            _ => return None,
        };
        let payload = match layout.range_slider(WidgetId::PayloadSlider)? {
            Widget::RangeSlider { value, .. } => *value,
            _ => return None,
        };
        Some(WidgetState { site, payload })
    }

    /// Apply an event; returns whether any value actually changed.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::SiteChanged(site) => {
                if self.site == *site {
                    return false;
                }
                self.site = site.clone();
            }
            InputEvent::PayloadChanged(low, high) => {
                if self.payload == (*low, *high) {
                    return false;
                }
                self.payload = (*low, *high);
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Callback registry
// ---------------------------------------------------------------------------

pub type Handler = fn(&LaunchDataset, &WidgetState) -> Figure;

pub struct Callback {
    pub output: OutputId,
    pub inputs: Vec<WidgetId>,
    pub handler: Handler,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's two charts.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(OutputId::SuccessPie, &[WidgetId::SiteDropdown], pie_handler);
        registry.register(
            OutputId::PayloadScatter,
            &[WidgetId::SiteDropdown, WidgetId::PayloadSlider],
            scatter_handler,
        );
        registry
    }

    /// Register the callback for `output`. An output has one owner, so a
    /// second registration replaces the first.
    pub fn register(&mut self, output: OutputId, inputs: &[WidgetId], handler: Handler) {
        if let Some(pos) = self.callbacks.iter().position(|c| c.output == output) {
            log::warn!("replacing callback for {output}");
            self.callbacks.remove(pos);
        }
        self.callbacks.push(Callback {
            output,
            inputs: inputs.to_vec(),
            handler,
        });
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// Callbacks that read `widget`, in registration order.
    pub fn triggered_by(&self, widget: WidgetId) -> impl Iterator<Item = &Callback> {
        self.callbacks
            .iter()
            .filter(move |c| c.inputs.contains(&widget))
    }
}

fn pie_handler(dataset: &LaunchDataset, state: &WidgetState) -> Figure {
    match success_pie_chart(dataset, &state.site) {
        Ok(chart) => Figure::Pie(chart),
        Err(err) => empty_figure("Success vs. Failed Counts", err),
    }
}

fn scatter_handler(dataset: &LaunchDataset, state: &WidgetState) -> Figure {
    match payload_scatter_chart(dataset, &state.site, state.payload) {
        Ok(chart) => Figure::Scatter(chart),
        Err(err) => empty_figure("Correlation between Payload and Success", err),
    }
}

fn empty_figure(title: &str, err: DashboardError) -> Figure {
    log::warn!("{title}: {err}");
    Figure::Empty(EmptyChart {
        title: title.to_string(),
        message: err.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// A loaded dataset together with its page, widget values and figures.
///
/// Loading a different file means building a new `Dashboard`; the dataset
/// inside one is never modified.
#[derive(Debug)]
pub struct Dashboard {
    dataset: Arc<LaunchDataset>,
    layout: Widget,
    state: WidgetState,
    registry: CallbackRegistry,
    figures: BTreeMap<OutputId, Figure>,
}

impl Dashboard {
    pub fn new(
        dataset: Arc<LaunchDataset>,
        config: &DashboardConfig,
    ) -> Result<Self, DashboardError> {
        config.slider.validate()?;
        let layout = build_layout(&dataset, config);
        let state =
            WidgetState::from_layout(&layout).unwrap_or_else(|| WidgetState::initial(&dataset));

        let mut dashboard = Dashboard {
            dataset,
            layout,
            state,
            registry: CallbackRegistry::standard(),
            figures: BTreeMap::new(),
        };
        dashboard.recompute_all();
        Ok(dashboard)
    }

    fn recompute_all(&mut self) {
        for cb in self.registry.callbacks() {
            let figure = (cb.handler)(&self.dataset, &self.state);
            self.figures.insert(cb.output, figure);
        }
    }

    /// Apply an input change and rerun the callbacks that depend on it.
    /// Returns the outputs that were recomputed; empty when the event did
    /// not change any value.
    pub fn dispatch(&mut self, event: InputEvent) -> Vec<OutputId> {
        if !self.state.apply(&event) {
            return Vec::new();
        }
        let widget = event.widget();
        log::debug!("{widget} changed: {event:?}");

        let mut updated = Vec::new();
        for cb in self.registry.triggered_by(widget) {
            let figure = (cb.handler)(&self.dataset, &self.state);
            if log::log_enabled!(log::Level::Trace) {
                if let Ok(json) = figure.to_json() {
                    log::trace!("{}: {json}", cb.output);
                }
            }
            self.figures.insert(cb.output, figure);
            updated.push(cb.output);
        }
        updated
    }

    pub fn figure(&self, output: OutputId) -> Option<&Figure> {
        self.figures.get(&output)
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn layout(&self) -> &Widget {
        &self.layout
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Rows shown in the scatter chart for the current widget values.
    pub fn visible_indices(&self) -> Vec<usize> {
        let Ok(selection) = self.dataset.resolve_site(&self.state.site) else {
            return Vec::new();
        };
        let Ok(range) = PayloadRange::new(self.state.payload.0, self.state.payload.1) else {
            return Vec::new();
        };
        filtered_indices(&self.dataset, &selection, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_dataset;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(sample_dataset()), &DashboardConfig::default()).unwrap()
    }

    fn pie(d: &Dashboard) -> &crate::chart::PieChart {
        match d.figure(OutputId::SuccessPie) {
            Some(Figure::Pie(p)) => p,
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_figures() {
        let d = dashboard();
        assert_eq!(d.state().site, "ALL");
        assert_eq!(d.state().payload, (0.0, 6000.0));
        assert_eq!(pie(&d).total(), 5);
        match d.figure(OutputId::PayloadScatter) {
            Some(Figure::Scatter(s)) => assert_eq!(s.point_count(), 5),
            other => panic!("expected scatter, got {other:?}"),
        }
        assert_eq!(d.visible_indices().len(), 5);
    }

    #[test]
    fn test_site_change_updates_both_charts() {
        let mut d = dashboard();
        let updated = d.dispatch(InputEvent::SiteChanged("A".to_string()));
        assert_eq!(updated, vec![OutputId::SuccessPie, OutputId::PayloadScatter]);
        assert_eq!(pie(&d).value_of("Success"), 2);
        assert_eq!(d.visible_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_payload_change_updates_scatter_only() {
        let mut d = dashboard();
        let pie_before = pie(&d).clone();
        let updated = d.dispatch(InputEvent::PayloadChanged(0.0, 5000.0));
        assert_eq!(updated, vec![OutputId::PayloadScatter]);
        assert_eq!(*pie(&d), pie_before);
        assert!(!d.visible_indices().contains(&2));
    }

    #[test]
    fn test_unchanged_value_is_noop() {
        let mut d = dashboard();
        assert!(d.dispatch(InputEvent::SiteChanged("ALL".to_string())).is_empty());
        assert!(d.dispatch(InputEvent::PayloadChanged(0.0, 6000.0)).is_empty());
    }

    #[test]
    fn test_unknown_site_yields_empty_state() {
        let mut d = dashboard();
        d.dispatch(InputEvent::SiteChanged("Boca Chica".to_string()));
        for output in [OutputId::SuccessPie, OutputId::PayloadScatter] {
            match d.figure(output) {
                Some(Figure::Empty(e)) => assert!(e.message.contains("Boca Chica")),
                other => panic!("expected empty state, got {other:?}"),
            }
        }
        assert!(d.visible_indices().is_empty());

        d.dispatch(InputEvent::SiteChanged("B".to_string()));
        assert_eq!(pie(&d).value_of("Success"), 2);
    }

    #[test]
    fn test_registry_replaces_duplicate_output() {
        let mut registry = CallbackRegistry::standard();
        registry.register(OutputId::SuccessPie, &[WidgetId::PayloadSlider], pie_handler);
        assert_eq!(registry.callbacks().len(), 2);
        let triggered: Vec<OutputId> = registry
            .triggered_by(WidgetId::PayloadSlider)
            .map(|c| c.output)
            .collect();
        assert_eq!(triggered, vec![OutputId::PayloadScatter, OutputId::SuccessPie]);
    }

    #[test]
    fn test_invalid_slider_config_rejected() {
        let mut config = DashboardConfig::default();
        config.slider.step = -1.0;
        assert!(Dashboard::new(Arc::new(sample_dataset()), &config).is_err());
    }
}
