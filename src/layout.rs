//! Declarative description of the dashboard page.
//!
//! The tree is plain data: the UI walks it to draw widgets, and the
//! reactive layer reads it to seed the initial widget values.

use crate::config::DashboardConfig;
use crate::data::filter::ALL_SITES;
use crate::data::model::LaunchDataset;
use crate::reactive::{OutputId, WidgetId};

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Container(Vec<Widget>),
    Heading(String),
    Paragraph(String),
    Break,
    Dropdown {
        id: WidgetId,
        options: Vec<DropdownOption>,
        value: String,
        placeholder: String,
        searchable: bool,
    },
    RangeSlider {
        id: WidgetId,
        min: f64,
        max: f64,
        step: f64,
        value: (f64, f64),
    },
    Graph(OutputId),
}

impl Widget {
    /// Depth-first search for the first widget matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Widget) -> bool) -> Option<&Widget> {
        if pred(self) {
            return Some(self);
        }
        match self {
            Widget::Container(children) => children.iter().find_map(|c| c.find(pred)),
            _ => None,
        }
    }

    pub fn dropdown(&self, id: WidgetId) -> Option<&Widget> {
        self.find(&|w| matches!(w, Widget::Dropdown { id: wid, .. } if *wid == id))
    }

    pub fn range_slider(&self, id: WidgetId) -> Option<&Widget> {
        self.find(&|w| matches!(w, Widget::RangeSlider { id: wid, .. } if *wid == id))
    }
}

/// Build the page: heading, site dropdown, success pie, payload slider,
/// payload/outcome scatter.
pub fn build_layout(dataset: &LaunchDataset, config: &DashboardConfig) -> Widget {
    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(dataset.sites().iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }));

    Widget::Container(vec![
        Widget::Heading(config.title.clone()),
        Widget::Dropdown {
            id: WidgetId::SiteDropdown,
            options,
            value: ALL_SITES.to_string(),
            placeholder: "Select a launch site".to_string(),
            searchable: true,
        },
        Widget::Break,
        Widget::Graph(OutputId::SuccessPie),
        Widget::Break,
        Widget::Paragraph("Payload range (Kg):".to_string()),
        Widget::RangeSlider {
            id: WidgetId::PayloadSlider,
            min: config.slider.min,
            max: config.slider.max,
            step: config.slider.step,
            value: (dataset.payload_min(), dataset.payload_max()),
        },
        Widget::Graph(OutputId::PayloadScatter),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_dataset;

    #[test]
    fn test_dropdown_lists_all_then_sites() {
        let ds = sample_dataset();
        let layout = build_layout(&ds, &DashboardConfig::default());

        let Some(Widget::Dropdown { options, value, .. }) = layout.dropdown(WidgetId::SiteDropdown)
        else {
            panic!("dropdown missing");
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["ALL", "A", "B"]);
        assert_eq!(options[0].label, "All Sites");
        assert_eq!(value, "ALL");
    }

    #[test]
    fn test_slider_seeded_from_payload_extent() {
        let ds = sample_dataset();
        let layout = build_layout(&ds, &DashboardConfig::default());

        let Some(Widget::RangeSlider { min, max, step, value, .. }) =
            layout.range_slider(WidgetId::PayloadSlider)
        else {
            panic!("slider missing");
        };
        assert_eq!((*min, *max, *step), (0.0, 10_000.0, 1_000.0));
        assert_eq!(*value, (0.0, 6000.0));
    }

    #[test]
    fn test_both_graphs_present() {
        let layout = build_layout(&sample_dataset(), &DashboardConfig::default());
        for output in [OutputId::SuccessPie, OutputId::PayloadScatter] {
            assert!(layout.find(&|w| *w == Widget::Graph(output)).is_some());
        }
    }
}
