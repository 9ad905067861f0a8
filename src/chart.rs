//! Renderer-independent chart descriptions.
//!
//! Handlers produce these; the UI layer draws them. They serialise to JSON
//! so a figure can be inspected or exported without a window.

use serde::Serialize;

use crate::color::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

/// Proportional chart: each slice is a category's share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Value of the slice with the given label, zero if absent.
    #[cfg(test)]
    pub fn value_of(&self, label: &str) -> usize {
        self.slices
            .iter()
            .find(|s| s.label == label)
            .map_or(0, |s| s.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Rgb,
    /// `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Shown in place of a chart when the inputs were rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyChart {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Pie(PieChart),
    Scatter(ScatterChart),
    Empty(EmptyChart),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(c) => &c.title,
            Figure::Scatter(c) => &c.title,
            Figure::Empty(c) => &c.title,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_totals() {
        let pie = PieChart {
            title: "t".to_string(),
            slices: vec![
                PieSlice {
                    label: "Success".to_string(),
                    value: 2,
                    color: [0, 0, 0],
                },
                PieSlice {
                    label: "Failure".to_string(),
                    value: 1,
                    color: [0, 0, 0],
                },
            ],
        };
        assert_eq!(pie.total(), 3);
        assert_eq!(pie.value_of("Failure"), 1);
        assert_eq!(pie.value_of("Other"), 0);
    }

    #[test]
    fn test_figure_json_is_tagged() {
        let fig = Figure::Empty(EmptyChart {
            title: "Launches".to_string(),
            message: "unknown launch site".to_string(),
        });
        let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "empty");
        assert_eq!(json["title"], "Launches");
    }
}
