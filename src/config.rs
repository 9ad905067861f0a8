use std::path::PathBuf;

use crate::error::DashboardError;

/// Data file read when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Bounds of the payload range control. These are the control's own
/// limits; the initial handle positions come from the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    pub fn validate(&self) -> Result<(), DashboardError> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min < self.max
            && self.step > 0.0;
        if ok {
            Ok(())
        } else {
            Err(DashboardError::InvalidSlider {
                min: self.min,
                max: self.max,
                step: self.step,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub slider: SliderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider: SliderConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Build the configuration from process arguments (program name
    /// excluded). The only accepted argument is an optional data path.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = path.into();
        }
        config
    }
}
