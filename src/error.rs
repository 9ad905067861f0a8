use thiserror::Error;

/// Validation errors raised by the dashboard handlers and configuration.
///
/// File loading uses `anyhow` with context instead; a failed load at
/// startup is fatal and is reported from `main`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("unknown launch site: {0:?}")]
    UnknownSite(String),

    #[error("invalid payload range: low {low} is greater than high {high}")]
    InvalidPayloadRange { low: f64, high: f64 },

    #[error("invalid slider configuration: min {min}, max {max}, step {step}")]
    InvalidSlider { min: f64, max: f64, step: f64 },

    #[error("dataset contains no launch records")]
    EmptyDataset,

    #[error("launch site name {0:?} is reserved for the all-sites selection")]
    ReservedSiteName(String),
}
