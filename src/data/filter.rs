use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};
use crate::error::DashboardError;

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// A validated dropdown value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

impl LaunchDataset {
    /// Map a raw dropdown value onto a selection. Values that are neither
    /// `"ALL"` nor a site present in the data are rejected.
    pub fn resolve_site(&self, value: &str) -> Result<SiteSelection, DashboardError> {
        if value == ALL_SITES {
            Ok(SiteSelection::All)
        } else if self.has_site(value) {
            Ok(SiteSelection::Site(value.to_string()))
        } else {
            Err(DashboardError::UnknownSite(value.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, DashboardError> {
        if low.is_nan() || high.is_nan() || low > high {
            return Err(DashboardError::InvalidPayloadRange { low, high });
        }
        Ok(PayloadRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload: f64) -> bool {
        payload >= self.low && payload <= self.high
    }
}

/// Return indices of launches that pass both the site and payload filters,
/// in dataset order.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg) && selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
