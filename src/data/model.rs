use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::data::filter::ALL_SITES;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (0 = failure, 1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a raw `class` value. Pandas sometimes writes integer
    /// columns as floats, so `1.0` is accepted as well as `1`.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative; the loader rejects anything else.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full launch table with pre-computed column summaries.
///
/// Built once and never mutated; handlers receive it by reference.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build column summaries from the loaded records.
    ///
    /// A site literally named `"ALL"` is rejected: the dropdown uses that
    /// value for the all-sites selection.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DashboardError> {
        if records.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }
        if records.iter().any(|r| r.launch_site == ALL_SITES) {
            return Err(DashboardError::ReservedSiteName(ALL_SITES.to_string()));
        }

        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.launch_site.clone());
            booster_categories.insert(rec.booster_version_category.clone());
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.contains(site)
    }

    pub fn payload_min(&self) -> f64 {
        self.payload_min
    }

    pub fn payload_max(&self) -> f64 {
        self.payload_max
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload: f64, success: bool, booster: &str) -> LaunchRecord {
    LaunchRecord {
        launch_site: site.to_string(),
        payload_mass_kg: payload,
        outcome: if success {
            Outcome::Success
        } else {
            Outcome::Failure
        },
        booster_version_category: booster.to_string(),
    }
}

/// Two sites: "A" with 2 successes and 1 failure, "B" with 2 successes.
#[cfg(test)]
pub(crate) fn sample_dataset() -> LaunchDataset {
    LaunchDataset::from_records(vec![
        record("A", 500.0, true, "v1.0"),
        record("A", 2500.0, false, "v1.1"),
        record("A", 6000.0, true, "FT"),
        record("B", 0.0, true, "v1.1"),
        record("B", 4800.0, true, "FT"),
    ])
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(2.0), None);
        assert_eq!(Outcome::from_class(f64::NAN), None);
        assert_eq!(Outcome::Success.class(), 1);
    }

    #[test]
    fn test_dataset_summaries() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.payload_min(), 0.0);
        assert_eq!(ds.payload_max(), 6000.0);
        assert_eq!(
            ds.sites().iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(ds.booster_categories().len(), 3);
        assert!(ds.has_site("B"));
        assert!(!ds.has_site("ALL"));
    }

    #[test]
    fn test_site_named_all_rejected() {
        let err = LaunchDataset::from_records(vec![
            record("A", 100.0, true, "FT"),
            record("ALL", 200.0, false, "FT"),
        ])
        .unwrap_err();
        assert_eq!(err, DashboardError::ReservedSiteName("ALL".to_string()));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert_eq!(
            LaunchDataset::from_records(Vec::new()).unwrap_err(),
            DashboardError::EmptyDataset
        );
    }
}
