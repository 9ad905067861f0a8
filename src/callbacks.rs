use std::collections::BTreeMap;

use crate::chart::{PieChart, PieSlice, ScatterChart, ScatterSeries};
use crate::color::{ColorMap, Rgb};
use crate::data::filter::{PayloadRange, SiteSelection, filtered_indices};
use crate::data::loader::{COL_CLASS, COL_PAYLOAD_MASS};
use crate::data::model::{LaunchDataset, Outcome};
use crate::error::DashboardError;

const SUCCESS_COLOR: Rgb = [46, 160, 67];
const FAILURE_COLOR: Rgb = [214, 69, 65];

// ---------------------------------------------------------------------------
// Pie chart: success counts
// ---------------------------------------------------------------------------

/// Recompute the pie chart for a dropdown value.
///
/// For a single site the slices are that site's outcome counts. For
/// `"ALL"` the slices are launch counts per site.
pub fn success_pie_chart(
    dataset: &LaunchDataset,
    site_value: &str,
) -> Result<PieChart, DashboardError> {
    log::debug!("pie chart requested for site {site_value:?}");

    match dataset.resolve_site(site_value)? {
        SiteSelection::Site(site) => {
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.launch_site == site) {
                *counts.entry(rec.outcome).or_default() += 1;
            }
            let slices = counts
                .into_iter()
                .map(|(outcome, value)| PieSlice {
                    label: outcome.to_string(),
                    value,
                    color: match outcome {
                        Outcome::Success => SUCCESS_COLOR,
                        Outcome::Failure => FAILURE_COLOR,
                    },
                })
                .collect();
            Ok(PieChart {
                title: format!("Success vs. Failed Counts for {site}"),
                slices: sorted_by_count(slices),
            })
        }
        SiteSelection::All => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in dataset.records() {
                *counts.entry(rec.launch_site.as_str()).or_default() += 1;
            }
            let colors = ColorMap::new(dataset.sites());
            let slices = counts
                .into_iter()
                .map(|(site, value)| PieSlice {
                    label: site.to_string(),
                    value,
                    color: colors.color_for(site),
                })
                .collect();
            Ok(PieChart {
                title: "Total Launches by Site (All Sites)".to_string(),
                slices: sorted_by_count(slices),
            })
        }
    }
}

/// Largest slice first; equal counts keep label order.
fn sorted_by_count(mut slices: Vec<PieSlice>) -> Vec<PieSlice> {
    slices.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    slices
}

// ---------------------------------------------------------------------------
// Scatter chart: payload vs. outcome
// ---------------------------------------------------------------------------

/// Recompute the payload/outcome scatter chart for the dropdown value and
/// the slider's `(low, high)` pair. Points are grouped into one series per
/// booster version category, in order of first appearance.
pub fn payload_scatter_chart(
    dataset: &LaunchDataset,
    site_value: &str,
    payload: (f64, f64),
) -> Result<ScatterChart, DashboardError> {
    log::debug!(
        "scatter chart requested for site {site_value:?}, payload {:?}",
        payload
    );

    let selection = dataset.resolve_site(site_value)?;
    let range = PayloadRange::new(payload.0, payload.1)?;
    let colors = ColorMap::new(dataset.booster_categories());

    let mut series: Vec<ScatterSeries> = Vec::new();
    for idx in filtered_indices(dataset, &selection, range) {
        let rec = &dataset.records()[idx];
        let point = [rec.payload_mass_kg, f64::from(rec.outcome.class())];
        match series
            .iter_mut()
            .find(|s| s.name == rec.booster_version_category)
        {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name: rec.booster_version_category.clone(),
                color: colors.color_for(&rec.booster_version_category),
                points: vec![point],
            }),
        }
    }

    Ok(ScatterChart {
        title: format!("Correlation between Payload and Success for {selection}"),
        x_label: COL_PAYLOAD_MASS.to_string(),
        y_label: COL_CLASS.to_string(),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::sample_dataset;

    #[test]
    fn test_pie_for_single_site() {
        let ds = sample_dataset();
        let pie = success_pie_chart(&ds, "A").unwrap();
        assert_eq!(pie.value_of("Success"), 2);
        assert_eq!(pie.value_of("Failure"), 1);
        assert_eq!(pie.slices[0].label, "Success");
        assert_eq!(pie.title, "Success vs. Failed Counts for A");
    }

    #[test]
    fn test_pie_site_counts_sum_to_site_rows() {
        let ds = sample_dataset();
        for site in ds.sites() {
            let pie = success_pie_chart(&ds, site).unwrap();
            let rows = ds.records().iter().filter(|r| &r.launch_site == site).count();
            assert_eq!(pie.total(), rows);
        }
    }

    #[test]
    fn test_pie_for_all_sites() {
        let ds = sample_dataset();
        let pie = success_pie_chart(&ds, "ALL").unwrap();
        assert_eq!(pie.value_of("A"), 3);
        assert_eq!(pie.value_of("B"), 2);
        assert_eq!(pie.total(), ds.len());
        assert!(pie.title.contains("All Sites"));
    }

    #[test]
    fn test_pie_unknown_site_is_error() {
        let ds = sample_dataset();
        assert_eq!(
            success_pie_chart(&ds, "C").unwrap_err(),
            DashboardError::UnknownSite("C".to_string())
        );
    }

    #[test]
    fn test_scatter_respects_payload_bounds() {
        let ds = sample_dataset();
        for (low, high) in [(0.0, 5000.0), (500.0, 500.0), (2000.0, 10000.0), (7000.0, 8000.0)] {
            let chart = payload_scatter_chart(&ds, "ALL", (low, high)).unwrap();
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.payload_mass_kg >= low && r.payload_mass_kg <= high)
                .count();
            assert_eq!(chart.point_count(), expected);
            for s in &chart.series {
                for [x, _] in &s.points {
                    assert!(*x >= low && *x <= high);
                }
            }
        }
    }

    #[test]
    fn test_scatter_filters_site_and_excludes_heavy_payload() {
        let ds = sample_dataset();
        let chart = payload_scatter_chart(&ds, "A", (0.0, 5000.0)).unwrap();
        assert_eq!(chart.point_count(), 2);
        assert!(chart.series.iter().all(|s| s.name != "FT"));
        assert_eq!(chart.title, "Correlation between Payload and Success for A");

        let all = payload_scatter_chart(&ds, "ALL", (0.0, 5000.0)).unwrap();
        assert!(all
            .series
            .iter()
            .flat_map(|s| &s.points)
            .all(|[x, _]| *x != 6000.0));
        assert!(all.title.ends_with("ALL"));
    }

    #[test]
    fn test_scatter_series_colors_stable_across_filters() {
        let ds = sample_dataset();
        let wide = payload_scatter_chart(&ds, "ALL", (0.0, 10000.0)).unwrap();
        let narrow = payload_scatter_chart(&ds, "B", (0.0, 10000.0)).unwrap();
        for s in &narrow.series {
            let same = wide.series.iter().find(|w| w.name == s.name).unwrap();
            assert_eq!(same.color, s.color);
        }
        // First appearance order: v1.0, v1.1, FT.
        let names: Vec<&str> = wide.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["v1.0", "v1.1", "FT"]);
    }

    #[test]
    fn test_scatter_rejects_bad_inputs() {
        let ds = sample_dataset();
        assert!(matches!(
            payload_scatter_chart(&ds, "ALL", (5000.0, 100.0)),
            Err(DashboardError::InvalidPayloadRange { .. })
        ));
        assert!(matches!(
            payload_scatter_chart(&ds, "nowhere", (0.0, 100.0)),
            Err(DashboardError::UnknownSite(_))
        ));
    }

    #[test]
    fn test_handlers_are_idempotent() {
        let ds = sample_dataset();
        assert_eq!(
            success_pie_chart(&ds, "ALL").unwrap(),
            success_pie_chart(&ds, "ALL").unwrap()
        );
        assert_eq!(
            payload_scatter_chart(&ds, "B", (0.0, 4800.0)).unwrap(),
            payload_scatter_chart(&ds, "B", (0.0, 4800.0)).unwrap()
        );
    }
}
