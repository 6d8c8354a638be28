use crate::config::DashboardConfig;
use crate::data::filter::{filtered_records, PayloadRange, SiteSelection};
use crate::data::loader::{CLASS_COLUMN, PAYLOAD_COLUMN};
use crate::data::model::LaunchTable;

use super::chart::{ChartSpec, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterSeries};

pub const ALL_SITES_PIE_TITLE: &str = "Total Launches for All Sites";
pub const SITE_PIE_TITLE: &str = "Total Launch for a Specific Site";
pub const SCATTER_TITLE: &str = "Correlation between Payload and Launch Success";

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Pie of launch outcomes.
///
/// * `All` → one slice per site, sized by its number of successes.
/// * `Site(s)` → one slice per outcome class at `s`, sized by record count.
///
/// Groups appear in the order they are first met in the table; an unknown
/// site produces no slices.
pub fn pie_chart(table: &LaunchTable, config: &DashboardConfig, site: &SiteSelection) -> ChartSpec {
    let mut groups: Vec<(String, u64)> = Vec::new();
    let mut add = |label: String, value: u64| match groups.iter_mut().find(|(l, _)| *l == label) {
        Some((_, total)) => *total += value,
        None => groups.push((label, value)),
    };

    let title = match site {
        SiteSelection::All => {
            for record in table.records() {
                add(record.site.clone(), u64::from(record.class.as_u8()));
            }
            ALL_SITES_PIE_TITLE
        }
        SiteSelection::Site(_) => {
            for record in filtered_records(table, site, None) {
                add(record.class.to_string(), 1);
            }
            SITE_PIE_TITLE
        }
    };

    let colors = config.pie_palette.assign(groups.len());
    let slices = groups
        .into_iter()
        .zip(colors)
        .map(|((label, value), color)| PieSlice { label, value, color })
        .collect();

    ChartSpec::Pie(PieChart {
        title: title.to_string(),
        slices,
    })
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

/// Scatter of payload mass against outcome class for the selected site and
/// inclusive payload range, coloured by booster version category.
pub fn scatter_chart(
    table: &LaunchTable,
    config: &DashboardConfig,
    site: &SiteSelection,
    payload: PayloadRange,
) -> ChartSpec {
    let mut grouped: Vec<(String, Vec<ScatterPoint>)> = Vec::new();
    for record in filtered_records(table, site, Some(payload)) {
        let point = ScatterPoint {
            x: record.payload_mass_kg,
            y: f64::from(record.class.as_u8()),
        };
        match grouped.iter_mut().find(|(c, _)| *c == record.booster_category) {
            Some((_, points)) => points.push(point),
            None => grouped.push((record.booster_category.clone(), vec![point])),
        }
    }

    let colors = config.scatter_palette.assign(grouped.len());
    let series = grouped
        .into_iter()
        .zip(colors)
        .map(|((category, points), color)| ScatterSeries {
            category,
            color,
            points,
        })
        .collect();

    let title = match site {
        SiteSelection::All => SCATTER_TITLE.to_string(),
        SiteSelection::Site(name) => format!("{SCATTER_TITLE} for {name}"),
    };

    ChartSpec::Scatter(ScatterChart {
        title,
        x_label: PAYLOAD_COLUMN.to_string(),
        y_label: CLASS_COLUMN.to_string(),
        plot_background: config.theme.plot_background,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    use OutcomeClass::{Failure, Success};

    fn table(records: &[(&str, f64, OutcomeClass, &str)]) -> LaunchTable {
        LaunchTable::from_records(
            records
                .iter()
                .map(|&(site, payload, class, booster)| {
                    LaunchRecord::new(site, payload, class, booster)
                })
                .collect(),
        )
        .unwrap()
    }

    fn two_site_table() -> LaunchTable {
        table(&[
            ("A", 1000.0, Success, "FT"),
            ("B", 2000.0, Failure, "FT"),
            ("A", 3000.0, Failure, "B4"),
            ("B", 4000.0, Failure, "B5"),
            ("A", 5000.0, Success, "B4"),
        ])
    }

    fn pie(chart: ChartSpec) -> PieChart {
        match chart {
            ChartSpec::Pie(pie) => pie,
            other => panic!("expected pie, got {other:?}"),
        }
    }

    fn scatter(chart: ChartSpec) -> ScatterChart {
        match chart {
            ChartSpec::Scatter(scatter) => scatter,
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    fn slices(chart: &PieChart) -> Vec<(&str, u64)> {
        chart.slices.iter().map(|s| (s.label.as_str(), s.value)).collect()
    }

    #[test]
    fn all_sites_pie_counts_successes_per_site() {
        let config = DashboardConfig::default();
        let chart = pie(pie_chart(&two_site_table(), &config, &SiteSelection::All));
        assert_eq!(slices(&chart), [("A", 2), ("B", 0)]);
        assert_eq!(chart.title, ALL_SITES_PIE_TITLE);
    }

    #[test]
    fn site_pie_counts_records_per_class() {
        let site = SiteSelection::Site("A".into());
        let chart = pie(pie_chart(&two_site_table(), &DashboardConfig::default(), &site));
        assert_eq!(slices(&chart), [("1", 2), ("0", 1)]);
        assert_eq!(chart.total(), 3);
        assert_eq!(chart.title, SITE_PIE_TITLE);
    }

    #[test]
    fn pie_totals_match_record_counts() {
        let table = two_site_table();
        let config = DashboardConfig::default();
        for name in ["A", "B"] {
            let site = SiteSelection::Site(name.into());
            let expected = table.records().iter().filter(|r| r.site == name).count() as u64;
            assert_eq!(pie(pie_chart(&table, &config, &site)).total(), expected);
        }
        let successes = table.records().iter().filter(|r| r.class == Success).count() as u64;
        assert_eq!(pie(pie_chart(&table, &config, &SiteSelection::All)).total(), successes);
    }

    #[test]
    fn pie_colours_follow_palette_order() {
        let config = DashboardConfig::default();
        let chart = pie(pie_chart(&two_site_table(), &config, &SiteSelection::All));
        let colors: Vec<_> = chart.slices.iter().map(|s| s.color).collect();
        assert_eq!(colors, config.pie_palette.colors()[..2]);
    }

    #[test]
    fn unknown_site_yields_empty_charts() {
        let table = two_site_table();
        let config = DashboardConfig::default();
        let site = SiteSelection::Site("Nowhere".into());

        assert!(pie(pie_chart(&table, &config, &site)).slices.is_empty());
        let chart = scatter(scatter_chart(&table, &config, &site, PayloadRange::new(0.0, 1e6)));
        assert_eq!(chart.point_count(), 0);
    }

    #[test]
    fn scatter_keeps_only_points_in_range() {
        let table = two_site_table();
        let range = PayloadRange::new(2000.0, 4000.0);
        let config = DashboardConfig::default();
        let chart = scatter(scatter_chart(&table, &config, &SiteSelection::All, range));

        assert_eq!(chart.point_count(), 3);
        assert!(chart.points().all(|p| range.contains(p.x)));
        assert_eq!(chart.title, SCATTER_TITLE);
    }

    #[test]
    fn scatter_all_sites_example() {
        let table = table(&[("A", 3000.0, Success, "FT"), ("B", 6000.0, Success, "FT")]);
        let chart = scatter(scatter_chart(
            &table,
            &DashboardConfig::default(),
            &SiteSelection::All,
            PayloadRange::new(0.0, 5000.0),
        ));
        let points: Vec<_> = chart.points().copied().collect();
        assert_eq!(points, [ScatterPoint { x: 3000.0, y: 1.0 }]);
    }

    #[test]
    fn scatter_for_site_interpolates_title_and_groups_boosters() {
        let config = DashboardConfig::default();
        let site = SiteSelection::Site("A".into());
        let range = PayloadRange::new(0.0, 10000.0);
        let chart = scatter(scatter_chart(&two_site_table(), &config, &site, range));

        assert_eq!(chart.title, format!("{SCATTER_TITLE} for A"));
        let categories: Vec<_> = chart.series.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, ["FT", "B4"]);
        assert_eq!(chart.series[1].points.len(), 2);
        assert_eq!(chart.series[0].color, config.scatter_palette.colors()[0]);
        assert_eq!(chart.series[1].color, config.scatter_palette.colors()[1]);
    }

    #[test]
    fn scatter_palette_wraps_for_extra_categories() {
        let config = DashboardConfig::default();
        let chart = scatter(scatter_chart(
            &two_site_table(),
            &config,
            &SiteSelection::All,
            PayloadRange::new(0.0, 10000.0),
        ));
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[2].color, chart.series[0].color);
    }

    #[test]
    fn out_of_range_or_inverted_payload_is_empty() {
        let table = two_site_table();
        let config = DashboardConfig::default();
        for range in [PayloadRange::new(9000.0, 9500.0), PayloadRange::new(5000.0, 1000.0)] {
            let chart = scatter(scatter_chart(&table, &config, &SiteSelection::All, range));
            assert!(chart.series.is_empty());
        }
    }

    #[test]
    fn charts_are_idempotent() {
        let table = two_site_table();
        let config = DashboardConfig::default();
        let site = SiteSelection::Site("B".into());
        let range = PayloadRange::new(0.0, 4000.0);

        assert_eq!(pie_chart(&table, &config, &site), pie_chart(&table, &config, &site));
        assert_eq!(
            scatter_chart(&table, &config, &site, range),
            scatter_chart(&table, &config, &site, range)
        );
    }
}
