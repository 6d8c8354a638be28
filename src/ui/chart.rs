use serde::Serialize;
use serde_json::{json, Value};

use crate::color::Color;

// ---------------------------------------------------------------------------
// Chart specifications handed to the presentation layer
// ---------------------------------------------------------------------------

/// One chart, described by data, encoding and title. Serialized with a
/// `kind` tag so the page can tell the variants apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub plot_background: Color,
    /// One series per colour category, in first-seen order.
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

impl ScatterChart {
    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn point_count(&self) -> usize {
        self.points().count()
    }
}

impl ChartSpec {
    /// Plotly figure JSON (`{"data": [...], "layout": {...}}`).
    pub fn to_figure(&self) -> Value {
        match self {
            ChartSpec::Pie(pie) => json!({
                "data": [{
                    "type": "pie",
                    "labels": pie.slices.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
                    "values": pie.slices.iter().map(|s| s.value).collect::<Vec<_>>(),
                    "marker": {
                        "colors": pie.slices.iter().map(|s| s.color).collect::<Vec<_>>(),
                    },
                    "sort": false,
                }],
                "layout": {
                    "title": { "text": pie.title },
                    "legend": { "tracegroupgap": 0 },
                },
            }),
            ChartSpec::Scatter(scatter) => {
                let data: Vec<Value> = scatter
                    .series
                    .iter()
                    .map(|series| {
                        json!({
                            "type": "scatter",
                            "mode": "markers",
                            "name": series.category,
                            "legendgroup": series.category,
                            "x": series.points.iter().map(|p| p.x).collect::<Vec<_>>(),
                            "y": series.points.iter().map(|p| p.y).collect::<Vec<_>>(),
                            "marker": { "color": series.color },
                        })
                    })
                    .collect();
                json!({
                    "data": data,
                    "layout": {
                        "title": { "text": scatter.title },
                        "xaxis": { "title": { "text": scatter.x_label } },
                        "yaxis": { "title": { "text": scatter.y_label } },
                        "legend": { "title": { "text": "Booster Version Category" } },
                        "plot_bgcolor": scatter.plot_background,
                    },
                })
            }
        }
    }
}
