use std::collections::BTreeMap;

use serde::Serialize;

use crate::callbacks::{CallbackRegistry, ControlId, PIE_CHART_ID, SCATTER_CHART_ID};
use crate::config::{DashboardConfig, Theme};
use crate::data::filter::{PayloadRange, ALL_SITES};
use crate::data::model::PayloadBounds;

/// The dashboard page. Renders whatever `/api/layout` describes with Plotly.js.
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

// ---------------------------------------------------------------------------
// Declarative page layout
// ---------------------------------------------------------------------------

/// Everything the page needs to build its controls and graphs.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
    pub theme: Theme,
    pub site_dropdown: Dropdown,
    pub payload_slider: RangeSlider,
    /// Graph element ids, top to bottom.
    pub graphs: Vec<String>,
    /// Control id → outputs to refresh when it changes.
    pub dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSlider {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    /// Initial selection, the payload extent of the loaded table.
    pub value: PayloadRange,
}

impl Layout {
    pub fn new(
        config: &DashboardConfig,
        bounds: PayloadBounds,
        registry: &CallbackRegistry,
    ) -> Self {
        let options = std::iter::once(DropdownOption {
            label: "ALL SITES".to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(config.sites.iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect();

        let slider = &config.payload_slider;

        let controls = [ControlId::SiteDropdown, ControlId::PayloadSlider];
        let dependencies: BTreeMap<String, Vec<String>> = controls
            .into_iter()
            .map(|control| {
                let outputs: Vec<String> = registry
                    .outputs_for(control)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (control.as_str().to_string(), outputs)
            })
            .collect();

        Layout {
            title: config.title.clone(),
            theme: config.theme.clone(),
            site_dropdown: Dropdown {
                id: ControlId::SiteDropdown.as_str().to_string(),
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here".to_string(),
                searchable: true,
            },
            payload_slider: RangeSlider {
                id: ControlId::PayloadSlider.as_str().to_string(),
                label: "Payload range (Kg):".to_string(),
                min: slider.min,
                max: slider.max,
                step: slider.step,
                marks: slider.marks.clone(),
                value: PayloadRange::new(bounds.min, bounds.max),
            },
            graphs: vec![PIE_CHART_ID.to_string(), SCATTER_CHART_ID.to_string()],
            dependencies,
        }
    }
}
