use std::fmt;

use crate::config::DashboardConfig;
use crate::data::filter::ControlValues;
use crate::data::model::LaunchTable;
use crate::ui::chart::ChartSpec;
use crate::ui::plot::{pie_chart, scatter_chart};

pub const PIE_CHART_ID: &str = "success-pie-chart";
pub const SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Page controls whose values feed the callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

impl ControlId {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlId::SiteDropdown => "site-dropdown",
            ControlId::PayloadSlider => "payload-slider",
        }
    }
}

// ---------------------------------------------------------------------------
// Callback registry: output id → pure chart function
// ---------------------------------------------------------------------------

pub type ChartFn = fn(&LaunchTable, &DashboardConfig, &ControlValues) -> ChartSpec;

#[derive(Clone)]
pub struct Callback {
    pub output: &'static str,
    /// Controls this output depends on.
    pub inputs: Vec<ControlId>,
    pub handler: ChartFn,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

/// Maps each graph to the function that recomputes it, in registration
/// order. Dispatching the events (page → HTTP →
/// [`CallbackRegistry::dispatch`]) happens outside.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    /// The two dashboard graphs.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(Callback {
            output: PIE_CHART_ID,
            inputs: vec![ControlId::SiteDropdown],
            handler: |table, config, values| pie_chart(table, config, &values.site),
        });
        registry.register(Callback {
            output: SCATTER_CHART_ID,
            inputs: vec![ControlId::SiteDropdown, ControlId::PayloadSlider],
            handler: |table, config, values| {
                scatter_chart(table, config, &values.site, values.payload)
            },
        });
        registry
    }

    /// Register a callback, replacing any previous one for the same output.
    pub fn register(&mut self, callback: Callback) {
        match self.callbacks.iter_mut().find(|cb| cb.output == callback.output) {
            Some(existing) => *existing = callback,
            None => self.callbacks.push(callback),
        }
    }

    pub fn get(&self, output: &str) -> Option<&Callback> {
        self.callbacks.iter().find(|cb| cb.output == output)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.callbacks.iter().map(|cb| cb.output)
    }

    /// Outputs to recompute when `control` changes.
    pub fn outputs_for(&self, control: ControlId) -> Vec<&'static str> {
        self.callbacks
            .iter()
            .filter(|cb| cb.inputs.contains(&control))
            .map(|cb| cb.output)
            .collect()
    }

    /// Run the callback for `output`; `None` if nothing is registered.
    pub fn dispatch(
        &self,
        output: &str,
        table: &LaunchTable,
        config: &DashboardConfig,
        values: &ControlValues,
    ) -> Option<ChartSpec> {
        let callback = self.get(output)?;
        Some((callback.handler)(table, config, values))
    }
}
