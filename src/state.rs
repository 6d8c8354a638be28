use crate::callbacks::CallbackRegistry;
use crate::config::DashboardConfig;
use crate::data::filter::ControlValues;
use crate::data::model::LaunchTable;
use crate::ui::chart::ChartSpec;
use crate::ui::panels::Layout;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Everything a request can see. Built once at startup and shared
/// read-only; requests never write to it.
#[derive(Debug)]
pub struct DashboardState {
    pub table: LaunchTable,
    pub config: DashboardConfig,
    pub registry: CallbackRegistry,
    /// Page description, fixed for the process lifetime.
    pub layout: Layout,
}

impl DashboardState {
    pub fn new(table: LaunchTable, config: DashboardConfig, registry: CallbackRegistry) -> Self {
        let layout = Layout::new(&config, table.payload_bounds(), &registry);
        Self {
            table,
            config,
            registry,
            layout,
        }
    }

    /// Recompute one graph from the posted control values.
    pub fn dispatch(&self, output: &str, values: &ControlValues) -> Option<ChartSpec> {
        let chart = self
            .registry
            .dispatch(output, &self.table, &self.config, values)?;
        match &chart {
            ChartSpec::Pie(pie) => {
                log::debug!(
                    "{output}: {} slices totalling {} for site {}",
                    pie.slices.len(),
                    pie.total(),
                    values.site.as_str()
                )
            }
            ChartSpec::Scatter(scatter) => log::debug!(
                "{output}: {} points for site {} in [{}, {}]",
                scatter.point_count(),
                values.site.as_str(),
                values.payload.lower,
                values.payload.upper
            ),
        }
        Some(chart)
    }
}
