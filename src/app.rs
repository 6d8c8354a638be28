use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::callbacks::CallbackRegistry;
use crate::config::DashboardConfig;
use crate::data::loader::load_file;
use crate::server;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Dashboard application: load once, then serve
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: Arc<DashboardState>,
}

impl DashboardApp {
    /// Load the configured dataset. Failure here aborts startup.
    pub fn load(config: DashboardConfig) -> Result<Self> {
        let table = load_file(&config.dataset_path)
            .with_context(|| format!("loading dataset {}", config.dataset_path.display()))?;
        let bounds = table.payload_bounds();
        log::info!("Payload range {} – {} kg", bounds.min, bounds.max);

        let registry = CallbackRegistry::standard();
        log::debug!("Callbacks: {}", registry.outputs().collect::<Vec<_>>().join(", "));

        let state = DashboardState::new(table, config, registry);
        Ok(Self {
            state: Arc::new(state),
        })
    }

    /// Bind the configured address and serve until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {addr}"))?;
        log::info!("Dashboard running on http://{addr}/");

        axum::serve(listener, server::router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("serving dashboard")
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received Ctrl+C, shutting down"),
        Err(e) => log::error!("Failed to listen for Ctrl+C: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_builds_state_from_configured_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,0,0.0,v1.0\n\
             KSC LC-39A,1,9600.0,B4\n"
        )
        .unwrap();

        let config = DashboardConfig {
            dataset_path: file.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        let app = DashboardApp::load(config).unwrap();
        assert_eq!(app.state.table.len(), 2);
        assert_eq!(app.state.layout.payload_slider.value.upper, 9600.0);
    }

    #[test]
    fn missing_dataset_fails_startup() {
        let config = DashboardConfig {
            dataset_path: "/nonexistent/spacex_launch.csv".into(),
            ..DashboardConfig::default()
        };
        let err = DashboardApp::load(config).err().unwrap();
        assert!(format!("{err:#}").contains("loading dataset"));
    }
}
