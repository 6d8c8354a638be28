mod app;
mod callbacks;
mod color;
mod config;
mod data;
mod server;
mod state;
mod ui;

use std::path::Path;

use app::DashboardApp;
use config::{DashboardConfig, CONFIG_FILE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let app = match DashboardApp::load(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to start dashboard: {e:#}");
            return Err(e);
        }
    };

    app.run().await
}
