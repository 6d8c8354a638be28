use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, Palette};

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Launch sites offered by the site dropdown, after the "all sites" entry.
pub const DEFAULT_SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard would otherwise keep as global constants.
/// Passed explicitly into the chart functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Input dataset, resolved against the working directory.
    pub dataset_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Page heading.
    pub title: String,
    /// Site dropdown entries in display order.
    pub sites: Vec<String>,
    pub pie_palette: Palette,
    pub scatter_palette: Palette,
    pub theme: Theme,
    pub payload_slider: SliderConfig,
}

/// Page colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub plot_background: Color,
    pub border: Color,
}

/// Fixed extent and tick marks of the payload range slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DashboardConfig {
    /// Read a JSON configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// [`DashboardConfig::from_file`] if `path` exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::info!("Reading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("spacex_launch.csv"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            title: "SpaceX Launch Dashboard".to_string(),
            sites: DEFAULT_SITES.iter().map(|s| s.to_string()).collect(),
            pie_palette: Palette::new(vec![
                Color::from_rgb(0x00, 0x77, 0xb6),
                Color::from_rgb(0x00, 0xb4, 0xd8),
                Color::from_rgb(0x48, 0xca, 0xe4),
                Color::from_rgb(0x90, 0xe0, 0xef),
                Color::from_rgb(0xad, 0xe8, 0xf4),
            ]),
            scatter_palette: Palette::new(vec![
                Color::from_rgb(0x4c, 0xaf, 0x50),
                Color::from_rgb(0xff, 0x57, 0x22),
            ]),
            theme: Theme::default(),
            payload_slider: SliderConfig::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb(0xf3, 0xf6, 0xfa),
            text: Color::from_rgb(0x33, 0x33, 0x33),
            plot_background: Color::from_rgb(0xff, 0xff, 0xff),
            border: Color::from_rgb(0xdd, 0xdd, 0xdd),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
            marks: vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind_addr.port(), 8050);
        assert_eq!(config.sites.len(), 4);
        assert_eq!(config.pie_palette.colors().len(), 5);
        assert_eq!(config.scatter_palette.colors()[1].to_hex(), "#ff5722");
        assert_eq!(config.payload_slider.marks, [0.0, 2500.0, 5000.0, 7500.0, 10000.0]);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r##"{"scatter_palette": ["#000000"]}"##).unwrap();
        assert_eq!(config.scatter_palette.colors().len(), 1);
        assert_eq!(config.title, "SpaceX Launch Dashboard");
    }

    #[test]
    fn invalid_colour_in_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"pie_palette": ["blue"]}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn absent_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
