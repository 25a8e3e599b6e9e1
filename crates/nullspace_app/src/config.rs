//! Application configuration, loadable from TOML.
//!
//! Every field has a default, so a file only needs the keys it changes:
//!
//! ```toml
//! title = "my sandbox"
//! show_grid = false
//!
//! [camera]
//! fov_deg = 60.0
//!
//! [logging]
//! level = "debug"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use nullspace_core::CameraConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub resizable: bool,
    /// Linear RGB clear color.
    pub clear_color: [f32; 3],
    pub show_grid: bool,
    pub camera: CameraConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Nullspace".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            resizable: true,
            clear_color: [0.2, 0.2, 0.2],
            show_grid: true,
            camera: CameraConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    /// `RUST_LOG` overrides it when set to a plain level.
    pub level: String,
    /// Per-target levels, e.g. `wgpu_core = "warn"`.
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let modules = ["wgpu_core", "wgpu_hal", "naga"]
            .into_iter()
            .map(|target| (target.to_string(), "warn".to_string()))
            .collect();
        Self {
            level: "info".to_string(),
            modules,
        }
    }
}
