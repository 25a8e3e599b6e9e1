use std::path::Path;

use nullspace_core::CameraConfig;

use crate::config::AppConfig;
use crate::logging::init_logging;
use crate::traits::SandboxApp;

/// Entry point: configure with the builder methods, then [`App::run`].
///
/// ```rust,ignore
/// App::new(MyDemo::default())
///     .with_title("demo")
///     .with_size(1024, 768)
///     .run()?;
/// ```
pub struct App<A: SandboxApp> {
    config: AppConfig,
    app_state: A,
}

impl<A: SandboxApp + 'static> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a TOML file.
    pub fn with_config_file(self, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(self.with_config(AppConfig::load(path)?))
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.config.show_grid = show;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.config.camera = camera;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Installs logging (if nothing has yet) and runs the event loop until
    /// the window closes, Escape is pressed or a fatal error occurs.
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(&self.config.logging);
        crate::runner::run_internal(self.config, self.app_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;
    impl SandboxApp for Nothing {}

    #[test]
    fn builder_methods_edit_config() {
        let app = App::new(Nothing)
            .with_title("t")
            .with_size(640, 480)
            .with_vsync(false)
            .with_grid(false);
        let cfg = app.config();
        assert_eq!(cfg.title, "t");
        assert_eq!((cfg.width, cfg.height), (640, 480));
        assert!(!cfg.vsync);
        assert!(!cfg.show_grid);
    }
}
