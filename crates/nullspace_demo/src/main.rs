//! Nullspace demo: `nullspace [config.toml]`.

mod demo;

use anyhow::Context as _;
use nullspace_app::{init_logging, App, AppConfig};

use demo::Demo;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("loading {}", path.to_string_lossy()))?,
        None => AppConfig::default(),
    };
    init_logging(&config.logging);
    log::info!("starting {}", config.title);

    App::new(Demo::default()).with_config(config).run()
}
