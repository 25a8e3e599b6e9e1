//! `log` backend setup.

use std::str::FromStr;
use std::sync::Once;

use log::LevelFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Installs the global `fern` logger.  Only the first call has an effect.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let level = resolve_level(&config.level, env.as_deref());

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{:<5} {}] {}",
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level);

        for (target, module_level) in &config.modules {
            match LevelFilter::from_str(module_level) {
                Ok(filter) => dispatch = dispatch.level_for(target.clone(), filter),
                Err(_) => eprintln!("ignoring bad log level {module_level:?} for {target}"),
            }
        }

        if let Err(err) = dispatch.chain(std::io::stderr()).apply() {
            eprintln!("logger already installed: {err}");
            return;
        }
        log::debug!("logging initialised at {level}");
    });
}

/// `RUST_LOG` wins when it is a plain level; otherwise the configured level,
/// falling back to `info`.
fn resolve_level(configured: &str, env: Option<&str>) -> LevelFilter {
    env.and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .or_else(|| LevelFilter::from_str(configured.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}
