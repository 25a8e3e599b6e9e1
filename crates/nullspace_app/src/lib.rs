//! Application shell for the Nullspace sandbox: window, event loop, frame
//! clock, logging and configuration.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nullspace_app::{App, AppContext, SandboxApp, Cube, Vec3};
//!
//! struct Demo;
//!
//! impl SandboxApp for Demo {
//!     fn setup(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
//!         ctx.renderer.spawn(Cube::new(), Vec3::ZERO)?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     App::new(Demo).with_title("demo").run()
//! }
//! ```
//!
//! Controls: WASD moves, the mouse looks around, Space toggles the
//! showreel orbit, G releases the cursor and Escape quits.

pub mod builder;
pub mod config;
pub mod context;
mod graphics;
pub mod logging;
mod runner;
pub mod traits;

pub use builder::App;
pub use config::{AppConfig, LoggingConfig};
pub use context::AppContext;
pub use logging::init_logging;
pub use traits::SandboxApp;

pub use nullspace_core::glam::{Mat4, Vec2, Vec3};
pub use nullspace_core::{CameraConfig, Cube, FlyCamera, KeyCode, SceneObject, Sphere, Time};
pub use nullspace_renderer::{ObjectId, RenderError};
