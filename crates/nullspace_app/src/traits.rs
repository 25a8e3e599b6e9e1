use nullspace_core::KeyCode;

use crate::context::AppContext;

/// Hooks a sandbox application implements.
///
/// Every method has an empty default.  Camera movement, Escape and the GUI
/// toggle are handled by the runner before the app sees anything.
#[allow(unused_variables)]
pub trait SandboxApp {
    /// Called once after the window and GPU are ready; spawn the initial
    /// scene here.  An error stops the event loop.
    fn setup(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called every frame after the camera moved and before objects are
    /// stepped and drawn.  An error stops the event loop and is returned
    /// from [`App::run`](crate::App::run).
    fn update(&mut self, ctx: &mut AppContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Keys that are neither runner shortcuts nor camera bindings.  Errors
    /// are fatal, as for `update`.
    fn on_key(&mut self, key: KeyCode, pressed: bool, ctx: &mut AppContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once while the event loop shuts down, before the scene is torn
    /// down.
    fn teardown(&mut self, ctx: &mut AppContext) {}
}
