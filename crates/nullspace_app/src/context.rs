use nullspace_core::{FlyCamera, Time};
use nullspace_renderer::Renderer;

/// Per-call context handed to every [`SandboxApp`](crate::SandboxApp) hook.
pub struct AppContext<'a> {
    /// Frame timing: delta, elapsed, FPS.
    pub time: Time,
    /// Window size in physical pixels.
    pub window_size: (u32, u32),
    /// `true` while the GUI toggle holds the cursor.
    pub gui_focused: bool,
    pub camera: &'a mut FlyCamera,
    /// Scene and draw state; spawn and despawn objects through this.
    pub renderer: &'a mut Renderer,
    pub(crate) exit_requested: bool,
}

impl<'a> AppContext<'a> {
    /// Stops the event loop after the current callback.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.window_size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.window_size.1
    }

    /// Width / height, or 1.0 for a zero-height window.
    #[inline]
    pub fn aspect(&self) -> f32 {
        let (w, h) = self.window_size;
        if h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }
}
