use std::sync::Arc;

use nullspace_core::glam::Vec2;
use nullspace_core::{CameraInput, FlyCamera, KeyBindings, KeyCode, TimeClock};
use nullspace_renderer::RenderStyle;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::graphics::GraphicsState;
use crate::traits::SandboxApp;

struct Runner<A: SandboxApp> {
    app: A,
    config: AppConfig,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    camera: FlyCamera,
    bindings: KeyBindings,
    clock: TimeClock,
    cursor: Vec2,
    window_size: (u32, u32),
    gui_focused: bool,
    torn_down: bool,
    failure: Option<anyhow::Error>,
}

impl<A: SandboxApp> Runner<A> {
    fn new(app: A, config: AppConfig) -> Self {
        let camera = FlyCamera::new(&config.camera, config.aspect());
        let window_size = (config.width, config.height);
        Self {
            app,
            camera,
            bindings: KeyBindings::default(),
            clock: TimeClock::new(),
            cursor: Vec2::new(config.width as f32, config.height as f32) / 2.0,
            window_size,
            config,
            window: None,
            graphics: None,
            gui_focused: false,
            torn_down: false,
            failure: None,
        }
    }

    /// Records a fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.settle(Err(err), false);
        event_loop.exit();
    }

    /// Folds the outcome of an app hook into the loop state.  Returns `true`
    /// when the loop has to stop, either on error or on request.  Only the
    /// first error is kept.
    fn settle(&mut self, outcome: anyhow::Result<()>, exit_requested: bool) -> bool {
        match outcome {
            Ok(()) => exit_requested,
            Err(err) => {
                log::error!("fatal: {err:#}");
                self.failure.get_or_insert(err);
                true
            }
        }
    }

    /// Consumes the runner once the loop has ended.
    fn finish(mut self) -> anyhow::Result<()> {
        self.teardown();
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn render_style(&self) -> RenderStyle {
        let [r, g, b] = self.config.clear_color;
        RenderStyle {
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            show_grid: self.config.show_grid,
            ..RenderStyle::default()
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_resizable(self.config.resizable)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        self.window_size = (size.width.max(1), size.height.max(1));
        self.camera
            .set_aspect(self.window_size.0 as f32 / self.window_size.1 as f32);

        let mut gfx = pollster::block_on(GraphicsState::new(
            window.clone(),
            self.window_size.0,
            self.window_size.1,
            self.config.vsync,
            self.render_style(),
        ))?;

        {
            let mut ctx = AppContext {
                time: self.clock.peek(),
                window_size: self.window_size,
                gui_focused: self.gui_focused,
                camera: &mut self.camera,
                renderer: &mut gfx.renderer,
                exit_requested: false,
            };
            self.app.setup(&mut ctx)?;
        }

        self.window = Some(window);
        self.graphics = Some(gfx);
        self.apply_cursor_mode();
        log::info!("setup complete ({} objects)", self.graphics.as_ref().map_or(0, |g| g.renderer.scene().len()));
        Ok(())
    }

    /// Hides and confines the cursor while the camera owns the mouse.
    fn apply_cursor_mode(&mut self) {
        let Some(window) = &self.window else { return };
        if self.gui_focused {
            if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("cursor release failed: {err}");
            }
            window.set_cursor_visible(true);
            return;
        }

        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
        if let Err(err) = grabbed {
            log::warn!("cursor grab unavailable: {err}");
        }
        window.set_cursor_visible(false);

        let centre = Vec2::new(self.window_size.0 as f32, self.window_size.1 as f32) / 2.0;
        self.warp_cursor(centre);
    }

    fn warp_cursor(&mut self, to: Vec2) {
        if let Some(window) = &self.window {
            let position = PhysicalPosition::new(to.x as f64, to.y as f64);
            if let Err(err) = window.set_cursor_position(position) {
                log::trace!("cursor warp failed: {err}");
            }
        }
        self.cursor = to;
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::Escape if pressed => {
                event_loop.exit();
                return;
            }
            KeyCode::KeyG => {
                if pressed {
                    self.gui_focused = !self.gui_focused;
                    log::info!("gui focus {}", if self.gui_focused { "on" } else { "off" });
                    self.apply_cursor_mode();
                }
                return;
            }
            _ => {}
        }

        if let Some(action) = self.bindings.action_for(key) {
            self.camera.process_action(action, pressed);
        }

        let Some(gfx) = &mut self.graphics else { return };
        let mut ctx = AppContext {
            time: self.clock.peek(),
            window_size: self.window_size,
            gui_focused: self.gui_focused,
            camera: &mut self.camera,
            renderer: &mut gfx.renderer,
            exit_requested: false,
        };
        let outcome = self.app.on_key(key, pressed, &mut ctx);
        let exit_requested = ctx.exit_requested;
        if self.settle(outcome, exit_requested) {
            event_loop.exit();
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let time = self.clock.tick();

        let input = CameraInput {
            cursor: self.cursor,
            window_size: Vec2::new(self.window_size.0 as f32, self.window_size.1 as f32),
            gui_focused: self.gui_focused,
        };
        if let Some(warp) = self.camera.apply(time.delta, &input) {
            self.warp_cursor(warp);
        }

        let Some(gfx) = &mut self.graphics else {
            return Ok(());
        };

        {
            let mut ctx = AppContext {
                time,
                window_size: self.window_size,
                gui_focused: self.gui_focused,
                camera: &mut self.camera,
                renderer: &mut gfx.renderer,
                exit_requested: false,
            };
            self.app.update(&mut ctx)?;
            if ctx.exit_requested {
                event_loop.exit();
                return Ok(());
            }
        }

        gfx.renderer.update(time.delta);

        let frame = match gfx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("surface out of memory");
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return Ok(());
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gfx.renderer.begin_frame();
        gfx.renderer
            .render(&mut encoder, &view, self.camera.view(), self.camera.projection());
        gfx.renderer.context.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let Some(gfx) = &mut self.graphics else { return };
        let mut ctx = AppContext {
            time: self.clock.peek(),
            window_size: self.window_size,
            gui_focused: self.gui_focused,
            camera: &mut self.camera,
            renderer: &mut gfx.renderer,
            exit_requested: false,
        };
        self.app.teardown(&mut ctx);
        gfx.renderer.teardown();
    }
}

impl<A: SandboxApp> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                self.window_size = (size.width, size.height);
                self.camera
                    .set_aspect(size.width as f32 / size.height as f32);
                if let Some(gfx) = &mut self.graphics {
                    gfx.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => self.on_key(event_loop, key, state == ElementState::Pressed),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() || event_loop.exiting() {
            return;
        }
        if let Err(err) = self.frame(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

pub(crate) fn run_internal<A: SandboxApp + 'static>(config: AppConfig, app: A) -> anyhow::Result<()> {
    let mut runner = Runner::new(app, config);
    let event_loop = EventLoop::new()?;
    // spin as fast as the present mode allows
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner)?;
    runner.finish()
}
