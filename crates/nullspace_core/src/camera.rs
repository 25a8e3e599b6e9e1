//! Free-fly camera with a scripted "showreel" orbit.
//!
//! Key events only flip the four movement-intent flags (or toggle the
//! showreel); the camera itself moves once per frame in
//! [`FlyCamera::apply`], as a function of the flags that are held at that
//! moment.
//!
//! ```rust
//! use nullspace_core::camera::{CameraAction, CameraConfig, CameraInput, FlyCamera};
//! use glam::Vec2;
//!
//! let mut cam = FlyCamera::new(&CameraConfig::default(), 16.0 / 9.0);
//! cam.process_action(CameraAction::Forward, true);
//! let input = CameraInput {
//!     cursor: Vec2::new(640.0, 360.0),
//!     window_size: Vec2::new(1280.0, 720.0),
//!     gui_focused: false,
//! };
//! let warp = cam.apply(1.0 / 60.0, &input);
//! assert!(warp.is_some());
//! ```

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ─── Actions ───────────────────────────────────────────────────────────────

/// Discrete inputs understood by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraAction {
    Forward,
    Back,
    Left,
    Right,
    ToggleShowreel,
}

impl CameraAction {
    fn intent_slot(self) -> Option<usize> {
        match self {
            CameraAction::Forward => Some(0),
            CameraAction::Back => Some(1),
            CameraAction::Left => Some(2),
            CameraAction::Right => Some(3),
            CameraAction::ToggleShowreel => None,
        }
    }
}

// ─── Configuration ─────────────────────────────────────────────────────────

/// User-tunable camera parameters.  Every field has a default so partial
/// TOML tables deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Start position in world units.
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Radians per second per pixel of cursor displacement.
    pub rotational_speed: f32,
    /// Speed gained per second while a movement key is held.
    pub acceleration: f32,
    pub max_speed: f32,
    /// Per-frame speed multiplier once every movement key is released.
    pub momentum: f32,
    /// Largest distance (pixels) the cursor may sit from the window centre.
    pub cursor_clamp: f32,
    /// Point the showreel orbit circles around.
    pub orbit_target: Vec3,
    pub orbit_radius: f32,
    pub orbit_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 0.0),
            fov_deg: 45.0,
            z_near: 1.0,
            z_far: 1000.0,
            rotational_speed: 0.08,
            acceleration: 75.0,
            max_speed: 64.0,
            momentum: 0.97,
            cursor_clamp: 20.0,
            orbit_target: Vec3::ZERO,
            orbit_radius: 24.72,
            orbit_height: 10.5,
        }
    }
}

/// Per-frame input snapshot consumed by [`FlyCamera::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInput {
    /// Cursor position in window pixels.
    pub cursor: Vec2,
    /// Window size in pixels.
    pub window_size: Vec2,
    /// While a GUI overlay owns the mouse the camera does not turn.
    pub gui_focused: bool,
}

// ─── Camera ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub dir: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub horizontal_angle: f32,
    pub vertical_angle: f32,
    pub speed: f32,

    view: Mat4,
    proj: Mat4,
    fov: f32,
    aspect: f32,
    z_near: f32,
    z_far: f32,

    config: CameraConfig,

    /// forward, back, left, right
    intents: [bool; 4],
    showreel: bool,
    showreel_time: f32,

    // gesture memory used while coasting
    strafing: bool,
    moving_back_or_forth: bool,
    prev_move_forward: bool,
    prev_move_right: bool,
}

impl FlyCamera {
    /// Creates a camera facing `-Z` from `config.position`.
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut cam = Self {
            position: config.position,
            dir: Vec3::ZERO,
            right: Vec3::ZERO,
            up: Vec3::Y,
            horizontal_angle: PI,
            vertical_angle: 0.0,
            speed: 0.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            fov: config.fov_deg.to_radians(),
            aspect,
            z_near: config.z_near,
            z_far: config.z_far,
            config: config.clone(),
            intents: [false; 4],
            showreel: false,
            showreel_time: 0.0,
            strafing: false,
            moving_back_or_forth: false,
            prev_move_forward: false,
            prev_move_right: false,
        };
        cam.setup(
            config.position,
            config.fov_deg,
            aspect,
            config.z_near,
            config.z_far,
        );
        cam
    }

    /// Places the camera, rebuilds the projection and clears every intent.
    pub fn setup(&mut self, position: Vec3, fov_deg: f32, aspect: f32, z_near: f32, z_far: f32) {
        self.position = position;
        self.fov = fov_deg.to_radians();
        self.aspect = aspect;
        self.z_near = z_near;
        self.z_far = z_far;
        self.intents = [false; 4];
        self.rebuild_projection();
        self.rebuild_basis();
    }

    /// Updates the aspect ratio after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild_projection();
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.proj
    }

    #[inline]
    pub fn is_showreel(&self) -> bool {
        self.showreel
    }

    /// `true` while the movement key bound to `action` is held.
    pub fn is_held(&self, action: CameraAction) -> bool {
        action.intent_slot().is_some_and(|slot| self.intents[slot])
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    // ── Input ──────────────────────────────────────────────────────────────

    /// Records a key press (`pressed = true`) or release.
    pub fn process_action(&mut self, action: CameraAction, pressed: bool) {
        if pressed {
            match action.intent_slot() {
                Some(slot) => self.intents[slot] = true,
                None => {
                    self.showreel = !self.showreel;
                    log::info!(
                        "camera mode: {}",
                        if self.showreel { "showreel" } else { "free-fly" }
                    );
                }
            }
            return;
        }

        if let Some(slot) = action.intent_slot() {
            self.intents[slot] = false;
        }
        match action {
            CameraAction::Forward | CameraAction::Back => {
                self.moving_back_or_forth = true;
                self.strafing = false;
            }
            CameraAction::Left | CameraAction::Right => {
                self.strafing = true;
                self.moving_back_or_forth = false;
            }
            CameraAction::ToggleShowreel => {}
        }
    }

    // ── Per-frame ──────────────────────────────────────────────────────────

    /// Advances the camera by `dt` seconds.
    ///
    /// Returns where the cursor should be warped to, or `None` when the
    /// cursor is left alone (showreel, or the GUI has focus).
    pub fn apply(&mut self, dt: f32, input: &CameraInput) -> Option<Vec2> {
        if self.showreel {
            self.orbit(dt);
            return None;
        }

        self.calc_velocity(dt);
        if input.gui_focused {
            self.rebuild_view();
            None
        } else {
            Some(self.orient(dt, input))
        }
    }

    /// Integrates the movement flags into the position.
    ///
    /// Speed ramps up while any flag is held and decays by
    /// `config.momentum` per frame otherwise; a released camera keeps
    /// coasting along the direction it was last pushed in.
    pub fn calc_velocity(&mut self, dt: f32) {
        let forward_velocity = self.dir * dt * self.speed;
        let strafing_velocity = self.right * dt * self.speed;

        if self.intents.iter().any(|held| *held) {
            self.speed = (self.speed + dt * self.config.acceleration)
                .clamp(0.0, self.config.max_speed);
        } else {
            self.speed *= self.config.momentum;

            if !self.strafing {
                let sign = if self.prev_move_forward { 1.0 } else { -1.0 };
                self.position += forward_velocity * sign;
            }
            if !self.moving_back_or_forth {
                let sign = if self.prev_move_right { 1.0 } else { -1.0 };
                self.position += strafing_velocity * sign;
            }
        }

        let [forward, back, left, right] = self.intents;

        if forward {
            self.position += forward_velocity;
            self.prev_move_forward = true;
        } else if back {
            self.position -= forward_velocity;
            self.prev_move_forward = false;
        }

        if right {
            self.position += strafing_velocity;
            self.prev_move_right = true;
        } else if left {
            self.position -= strafing_velocity;
            self.prev_move_right = false;
        }
    }

    /// Turns the camera from the cursor's displacement off the window
    /// centre and returns the position the cursor should be warped to.
    ///
    /// The cursor is pulled back towards the centre with a quadratic
    /// falloff and never allowed further than `config.cursor_clamp` pixels
    /// from it.
    pub fn orient(&mut self, dt: f32, input: &CameraInput) -> Vec2 {
        let size = input.window_size;
        let centre = size / 2.0;

        let mut cursor = input.cursor;
        if cursor.x > size.x || cursor.x < -size.x {
            cursor.x = centre.x;
        }
        if cursor.y > size.y || cursor.y < -size.y {
            cursor.y = centre.y;
        }

        let diff = centre - cursor;
        let rate = diff.abs().powf(2.0);

        if cursor.x > centre.x {
            cursor.x -= rate.x * dt;
        } else if cursor.x < centre.x {
            cursor.x += rate.x * dt;
        }
        if cursor.y > centre.y {
            cursor.y -= rate.y * dt;
        } else if cursor.y < centre.y {
            cursor.y += rate.y * dt;
        }

        let limit = Vec2::splat(self.config.cursor_clamp);
        cursor = cursor.clamp(centre - limit, centre + limit);

        let turn = self.config.rotational_speed * dt;
        self.horizontal_angle = (self.horizontal_angle + turn * diff.x).rem_euclid(TAU);
        self.vertical_angle = (self.vertical_angle + turn * diff.y).rem_euclid(TAU);

        self.rebuild_basis();
        cursor
    }

    // ── Internal ───────────────────────────────────────────────────────────

    fn orbit(&mut self, dt: f32) {
        self.showreel_time += dt;
        let t = TAU + self.showreel_time;
        let target = self.config.orbit_target;

        self.position = Vec3::new(
            target.x + self.config.orbit_radius * t.cos(),
            self.config.orbit_height,
            target.z + self.config.orbit_radius * t.sin(),
        );
        self.view = Mat4::look_at_rh(self.position, target, Vec3::Y);
    }

    fn rebuild_basis(&mut self) {
        let (h, v) = (self.horizontal_angle, self.vertical_angle);
        self.dir = Vec3::new(v.cos() * h.sin(), v.sin(), v.cos() * h.cos());
        self.right = Vec3::new((h - FRAC_PI_2).sin(), 0.0, (h - FRAC_PI_2).cos());
        self.up = self.right.cross(self.dir);
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.dir, self.up);
    }

    fn rebuild_projection(&mut self) {
        self.proj = Mat4::perspective_rh(self.fov, self.aspect, self.z_near, self.z_far);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centred_input() -> CameraInput {
        CameraInput {
            cursor: Vec2::new(400.0, 300.0),
            window_size: Vec2::new(800.0, 600.0),
            gui_focused: false,
        }
    }

    fn camera() -> FlyCamera {
        FlyCamera::new(&CameraConfig::default(), 4.0 / 3.0)
    }

    #[test]
    fn starts_looking_down_negative_z() {
        let cam = camera();
        assert!((cam.dir - Vec3::NEG_Z).length() < 1e-5);
        assert!((cam.right - Vec3::X).length() < 1e-5);
        assert!((cam.up - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn showreel_orbit_keeps_its_radius() {
        let mut cam = camera();
        cam.process_action(CameraAction::ToggleShowreel, true);
        assert!(cam.is_showreel());

        let cfg = CameraConfig::default();
        for dt in [0.016, 0.033, 0.5, 0.001, 1.25, 0.016, 3.0] {
            assert_eq!(cam.apply(dt, &centred_input()), None);
            let offset = cam.position - cfg.orbit_target;
            let planar = Vec2::new(offset.x, offset.z).length();
            assert!((planar - cfg.orbit_radius).abs() < 1e-3, "radius drifted to {planar}");
            assert!((cam.position.y - cfg.orbit_height).abs() < 1e-6);
        }
    }

    #[test]
    fn showreel_looks_at_target() {
        let mut cam = camera();
        cam.process_action(CameraAction::ToggleShowreel, true);
        cam.apply(0.7, &centred_input());
        let target_in_view = cam.view().transform_point3(Vec3::ZERO);
        assert!(target_in_view.x.abs() < 1e-3);
        assert!(target_in_view.y.abs() < 1e-3);
        assert!(target_in_view.z < 0.0);
    }

    #[test]
    fn toggle_only_reacts_to_presses() {
        let mut cam = camera();
        cam.process_action(CameraAction::ToggleShowreel, true);
        cam.process_action(CameraAction::ToggleShowreel, false);
        assert!(cam.is_showreel());
        cam.process_action(CameraAction::ToggleShowreel, true);
        assert!(!cam.is_showreel());
    }

    #[test]
    fn key_events_only_set_flags() {
        let mut cam = camera();
        let start = cam.position;
        cam.process_action(CameraAction::Forward, true);
        cam.process_action(CameraAction::Left, true);
        assert!(cam.is_held(CameraAction::Forward));
        assert!(cam.is_held(CameraAction::Left));
        assert!(!cam.is_held(CameraAction::Back));
        assert_eq!(cam.position, start);

        cam.process_action(CameraAction::Forward, false);
        assert!(!cam.is_held(CameraAction::Forward));
        assert!(!cam.is_held(CameraAction::ToggleShowreel));
    }

    #[test]
    fn holding_forward_accelerates_to_the_cap() {
        let mut cam = camera();
        let start = cam.position;
        cam.process_action(CameraAction::Forward, true);
        for _ in 0..20 {
            cam.calc_velocity(0.1);
        }
        assert_eq!(cam.speed, 64.0);
        assert!(cam.position.z < start.z);
        assert!((cam.position.x - start.x).abs() < 1e-4);
    }

    #[test]
    fn released_camera_coasts_and_decays() {
        let mut cam = camera();
        cam.process_action(CameraAction::Forward, true);
        for _ in 0..5 {
            cam.calc_velocity(0.1);
        }
        cam.process_action(CameraAction::Forward, false);

        let speed = cam.speed;
        let z = cam.position.z;
        cam.calc_velocity(0.1);
        assert!((cam.speed - speed * 0.97).abs() < 1e-5);
        // still drifting forward (down -Z)
        assert!(cam.position.z < z);
    }

    #[test]
    fn cursor_is_pulled_back_towards_centre() {
        let mut cam = camera();
        let mut input = centred_input();
        input.cursor = Vec2::new(410.0, 300.0);
        let before = cam.horizontal_angle;

        let warp = cam.orient(0.01, &input);
        assert!(warp.x < 410.0 && warp.x >= 400.0);
        assert_eq!(warp.y, 300.0);
        // cursor right of centre -> negative displacement -> yaw decreases
        assert!(cam.horizontal_angle < before);
    }

    #[test]
    fn warp_is_clamped_around_centre() {
        let mut cam = camera();
        let mut input = centred_input();
        input.cursor = Vec2::new(790.0, 10.0);
        let warp = cam.orient(0.0, &input);
        assert_eq!(warp, Vec2::new(420.0, 280.0));
    }

    #[test]
    fn off_window_cursor_is_treated_as_centred() {
        let mut cam = camera();
        let mut input = centred_input();
        input.cursor = Vec2::new(5000.0, -9000.0);
        let (h, v) = (cam.horizontal_angle, cam.vertical_angle);
        let warp = cam.orient(0.016, &input);
        assert_eq!(warp, Vec2::new(400.0, 300.0));
        assert_eq!((cam.horizontal_angle, cam.vertical_angle), (h, v));
    }

    #[test]
    fn gui_focus_freezes_orientation() {
        let mut cam = camera();
        let mut input = centred_input();
        input.cursor = Vec2::new(300.0, 200.0);
        input.gui_focused = true;
        let (h, v) = (cam.horizontal_angle, cam.vertical_angle);
        assert_eq!(cam.apply(0.016, &input), None);
        assert_eq!((cam.horizontal_angle, cam.vertical_angle), (h, v));
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut cam = camera();
        let mut input = centred_input();
        input.cursor = Vec2::new(415.0, 288.0);
        for _ in 0..50 {
            cam.orient(0.016, &input);
        }
        assert!((cam.dir.length() - 1.0).abs() < 1e-4);
        assert!((cam.right.length() - 1.0).abs() < 1e-4);
        assert!(cam.dir.dot(cam.right).abs() < 1e-4);
        assert!(cam.up.dot(cam.dir).abs() < 1e-4);
    }
}
