//! Toy rigid-point physics: one horizontal ground plane and an explicit
//! Euler integrator for the bouncing sphere.
//!
//! The integrator reproduces the sandbox's historical motion rather than a
//! correct model.  In particular the new velocity is
//! `(prev_velocity + accel) * dt`, and contact is resolved by cancelling
//! gravity with an equal and opposite normal force.  Changing either alters
//! where spheres come to rest.

use glam::{Vec3, Vec4};

/// Largest time step the integrator accepts.  Longer frames are clamped.
pub const MAX_STEP: f32 = 0.01;

/// Gravitational force applied to every body, independent of its mass.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Plane `N·P + D = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Default for GroundPlane {
    /// The `y = 0` floor.
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            offset: 0.0,
        }
    }
}

impl GroundPlane {
    /// Plane as a 4D vector `<N, D>`.
    #[inline]
    pub fn as_vec4(&self) -> Vec4 {
        self.normal.extend(self.offset)
    }

    /// Contact test for a sphere of `radius` centred at `center`.
    ///
    /// A sphere touching the plane satisfies `N·P + D = r`, i.e. `P` lies on
    /// the shifted plane `<N, D - r>`.  The test reports contact while
    /// `N·P + (D - r) < r`; equality counts as separated.
    pub fn is_colliding(&self, center: Vec3, radius: f32) -> bool {
        let shifted = self.offset - radius;
        self.normal.dot(center) + shifted < radius
    }
}

/// Point-mass state advanced by [`Body::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub force: Vec3,
    pub accel: Vec3,
    pub velocity: Vec3,
    pub prev_velocity: Vec3,
    pub mass: f32,
}

impl Body {
    /// A body at rest.
    pub fn at_rest(mass: f32) -> Self {
        Self {
            force: Vec3::ZERO,
            accel: Vec3::ZERO,
            velocity: Vec3::ZERO,
            prev_velocity: Vec3::ZERO,
            mass,
        }
    }

    /// Advances the body by one frame and returns the displacement to add
    /// to its position.
    ///
    /// `dt` is clamped to `[0, MAX_STEP]`.  `colliding` is the contact state
    /// at the start of the step.
    pub fn step(&mut self, dt: f32, colliding: bool) -> Vec3 {
        let dt = dt.clamp(0.0, MAX_STEP);

        self.force = GRAVITY;
        if colliding {
            self.force += -GRAVITY;
        }

        self.accel = self.force / self.mass;
        self.velocity = (self.prev_velocity + self.accel) * dt;
        self.prev_velocity = self.velocity;

        self.velocity * dt
    }
}
