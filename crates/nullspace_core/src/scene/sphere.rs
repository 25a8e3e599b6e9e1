use glam::{Mat4, Vec3};

use super::{DrawStyle, SceneObject};
use crate::mesh::MeshCreateInfo;
use crate::physics::{Body, GroundPlane};

/// Wireframe sphere that falls under gravity onto a [`GroundPlane`].
#[derive(Debug, Clone)]
pub struct Sphere {
    position: Vec3,
    model: Mat4,
    radius: f32,
    body: Body,
    ground: GroundPlane,
}

impl Sphere {
    pub const MASS: f32 = 0.01;
    pub const RADIUS: f32 = 1.0;

    pub fn new() -> Self {
        Self::on(GroundPlane::default())
    }

    /// A sphere that collides with `ground` instead of the `y = 0` floor.
    pub fn on(ground: GroundPlane) -> Self {
        Self {
            position: Vec3::ZERO,
            model: Mat4::IDENTITY,
            radius: Self::RADIUS,
            body: Body::at_rest(Self::MASS),
            ground,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_colliding(&self) -> bool {
        self.ground.is_colliding(self.position, self.radius)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneObject for Sphere {
    fn name(&self) -> &'static str {
        "sphere"
    }

    fn mesh_info(&self) -> MeshCreateInfo {
        MeshCreateInfo::Sphere {
            diameter: self.radius * 2.0,
            latitudes: 32,
            longitudes: 32,
        }
    }

    fn draw_style(&self) -> DrawStyle {
        DrawStyle::WireLoop
    }

    fn setup(&mut self, position: Vec3) {
        self.position = position;
        self.body = Body::at_rest(Self::MASS);
        self.model = Mat4::from_translation(position);
    }

    fn update(&mut self, dt: f32) {
        let colliding = self.is_colliding();
        self.position += self.body.step(dt, colliding);
        self.model = Mat4::from_translation(self.position);
    }

    fn model_matrix(&self) -> Mat4 {
        self.model
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_while_airborne() {
        let mut s = Sphere::new();
        s.setup(Vec3::new(0.0, 5.0, 0.0));
        s.update(0.01);
        assert!(s.position().y < 5.0);
        assert!(s.body().velocity.y < 0.0);
    }

    #[test]
    fn settles_just_below_contact_height() {
        let mut s = Sphere::new();
        s.setup(Vec3::new(1.0, 5.0, -1.0));
        for _ in 0..500 {
            s.update(0.01);
        }
        let y = s.position().y;
        assert!(y > 1.9 && y < 2.0, "resting height {y}");
        assert!(s.is_colliding());
        assert!(s.body().velocity.length() < 1e-6);
        assert_eq!((s.position().x, s.position().z), (1.0, -1.0));
    }

    #[test]
    fn long_frames_move_like_max_step() {
        let mut a = Sphere::new();
        let mut b = Sphere::new();
        a.setup(Vec3::new(0.0, 5.0, 0.0));
        b.setup(Vec3::new(0.0, 5.0, 0.0));
        a.update(0.25);
        b.update(0.01);
        assert_eq!(a.position(), b.position());
    }

    #[test]
    fn raised_ground() {
        // plane y = 3  <=>  N·P - 3 = 0
        let mut s = Sphere::on(GroundPlane {
            normal: Vec3::Y,
            offset: -3.0,
        });
        s.setup(Vec3::new(0.0, 4.5, 0.0));
        assert!(s.is_colliding());
        s.update(0.01);
        assert_eq!(s.position().y, 4.5);
    }

    #[test]
    fn mesh_and_style() {
        let s = Sphere::new();
        assert_eq!(
            s.mesh_info(),
            MeshCreateInfo::Sphere {
                diameter: 2.0,
                latitudes: 32,
                longitudes: 32
            }
        );
        assert_eq!(s.draw_style(), DrawStyle::WireLoop);
    }
}
