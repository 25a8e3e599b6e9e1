use glam::{Mat4, Vec3};

use super::{DrawStyle, SceneObject};
use crate::mesh::MeshCreateInfo;

/// Unit cube bobbing on `y = sin(t) + 1`.
///
/// `t` is this cube's own accumulated time, so two cubes spawned on
/// different frames bob out of step.
#[derive(Debug, Clone, Default)]
pub struct Cube {
    position: Vec3,
    model: Mat4,
    t: f32,
}

impl Cube {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the bobbing clock at `phase` seconds instead of zero.
    pub fn with_phase(phase: f32) -> Self {
        Self {
            t: phase,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.t
    }
}

impl SceneObject for Cube {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn mesh_info(&self) -> MeshCreateInfo {
        MeshCreateInfo::Cube {
            half_extents: Vec3::splat(0.5),
        }
    }

    fn draw_style(&self) -> DrawStyle {
        DrawStyle::LitTriangles
    }

    fn setup(&mut self, position: Vec3) {
        self.position = position;
        self.model = Mat4::from_translation(position);
    }

    fn update(&mut self, dt: f32) {
        self.t += dt;
        self.position.y = self.t.sin() + 1.0;
        self.model = Mat4::from_translation(self.position);
    }

    fn model_matrix(&self) -> Mat4 {
        self.model
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
