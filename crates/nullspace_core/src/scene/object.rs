use glam::{Mat4, Vec3};

use crate::mesh::MeshCreateInfo;

/// How an object's shared mesh is rasterised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStyle {
    /// Filled triangles with per-vertex normals and directional lighting.
    LitTriangles,
    /// Unlit line strip over the raw vertex order, closed back onto the
    /// first vertex.
    WireLoop,
}

/// Behaviour shared by everything the scene can spawn.
///
/// The lifecycle is `setup` once, then `update` every frame.  Releasing the
/// shared mesh on despawn is the scene's job, not the object's.
pub trait SceneObject {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Generation parameters of the mesh every instance of this type shares.
    fn mesh_info(&self) -> MeshCreateInfo;

    fn draw_style(&self) -> DrawStyle;

    /// Places the object at `position`.
    fn setup(&mut self, position: Vec3);

    /// Advances the object by `dt` seconds and refreshes its model matrix.
    fn update(&mut self, dt: f32);

    fn model_matrix(&self) -> Mat4;

    fn position(&self) -> Vec3;
}
