//! Renderable scene objects.
//!
//! Every object implements [`SceneObject`]: it names the mesh it needs
//! (the renderer shares one GPU buffer set per [`MeshKind`]), how that mesh
//! is drawn, and advances its own state once per frame.
//!
//! [`MeshKind`]: crate::mesh::MeshKind

mod cube;
mod object;
mod sphere;

pub use cube::Cube;
pub use object::{DrawStyle, SceneObject};
pub use sphere::Sphere;
