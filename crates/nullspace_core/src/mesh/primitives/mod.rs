//! Builders for each [`MeshKind`](super::MeshKind).  Callers normally go
//! through [`generate`](super::generate); the builders are public so tools
//! can skip the kind dispatch.

pub mod cube;
pub mod grid;
pub mod quad;
pub mod sphere;

pub use cube::cube;
pub use grid::grid;
pub use quad::quad;
pub use sphere::sphere;
