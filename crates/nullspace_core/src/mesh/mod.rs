//! Procedural mesh generation.
//!
//! [`generate`] turns a [`MeshCreateInfo`] into a [`MeshData`] holding plain
//! CPU arrays.  The renderer uploads those arrays once per [`MeshKind`] and
//! shares the result between every object of that kind.
//!
//! # Example
//! ```rust
//! use nullspace_core::mesh::{self, MeshCreateInfo};
//!
//! let quad = mesh::generate(&MeshCreateInfo::Quad { length: 2.0, breadth: 2.0 }).unwrap();
//! assert_eq!(quad.vertices.len(), 4);
//! assert_eq!(quad.indices, vec![0, 2, 3, 0, 3, 1]);
//! ```

mod error;
pub mod primitives;

pub use error::MeshError;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ─── Kind tag ──────────────────────────────────────────────────────────────

/// The closed set of generator kinds.
///
/// Used on its own as the key of the renderer's shared-buffer registry, so
/// that all instances of one kind map onto a single GPU allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    Quad,
    Grid,
    Disc,
    Sphere,
    Cube,
    Torus,
}

// ─── Creation parameters ───────────────────────────────────────────────────

/// Kind tag plus the size parameters that kind understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshCreateInfo {
    /// Rectangle on the XZ plane, centred at the origin.
    Quad { length: f32, breadth: f32 },
    /// Integer lattice of `x_dim * z_dim` points.  Both must be even.
    Grid { x_dim: u32, z_dim: u32 },
    /// Same output as [`MeshCreateInfo::Grid`]; there is no dedicated disc
    /// generator.
    Disc { x_dim: u32, z_dim: u32 },
    /// Paired latitude/longitude points, drawn as a line loop.
    Sphere {
        diameter: f32,
        latitudes: u32,
        longitudes: u32,
    },
    /// Eight corners at `±half_extents`.
    Cube { half_extents: Vec3 },
    /// Reserved; [`generate`] rejects it with [`MeshError::Unsupported`].
    Torus,
}

impl MeshCreateInfo {
    /// The generation kind tag of this request.
    pub fn kind(&self) -> MeshKind {
        match self {
            MeshCreateInfo::Quad { .. } => MeshKind::Quad,
            MeshCreateInfo::Grid { .. } => MeshKind::Grid,
            MeshCreateInfo::Disc { .. } => MeshKind::Disc,
            MeshCreateInfo::Sphere { .. } => MeshKind::Sphere,
            MeshCreateInfo::Cube { .. } => MeshKind::Cube,
            MeshCreateInfo::Torus => MeshKind::Torus,
        }
    }
}

// ─── Mesh data ─────────────────────────────────────────────────────────────

/// CPU-side mesh arrays.
///
/// `indices` empty means the mesh is drawn non-indexed, straight from the
/// vertex order.  `tex_coords` and `normals` are not guaranteed to be
/// per-vertex: the grid and cube builders emit a fixed set of four texture
/// coordinates, and the cube's normals follow its index count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    /// `true` when the mesh carries an index buffer.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of elements a draw call consumes: indices when indexed,
    /// vertices otherwise.
    #[inline]
    pub fn element_count(&self) -> u32 {
        if self.is_indexed() {
            self.indices.len() as u32
        } else {
            self.vertices.len() as u32
        }
    }

    /// Checks that every index addresses an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= vertex_count)
        {
            Some((position, &index)) => Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Total size in bytes of all four arrays as they will be uploaded.
    pub fn byte_size(&self) -> usize {
        self.vertices.len() * std::mem::size_of::<Vec3>()
            + self.indices.len() * std::mem::size_of::<u32>()
            + self.tex_coords.len() * std::mem::size_of::<Vec2>()
            + self.normals.len() * std::mem::size_of::<Vec3>()
    }

    fn log_summary(&self, kind: MeshKind) {
        let kib = |count: usize, size: usize| (count * size) as f32 / 1024.0;
        log::debug!(
            "{kind:?} mesh: {} vertices [{:.2} KiB], {} indices [{:.2} KiB], \
             {} tex-coords [{:.2} KiB], {} normals [{:.2} KiB]",
            self.vertices.len(),
            kib(self.vertices.len(), std::mem::size_of::<Vec3>()),
            self.indices.len(),
            kib(self.indices.len(), std::mem::size_of::<u32>()),
            self.tex_coords.len(),
            kib(self.tex_coords.len(), std::mem::size_of::<Vec2>()),
            self.normals.len(),
            kib(self.normals.len(), std::mem::size_of::<Vec3>()),
        );
    }
}

// ─── Entry point ───────────────────────────────────────────────────────────

/// Builds the arrays for `info`.
///
/// Fails for odd or empty grids, spheres without steps and for the torus,
/// which has no generator yet.
pub fn generate(info: &MeshCreateInfo) -> Result<MeshData, MeshError> {
    let kind = info.kind();
    log::debug!("preparing {kind:?} mesh");

    let mesh = match *info {
        MeshCreateInfo::Quad { length, breadth } => primitives::quad(length, breadth),
        MeshCreateInfo::Grid { x_dim, z_dim } | MeshCreateInfo::Disc { x_dim, z_dim } => {
            primitives::grid(x_dim, z_dim)?
        }
        MeshCreateInfo::Sphere {
            diameter,
            latitudes,
            longitudes,
        } => primitives::sphere(diameter, latitudes, longitudes)?,
        MeshCreateInfo::Cube { half_extents } => primitives::cube(half_extents),
        MeshCreateInfo::Torus => return Err(MeshError::Unsupported(MeshKind::Torus)),
    };

    mesh.log_summary(kind);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disc_is_an_alias_of_grid() {
        let grid = generate(&MeshCreateInfo::Grid { x_dim: 4, z_dim: 6 }).unwrap();
        let disc = generate(&MeshCreateInfo::Disc { x_dim: 4, z_dim: 6 }).unwrap();
        assert_eq!(grid, disc);
    }

    #[test]
    fn torus_is_rejected() {
        assert_eq!(
            generate(&MeshCreateInfo::Torus),
            Err(MeshError::Unsupported(MeshKind::Torus))
        );
    }

    #[test]
    fn kind_tags_match_variants() {
        assert_eq!(MeshCreateInfo::Torus.kind(), MeshKind::Torus);
        let cube = MeshCreateInfo::Cube { half_extents: Vec3::splat(0.5) };
        assert_eq!(cube.kind(), MeshKind::Cube);
        let disc = MeshCreateInfo::Disc { x_dim: 2, z_dim: 2 };
        assert_eq!(disc.kind(), MeshKind::Disc);
    }

    #[test]
    fn validate_reports_first_bad_index() {
        let mesh = MeshData {
            vertices: vec![Vec3::ZERO; 3],
            indices: vec![0, 1, 2, 3, 4],
            ..Default::default()
        };
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                index: 3,
                position: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn element_count_follows_index_presence() {
        let quad = generate(&MeshCreateInfo::Quad { length: 1.0, breadth: 1.0 }).unwrap();
        assert!(quad.is_indexed());
        assert_eq!(quad.element_count(), 6);

        let sphere = generate(&MeshCreateInfo::Sphere {
            diameter: 2.0,
            latitudes: 4,
            longitudes: 4,
        })
        .unwrap();
        assert!(!sphere.is_indexed());
        assert_eq!(sphere.element_count(), sphere.vertices.len() as u32);
    }

    #[test]
    fn byte_size_sums_all_arrays() {
        let quad = generate(&MeshCreateInfo::Quad { length: 1.0, breadth: 1.0 }).unwrap();
        // 4 * 12 + 6 * 4 + 4 * 8 + 4 * 12
        assert_eq!(quad.byte_size(), 48 + 24 + 32 + 48);
    }
}
