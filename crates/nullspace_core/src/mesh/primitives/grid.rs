/// Regular triangulated plane on an integer lattice centred at the origin.
///
/// Vertex `(x, z)` lives at index `x + z * x_dim`.  Every lattice square
/// contributes two triangles (6 indices).  Only four texture coordinates
/// are emitted; they are meant to be sampled modulo, not per vertex.
use glam::{Vec2, Vec3};

use crate::mesh::{MeshData, MeshError, MeshKind};

pub fn grid(x_dim: u32, z_dim: u32) -> Result<MeshData, MeshError> {
    if x_dim == 0 || z_dim == 0 || x_dim % 2 != 0 || z_dim % 2 != 0 {
        return Err(MeshError::InvalidGridDimensions { x_dim, z_dim });
    }

    let half_x = (x_dim / 2) as f32;
    let half_z = (z_dim / 2) as f32;

    let too_large = |what: &'static str| MeshError::TooLarge {
        kind: MeshKind::Grid,
        what,
    };
    let vertex_count = x_dim.checked_mul(z_dim).ok_or(too_large("vertex"))?;
    let index_count = (x_dim - 1)
        .checked_mul(z_dim - 1)
        .and_then(|squares| squares.checked_mul(6))
        .ok_or(too_large("index"))?;

    let mut vertices = vec![Vec3::ZERO; vertex_count as usize];
    for x in 0..x_dim {
        for z in 0..z_dim {
            vertices[(x + z * x_dim) as usize] =
                Vec3::new(x as f32 - half_x, 0.0, z as f32 - half_z);
        }
    }

    let mut indices = Vec::with_capacity(index_count as usize);
    for x in 0..x_dim - 1 {
        for z in 0..z_dim - 1 {
            let i = x + z * x_dim;
            indices.extend_from_slice(&[i, i + x_dim, i + x_dim + 1]);
            indices.extend_from_slice(&[i, i + x_dim + 1, i + 1]);
        }
    }

    let normals = vec![Vec3::Y; vertices.len()];

    Ok(MeshData {
        vertices,
        indices,
        tex_coords: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
        normals,
    })
}
