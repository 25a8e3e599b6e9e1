/// Flat rectangle on the XZ plane at `y = 0`, centred at the origin.
///
/// Two counter-clockwise triangles, four `+Y` normals and texture
/// coordinates spanning the unit square.
use glam::{Vec2, Vec3};

use crate::mesh::MeshData;

pub fn quad(length: f32, breadth: f32) -> MeshData {
    let l = length / 2.0;
    let b = breadth / 2.0;

    MeshData {
        vertices: vec![
            Vec3::new(-l, 0.0, -b),
            Vec3::new(l, 0.0, -b),
            Vec3::new(-l, 0.0, b),
            Vec3::new(l, 0.0, b),
        ],
        indices: vec![0, 2, 3, 0, 3, 1],
        tex_coords: vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ],
        normals: vec![Vec3::Y; 4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_quad_is_exact() {
        let m = quad(2.0, 2.0);
        assert_eq!(
            m.vertices,
            vec![
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ]
        );
        assert_eq!(m.indices, vec![0, 2, 3, 0, 3, 1]);
        assert!(m.normals.iter().all(|n| *n == Vec3::Y));
        assert_eq!(m.tex_coords.len(), 4);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(quad(3.0, 5.0), quad(3.0, 5.0));
    }

    #[test]
    fn triangles_face_up() {
        let m = quad(2.0, 4.0);
        for tri in m.indices.chunks(3) {
            let a = m.vertices[tri[0] as usize];
            let b = m.vertices[tri[1] as usize];
            let c = m.vertices[tri[2] as usize];
            let n = (b - a).cross(c - a);
            assert!(n.y > 0.0, "triangle {tri:?} winds downwards");
        }
    }
}
