/// Wire sphere made of point pairs.
///
/// For every latitude step `u` and longitude step `t` two points are
/// emitted: one at `(t, u)` and one at `(t + Δt, u + Δu)`.  The result has
/// no indices and is drawn as a line loop over the raw vertex order, which
/// gives the characteristic spiral wireframe.
use glam::Vec3;

use crate::mesh::{MeshData, MeshError, MeshKind};

pub fn sphere(diameter: f32, latitudes: u32, longitudes: u32) -> Result<MeshData, MeshError> {
    if latitudes == 0 || longitudes == 0 {
        return Err(MeshError::InvalidSphereSteps {
            latitudes,
            longitudes,
        });
    }

    let radius = diameter / 2.0;
    let lat_step = 360.0 / latitudes as f32;
    let lon_step = 180.0 / longitudes as f32;

    let point = |t_deg: f32, u_deg: f32| {
        let (t, u) = (t_deg.to_radians(), u_deg.to_radians());
        Vec3::new(
            radius * t.sin() * u.sin(),
            radius * t.cos(),
            radius * t.sin() * u.cos(),
        )
    };

    let vertex_count = latitudes
        .checked_mul(longitudes)
        .and_then(|steps| steps.checked_mul(2))
        .ok_or(MeshError::TooLarge {
            kind: MeshKind::Sphere,
            what: "vertex",
        })?;

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for lat in 0..latitudes {
        let u = lat as f32 * lat_step;
        for lon in 0..longitudes {
            let t = lon as f32 * lon_step;
            vertices.push(point(t, u));
            vertices.push(point(t + lon_step, u + lat_step));
        }
    }

    Ok(MeshData {
        vertices,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_two_points_per_step() {
        let m = sphere(2.0, 32, 32).unwrap();
        assert_eq!(m.vertices.len(), 2 * 32 * 32);
        assert!(m.indices.is_empty());
        assert!(m.normals.is_empty());
        assert!(m.tex_coords.is_empty());
    }

    #[test]
    fn every_point_lies_on_the_surface() {
        let m = sphere(3.0, 12, 8).unwrap();
        for v in &m.vertices {
            assert!((v.length() - 1.5).abs() < 1e-4, "{v} is off the sphere");
        }
    }

    #[test]
    fn starts_at_the_north_pole() {
        let m = sphere(2.0, 4, 4).unwrap();
        assert!((m.vertices[0] - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn oversized_step_counts_are_rejected() {
        assert!(matches!(
            sphere(2.0, u32::MAX, 2),
            Err(MeshError::TooLarge {
                kind: MeshKind::Sphere,
                ..
            })
        ));
        assert!(matches!(
            sphere(2.0, 65536, 32768),
            Err(MeshError::TooLarge { .. })
        ));
    }

    #[test]
    fn zero_steps_are_rejected() {
        assert!(matches!(
            sphere(2.0, 0, 8),
            Err(MeshError::InvalidSphereSteps { .. })
        ));
    }
}
