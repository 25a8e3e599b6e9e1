//! Reference grid drawn under the scene: a lattice of unit lines on
//! `y = 0`, a white border around it and the three colored world axes.

use glam::{Mat4, Vec3};

use crate::resources::buffer;
use crate::vertex::ColorVertex;

/// Half-extent of the grid in world units.
pub const GRID_HALF_EXTENT: i32 = 8;

const GRID_COLOR: Vec3 = Vec3::ZERO;
const BORDER_COLOR: Vec3 = Vec3::ONE;

/// Line-list vertices for a grid spanning `-half..half` on X and Z.
///
/// Order: lattice lines, then the four border edges, then the X (red),
/// Y (green) and Z (blue) axes.
pub fn grid_lines(half: i32) -> Vec<ColorVertex> {
    let h = half as f32;
    let mut out = Vec::with_capacity(grid_vertex_count(half));
    let mut line = |a: Vec3, b: Vec3, color: Vec3| {
        out.push(ColorVertex::new(a, color));
        out.push(ColorVertex::new(b, color));
    };

    for i in -half..half {
        let i = i as f32;
        line(Vec3::new(-h, 0.0, i), Vec3::new(h, 0.0, i), GRID_COLOR);
        line(Vec3::new(i, 0.0, -h), Vec3::new(i, 0.0, h), GRID_COLOR);
    }

    let corners = [
        Vec3::new(-h, 0.0, -h),
        Vec3::new(-h, 0.0, h),
        Vec3::new(h, 0.0, h),
        Vec3::new(h, 0.0, -h),
    ];
    for (i, &a) in corners.iter().enumerate() {
        line(a, corners[(i + 1) % corners.len()], BORDER_COLOR);
    }

    line(Vec3::new(-h, 0.0, 0.0), Vec3::new(h, 0.0, 0.0), Vec3::X);
    line(Vec3::new(0.0, h, 0.0), Vec3::ZERO, Vec3::Y);
    line(Vec3::new(0.0, 0.0, -h), Vec3::new(0.0, 0.0, h), Vec3::Z);

    out
}

/// `8 * half` lattice vertices, 8 border and 6 axis vertices.
pub fn grid_vertex_count(half: i32) -> usize {
    (half.max(0) as usize) * 8 + 8 + 6
}

/// GPU side of the grid: its vertex buffer plus the camera uniform it is
/// drawn with.
pub struct ReferenceGrid {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
}

impl ReferenceGrid {
    pub fn new(device: &wgpu::Device, camera_layout: &wgpu::BindGroupLayout) -> Self {
        let lines = grid_lines(GRID_HALF_EXTENT);
        let vertex_count = lines.len() as u32;
        let vertices = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Reference Grid Vertices"),
                contents: bytemuck::cast_slice(&lines),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let camera_buffer = buffer::create_uniform(
            device,
            "Grid Camera Uniform",
            &Mat4::IDENTITY.to_cols_array_2d(),
        );
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Camera Bind Group"),
            layout: camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Self {
            vertices,
            vertex_count,
            camera_buffer,
            camera_bind_group,
        }
    }

    /// Uploads this frame's `projection * view`.
    pub fn sync(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        buffer::update_uniform(queue, &self.camera_buffer, &view_proj.to_cols_array_2d());
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_for_default_size() {
        let lines = grid_lines(GRID_HALF_EXTENT);
        assert_eq!(lines.len(), 78);
        assert_eq!(lines.len(), grid_vertex_count(GRID_HALF_EXTENT));
        assert_eq!(lines.len() % 2, 0);
    }

    #[test]
    fn lattice_lies_on_the_floor() {
        let lines = grid_lines(4);
        assert!(lines[..32].iter().all(|v| v.position[1] == 0.0));
        assert!(lines[..32].iter().all(|v| v.color == [0.0; 3]));
    }

    #[test]
    fn border_is_a_closed_square() {
        let lines = grid_lines(2);
        let border = &lines[16..24];
        assert!(border.iter().all(|v| v.color == [1.0; 3]));
        // each edge ends where the next begins
        for edge in 0..4 {
            let end = border[edge * 2 + 1].position;
            let next_start = border[((edge + 1) % 4) * 2].position;
            assert_eq!(end, next_start);
        }
        // all four corners are distinct
        let mut corners: Vec<_> = border.iter().step_by(2).map(|v| v.position).collect();
        corners.dedup();
        assert_eq!(corners.len(), 4);
    }

    #[test]
    fn axes_are_rgb() {
        let lines = grid_lines(8);
        let axes = &lines[lines.len() - 6..];
        assert_eq!(axes[0].color, [1.0, 0.0, 0.0]);
        assert_eq!(axes[2].color, [0.0, 1.0, 0.0]);
        assert_eq!(axes[4].color, [0.0, 0.0, 1.0]);
        assert_eq!(axes[2].position, [0.0, 8.0, 0.0]);
    }
}
