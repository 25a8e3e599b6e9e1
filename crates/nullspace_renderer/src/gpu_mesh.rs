//! GPU-resident buffer set for one mesh kind, and the wgpu allocator that
//! creates it.

use std::sync::Arc;

use nullspace_core::mesh::{MeshData, MeshKind};

use crate::error::RenderError;
use crate::registry::BufferAllocator;
use crate::resources::buffer;

/// Buffers shared by every instance of one [`MeshKind`].
///
/// An absent buffer means the generator produced no data for that array.
/// Non-indexed meshes get their first vertex appended once more at the end
/// of `positions`, so a line strip over `loop_count` vertices closes the
/// loop.
#[derive(Debug)]
pub struct GpuMesh {
    pub positions: Option<wgpu::Buffer>,
    pub indices: Option<wgpu::Buffer>,
    pub tex_coords: Option<wgpu::Buffer>,
    pub normals: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
    pub loop_count: u32,
}

/// Creates real wgpu buffers and reports device-side failures as
/// [`RenderError::Upload`].
pub struct WgpuAllocator {
    device: Arc<wgpu::Device>,
}

impl WgpuAllocator {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self { device }
    }
}

impl BufferAllocator for WgpuAllocator {
    type Buffers = GpuMesh;

    fn upload(&mut self, kind: MeshKind, mesh: &MeshData) -> Result<GpuMesh, RenderError> {
        let device = &self.device;
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let label = |what: &str| format!("{kind:?} {what}");

        let positions = if mesh.is_indexed() {
            buffer::create_vertex(device, &label("positions"), &mesh.vertices)
        } else {
            let closed: Vec<_> = mesh.vertices.iter().chain(mesh.vertices.first()).copied().collect();
            buffer::create_vertex(device, &label("positions"), &closed)
        };
        let indices = buffer::create_index(device, &label("indices"), &mesh.indices);
        let tex_coords = buffer::create_vertex(device, &label("tex-coords"), &mesh.tex_coords);
        let normals = buffer::create_vertex(device, &label("normals"), &mesh.normals);

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            return Err(RenderError::Upload {
                kind,
                reason: err.to_string(),
            });
        }

        let vertex_count = mesh.vertices.len() as u32;
        Ok(GpuMesh {
            positions,
            indices,
            tex_coords,
            normals,
            vertex_count,
            index_count: mesh.indices.len() as u32,
            loop_count: if mesh.is_indexed() || vertex_count == 0 {
                vertex_count
            } else {
                vertex_count + 1
            },
        })
    }

    fn free(&mut self, kind: MeshKind, buffers: GpuMesh) {
        log::trace!("destroying {kind:?} buffers");
        for buf in [buffers.positions, buffers.indices, buffers.tex_coords, buffers.normals]
            .into_iter()
            .flatten()
        {
            buf.destroy();
        }
    }
}
