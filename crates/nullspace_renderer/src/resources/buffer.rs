//! Thin wrappers over `wgpu::Buffer` creation.

use wgpu::util::DeviceExt;

/// Uniform buffer initialised with `data`, writable every frame.
pub fn create_uniform<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &T,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Static vertex-attribute buffer.  Empty slices yield `None`: the attribute
/// is simply absent for that mesh.
pub fn create_vertex<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> Option<wgpu::Buffer> {
    create_static(device, label, bytemuck::cast_slice(data), wgpu::BufferUsages::VERTEX)
}

/// Static `u32` index buffer, `None` for non-indexed meshes.
pub fn create_index(device: &wgpu::Device, label: &str, data: &[u32]) -> Option<wgpu::Buffer> {
    create_static(device, label, bytemuck::cast_slice(data), wgpu::BufferUsages::INDEX)
}

/// Overwrites `buffer` from offset 0.
pub fn update_uniform<T: bytemuck::Pod>(queue: &wgpu::Queue, buffer: &wgpu::Buffer, data: &T) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(data));
}

fn create_static(
    device: &wgpu::Device,
    label: &str,
    contents: &[u8],
    usage: wgpu::BufferUsages,
) -> Option<wgpu::Buffer> {
    if contents.is_empty() {
        return None;
    }
    Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage,
    }))
}
