//! Dynamic uniform buffer holding one [`ObjectUniform`] per draw.
//!
//! All per-object transforms for a frame live in a single buffer.  The
//! render pass binds it once per draw with a different dynamic offset, so
//! the bind group never changes between draw calls.
//!
//! Each slot is `align_up(size_of::<ObjectUniform>(), alignment)` bytes,
//! where `alignment` is the device's `min_uniform_buffer_offset_alignment`.

use glam::{Mat4, Vec4};

/// Per-draw shader constants (`ObjectUniform` in `object.wgsl`).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// `projection * view * model`.
    pub mvp: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, padded to 4x4.
    pub normal: [[f32; 4]; 4],
    /// Linear RGBA base color.
    pub color: [f32; 4],
}

impl ObjectUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(mvp: Mat4, normal: Mat4, color: Vec4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            color: color.to_array(),
        }
    }
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE)
    }
}

/// Growable GPU buffer of aligned [`ObjectUniform`] slots.
pub struct ObjectBuffer {
    pub buffer: wgpu::Buffer,
    /// Binds one slot; the dynamic offset selects which.
    pub bind_group: wgpu::BindGroup,
    /// Byte distance between consecutive slots.
    pub stride: u32,
    capacity: usize,
    staging: Vec<u8>,
}

impl ObjectBuffer {
    /// `layout` must be the object layout with `has_dynamic_offset: true`.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        initial_capacity: usize,
    ) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let stride = align_up(ObjectUniform::SIZE as u32, alignment);

        let capacity = initial_capacity.max(1);
        let buffer = Self::create_buffer(device, capacity, stride);
        let bind_group = Self::create_bind_group(device, layout, &buffer);

        Self {
            buffer,
            bind_group,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    #[inline]
    pub fn offset(&self, index: usize) -> u32 {
        (index as u32).wrapping_mul(self.stride)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Grows (doubling) until `needed` slots fit.  The bind group is
    /// recreated along with the buffer.
    pub fn ensure_capacity(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        needed: usize,
    ) {
        if needed <= self.capacity {
            return;
        }
        let mut new_cap = self.capacity;
        while new_cap < needed {
            new_cap *= 2;
        }
        log::debug!("object buffer grows {} -> {new_cap} slots", self.capacity);

        self.buffer = Self::create_buffer(device, new_cap, self.stride);
        self.bind_group = Self::create_bind_group(device, layout, &self.buffer);
        self.capacity = new_cap;
    }

    /// Packs `uniforms` into slots `0..uniforms.len()` with a single queue
    /// write.  Callers run [`ObjectBuffer::ensure_capacity`] first.
    pub fn write_all(&mut self, queue: &wgpu::Queue, uniforms: &[ObjectUniform]) {
        if uniforms.is_empty() {
            return;
        }
        debug_assert!(uniforms.len() <= self.capacity, "object buffer slot out of range");

        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(uniforms.len() * stride, 0);
        for (slot, uniform) in self.staging.chunks_exact_mut(stride).zip(uniforms) {
            slot[..ObjectUniform::SIZE as usize].copy_from_slice(bytemuck::bytes_of(uniform));
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }

    fn create_buffer(device: &wgpu::Device, capacity: usize, stride: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: capacity as u64 * stride as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(ObjectUniform::SIZE),
                }),
            }],
        })
    }
}

/// Rounds `value` up to a multiple of `alignment` (a power of two).
#[inline]
pub(crate) fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_shader_layout() {
        // two mat4x4<f32> + vec4<f32>
        assert_eq!(ObjectUniform::SIZE, 64 + 64 + 16);
    }

    #[test]
    fn stride_alignment() {
        assert_eq!(align_up(144, 256), 256);
        assert_eq!(align_up(144, 64), 192);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(1, 4), 4);
    }

    #[test]
    fn uniform_is_column_major() {
        let mvp = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let u = ObjectUniform::new(mvp, Mat4::IDENTITY, Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(u.mvp[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.color, [0.5, 0.5, 0.5, 1.0]);
    }
}
