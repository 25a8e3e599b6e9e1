//! Bind-group layouts shared between pipelines and the buffers bound to
//! them.

use crate::resources::ObjectUniform;

pub struct PipelineLayouts {
    /// group(0) of the grid pipeline: one `view_proj` uniform.
    pub camera: wgpu::BindGroupLayout,
    /// group(0) of the object pipelines: an [`ObjectUniform`] slot selected
    /// by dynamic offset.
    pub object: wgpu::BindGroupLayout,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let camera = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Layout: Camera"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(64),
                },
                count: None,
            }],
        });

        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Layout: Object (dynamic)"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(ObjectUniform::SIZE),
                },
                count: None,
            }],
        });

        Self { camera, object }
    }
}
