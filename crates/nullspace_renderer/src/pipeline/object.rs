//! Render pipelines for scene objects, one per [`DrawStyle`].
//!
//! Holding an `ObjectPipelines` value is what makes drawing possible: the
//! shader is compiled and linked when this is built, so draw code never has
//! to check for a valid program.

use nullspace_core::DrawStyle;

use crate::resources::DepthTarget;
use crate::vertex;

pub struct ObjectPipelines {
    pub lit: wgpu::RenderPipeline,
    pub wire: wgpu::RenderPipeline,
}

impl ObjectPipelines {
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        object_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("../../shaders/object.wgsl"));

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Object Pipeline Layout"),
            bind_group_layouts: &[object_layout],
            push_constant_ranges: &[],
        });

        let lit = build(
            device,
            &layout,
            &shader,
            target_format,
            Stage {
                label: "Object Lit Pipeline",
                vs: "vs_lit",
                fs: "fs_lit",
                buffers: &[vertex::position_layout(), vertex::normal_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        let wire = build(
            device,
            &layout,
            &shader,
            target_format,
            Stage {
                label: "Object Wire Pipeline",
                vs: "vs_wire",
                fs: "fs_wire",
                buffers: &[vertex::position_layout()],
                topology: wgpu::PrimitiveTopology::LineStrip,
            },
        );

        Self { lit, wire }
    }

    pub fn for_style(&self, style: DrawStyle) -> &wgpu::RenderPipeline {
        match style {
            DrawStyle::LitTriangles => &self.lit,
            DrawStyle::WireLoop => &self.wire,
        }
    }
}

struct Stage<'a> {
    label: &'a str,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
}

fn build(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    target_format: wgpu::TextureFormat,
    stage: Stage<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(stage.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(stage.vs),
            buffers: stage.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(stage.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: stage.topology,
            front_face: wgpu::FrontFace::Ccw,
            // the cube index order mixes windings
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthTarget::FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
