//! `nullspace_renderer` — wgpu back end for the Nullspace sandbox.
//!
//! # Module layout
//!
//! | Module      | Responsibility                                            |
//! |-------------|-----------------------------------------------------------|
//! | `context`   | Adapter / device bootstrap (`EngineContext`)              |
//! | `registry`  | Ref-counted per-mesh-kind buffer sets (`BufferRegistry`)  |
//! | `gpu_mesh`  | `GpuMesh` and the wgpu `BufferAllocator`                  |
//! | `scene`     | Live objects, spawn/despawn, per-frame `DrawItem`s        |
//! | `pipeline`  | Bind-group layouts, object and grid pipelines             |
//! | `resources` | Buffer helpers, dynamic object uniforms, depth target     |
//! | `grid`      | Reference grid overlay                                    |
//! | `vertex`    | Vertex buffer layouts                                     |

pub mod context;
pub mod error;
pub mod gpu_mesh;
pub mod grid;
pub mod pipeline;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod vertex;

pub use context::{ContextError, EngineContext};
pub use error::RenderError;
pub use gpu_mesh::{GpuMesh, WgpuAllocator};
pub use registry::{BufferAllocator, BufferRegistry};
pub use scene::{DrawItem, ObjectId, Scene};

use glam::{Mat4, Vec4};
use nullspace_core::{DrawStyle, SceneObject};

use grid::ReferenceGrid;
use pipeline::{GridPipeline, ObjectPipelines, PipelineLayouts};
use resources::{DepthTarget, ObjectBuffer, ObjectUniform};

/// Look of the frame that is not tied to any object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub clear_color: wgpu::Color,
    pub show_grid: bool,
    /// Base color of lit triangle meshes.
    pub solid_color: Vec4,
    /// Color of wire line loops.
    pub wire_color: Vec4,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.0,
            },
            show_grid: true,
            solid_color: Vec4::new(0.85, 0.55, 0.25, 1.0),
            wire_color: Vec4::new(1.0, 1.0, 0.0, 1.0),
        }
    }
}

/// Top-level renderer: owns the scene, its shared buffers and every
/// pipeline, and records one render pass per frame.
pub struct Renderer {
    pub context: EngineContext,
    pub style: RenderStyle,
    scene: Scene<WgpuAllocator>,
    layouts: PipelineLayouts,
    objects: ObjectPipelines,
    object_buffer: ObjectBuffer,
    grid_pipeline: GridPipeline,
    grid: ReferenceGrid,
    depth: DepthTarget,
    uniforms: Vec<ObjectUniform>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(
        context: EngineContext,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        style: RenderStyle,
    ) -> Self {
        let device = &context.device;

        let layouts = PipelineLayouts::new(device);
        let objects = ObjectPipelines::new(device, format, &layouts.object);
        let grid_pipeline = GridPipeline::new(device, format, &layouts.camera);
        let object_buffer = ObjectBuffer::new(device, &layouts.object, 64);
        let grid = ReferenceGrid::new(device, &layouts.camera);
        let depth = DepthTarget::new(device, width, height);
        let scene = Scene::new(WgpuAllocator::new(context.device.clone()));

        Self {
            context,
            style,
            scene,
            layouts,
            objects,
            object_buffer,
            grid_pipeline,
            grid,
            depth,
            uniforms: Vec::new(),
            width,
            height,
        }
    }

    // ── Scene ────────────────────────────────────────────────────────────────

    /// Sets `object` up at `position` and uploads its mesh kind if this is
    /// the first live instance.
    pub fn spawn<O>(&mut self, object: O, position: glam::Vec3) -> Result<ObjectId, RenderError>
    where
        O: SceneObject + 'static,
    {
        self.scene.spawn(object, position)
    }

    pub fn despawn(&mut self, id: ObjectId) -> bool {
        self.scene.despawn(id)
    }

    /// Steps every object by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.scene.update(dt);
    }

    pub fn scene(&self) -> &Scene<WgpuAllocator> {
        &self.scene
    }

    /// Despawns every object; all shared buffers are freed.
    pub fn teardown(&mut self) {
        self.scene.teardown();
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    pub fn begin_frame(&self) -> wgpu::CommandEncoder {
        self.context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    /// Clears `target`, draws the grid and then every object.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        view: Mat4,
        proj: Mat4,
    ) {
        let items = self.scene.draw_list(view, proj);

        self.uniforms.clear();
        self.uniforms.extend(items.iter().map(|item| {
            let color = match item.style {
                DrawStyle::LitTriangles => self.style.solid_color,
                DrawStyle::WireLoop => self.style.wire_color,
            };
            ObjectUniform::new(item.mvp, item.normal, color)
        }));
        self.object_buffer
            .ensure_capacity(&self.context.device, &self.layouts.object, items.len());
        self.object_buffer.write_all(&self.context.queue, &self.uniforms);

        if self.style.show_grid {
            self.grid.sync(&self.context.queue, proj * view);
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.style.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if self.style.show_grid {
            pass.set_pipeline(&self.grid_pipeline.inner);
            self.grid.draw(&mut pass);
        }

        for (slot, item) in items.iter().enumerate() {
            let Some(mesh) = self.scene.registry().get(item.kind) else {
                continue;
            };
            let Some(positions) = &mesh.positions else {
                continue;
            };

            pass.set_pipeline(self.objects.for_style(item.style));
            pass.set_bind_group(0, &self.object_buffer.bind_group, &[self.object_buffer.offset(slot)]);
            pass.set_vertex_buffer(0, positions.slice(..));

            match item.style {
                DrawStyle::LitTriangles => {
                    let Some(normals) = &mesh.normals else {
                        log::warn!("{:?} has no normals; skipping lit draw", item.kind);
                        continue;
                    };
                    pass.set_vertex_buffer(1, normals.slice(..));
                    match &mesh.indices {
                        Some(indices) => {
                            pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                        }
                        None => pass.draw(0..mesh.vertex_count, 0..1),
                    }
                }
                DrawStyle::WireLoop => match &mesh.indices {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                    }
                    None => pass.draw(0..mesh.loop_count, 0..1),
                },
            }
        }
    }

    /// Recreates the depth target when the window changes size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.depth.resize(&self.context.device, width, height);
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
