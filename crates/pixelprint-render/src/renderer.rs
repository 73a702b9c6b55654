//! GPU side of the overlay: atlas texture, point-sampled pipeline and the
//! dynamic mesh buffers.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use pixelprint_core::profiling::profile_scope;
use pixelprint_core::{GlyphAtlas, OverlayMesh};

use crate::GraphicsContext;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct OverlayVertex {
    position: [f32; 2],
    tex_coords: [f32; 2],
}

impl OverlayVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct OverlayUniform {
    clip: [[f32; 4]; 4],
}

/// Vertex or index buffer that is recreated larger when it runs out of room.
struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    const MIN_CAPACITY: u64 = 4096;

    fn new(device: &wgpu::Device, label: String, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let buffer = Self::allocate(device, &label, Self::MIN_CAPACITY, usage);
        Self {
            buffer,
            capacity: Self::MIN_CAPACITY,
            usage,
            label,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, size: u64, usage: wgpu::BufferUsages) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, context: &GraphicsContext, data: &[u8]) {
        let needed = data.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            tracing::debug!("Growing {} to {} bytes", self.label, self.capacity);
            self.buffer = Self::allocate(context.device(), &self.label, self.capacity, self.usage);
        }

        if !data.is_empty() {
            context.queue().write_buffer(&self.buffer, 0, data);
        }
    }
}

/// Draws an [`OverlayMesh`] with the embedded glyph atlas.
pub struct OverlayRenderer {
    context: Arc<GraphicsContext>,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: DynamicBuffer,
    index_buffer: DynamicBuffer,
    index_count: u32,
    /// `(mesh id, revision)` currently on the GPU.
    uploaded: Option<(u64, u64)>,
}

impl OverlayRenderer {
    /// Upload the atlas and build the pipeline for `target_format`.
    pub fn new(
        context: Arc<GraphicsContext>,
        atlas: &GlyphAtlas,
        target_format: wgpu::TextureFormat,
        label: &str,
    ) -> Self {
        let device = context.device();

        let size = wgpu::Extent3d {
            width: atlas.width(),
            height: atlas.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(format!("{label} Atlas").as_str()),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        context.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            atlas.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(atlas.width() * 4),
                rows_per_image: Some(atlas.height()),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Point sampling keeps glyph edges crisp at every integer scale.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(format!("{label} Sampler").as_str()),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(format!("{label} Uniform Buffer").as_str()),
            size: std::mem::size_of::<OverlayUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(format!("{label} Bind Group Layout").as_str()),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(format!("{label} Bind Group").as_str()),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(format!("{label} Shader").as_str()),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(format!("{label} Pipeline Layout").as_str()),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(format!("{label} Pipeline").as_str()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[OverlayVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // The overlay always wins: no depth test.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = DynamicBuffer::new(
            device,
            format!("{label} Vertex Buffer"),
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = DynamicBuffer::new(
            device,
            format!("{label} Index Buffer"),
            wgpu::BufferUsages::INDEX,
        );

        Self {
            context,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            index_count: 0,
            uploaded: None,
        }
    }

    /// Upload `mesh` if it is a different mesh or changed since the last upload.
    ///
    /// Returns `true` when buffers were written.
    pub fn prepare(&mut self, mesh: &OverlayMesh) -> bool {
        let key = (mesh.id(), mesh.revision());
        if self.uploaded == Some(key) {
            return false;
        }

        profile_scope!("overlay_renderer_prepare");

        let vertices: Vec<OverlayVertex> = mesh
            .vertices()
            .iter()
            .zip(mesh.uvs())
            .map(|(position, uv)| OverlayVertex {
                position: position.to_array(),
                tex_coords: uv.to_array(),
            })
            .collect();

        self.vertex_buffer
            .write(&self.context, bytemuck::cast_slice(&vertices));
        self.index_buffer
            .write(&self.context, bytemuck::cast_slice(mesh.indices()));

        tracing::trace!(
            "Uploaded overlay mesh {} revision {}",
            mesh.id(),
            mesh.revision()
        );

        self.index_count = mesh.indices().len() as u32;
        self.uploaded = Some(key);
        true
    }

    /// Set the overlay-to-clip matrix used by the next draw.
    pub fn set_clip_matrix(&self, clip: Mat4) {
        let uniform = OverlayUniform {
            clip: clip.to_cols_array_2d(),
        };
        self.context
            .queue()
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Record the single draw of the uploaded mesh.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }

        pass.push_debug_group("OverlayRenderer::render");
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
        pass.pop_debug_group();
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_layouts() {
        assert_eq!(std::mem::size_of::<OverlayVertex>(), 16);
        assert_eq!(std::mem::size_of::<OverlayUniform>(), 64);
        assert_eq!(OverlayVertex::desc().array_stride, 16);
    }
}
