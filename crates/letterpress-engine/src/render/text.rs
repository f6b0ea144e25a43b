use crate::coords::Viewport;
use crate::paint::Color;
use crate::text::{GlyphBitmap, GlyphQuad, GlyphSink, GlyphTextures, TextError};

use super::common::{premul_alpha_blend, text_ubo_min_binding_size, TextUniform, TextVertex};
use super::{RenderCtx, RenderTarget};

// ── glyph textures ────────────────────────────────────────────────────────

/// A glyph bitmap resident on the GPU, bound and ready to sample.
///
/// The bind group owns the texture view. The texture is freed once neither
/// this glyph nor a queued [`GlyphBatch`] draw still holds the bind group.
#[derive(Debug)]
pub struct GpuGlyph {
    bind_group: wgpu::BindGroup,
}

/// [`GlyphTextures`] backed by wgpu: one `R8Unorm` texture and bind group per glyph.
pub struct WgpuGlyphTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl GlyphTextures for WgpuGlyphTextures {
    type Texture = GpuGlyph;

    fn create(&mut self, bitmap: &GlyphBitmap) -> Result<GpuGlyph, TextError> {
        if bitmap.width == 0 || bitmap.height == 0 {
            return Err(TextError::EmptyBitmap);
        }
        let max = self.device.limits().max_texture_dimension_2d;
        if bitmap.width > max || bitmap.height > max {
            return Err(TextError::Upload(format!(
                "{}x{} exceeds the {max}px texture limit",
                bitmap.width, bitmap.height
            )));
        }

        let size = wgpu::Extent3d {
            width: bitmap.width,
            height: bitmap.height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("letterpress glyph texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bitmap.width),
                rows_per_image: Some(bitmap.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("letterpress glyph bind group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        Ok(GpuGlyph { bind_group })
    }

    fn release(&mut self, glyph: GpuGlyph) {
        drop(glyph);
    }
}

// ── per-frame batch ───────────────────────────────────────────────────────

struct GlyphDraw {
    bind_group: wgpu::BindGroup,
    vertices: [TextVertex; 4],
}

/// Glyph quads collected for one frame, drawn in insertion order.
#[derive(Default)]
pub struct GlyphBatch {
    draws: Vec<GlyphDraw>,
}

impl GlyphBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    fn vertices(&self) -> impl Iterator<Item = &TextVertex> + '_ {
        self.draws.iter().flat_map(|d| d.vertices.iter())
    }
}

impl GlyphSink<GpuGlyph> for GlyphBatch {
    fn draw_glyph(&mut self, glyph: &GpuGlyph, quad: &GlyphQuad) {
        self.draws.push(GlyphDraw {
            bind_group: glyph.bind_group.clone(),
            vertices: quad_vertices(quad),
        });
    }
}

/// Triangle-strip order: top-left, top-right, bottom-left, bottom-right.
fn quad_vertices(quad: &GlyphQuad) -> [TextVertex; 4] {
    quad.corners.map(|c| TextVertex {
        position: [c.position.x, c.position.y],
        tex_coords: [c.tex_coords.x, c.tex_coords.y],
    })
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Draws glyph quads as 4-vertex triangle strips, one draw call per glyph.
///
/// Positions are pixels with a top-left origin; the vertex shader maps them to
/// NDC using the viewport set through [`TextPipeline::resize`].
pub struct TextPipeline {
    pipeline: wgpu::RenderPipeline,
    glyph_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_dirty: bool,

    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    viewport: Viewport,
    color: Color,
}

impl TextPipeline {
    pub fn new(ctx: &RenderCtx<'_>, viewport: Viewport) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("letterpress text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let uniform_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("letterpress text uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(text_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let glyph_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("letterpress glyph bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("letterpress text pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &glyph_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("letterpress text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[TextVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("letterpress glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("letterpress text ubo"),
            size: std::mem::size_of::<TextUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("letterpress text uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            glyph_layout,
            sampler,
            uniform_buffer,
            uniform_bind_group,
            uniform_dirty: true,
            vertex_buffer: None,
            vertex_capacity: 0,
            viewport,
            color: Color::WHITE,
        }
    }

    /// Texture allocator whose glyphs bind against this pipeline's layout.
    pub fn glyph_textures(&self, ctx: &RenderCtx<'_>) -> WgpuGlyphTextures {
        WgpuGlyphTextures {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            layout: self.glyph_layout.clone(),
            sampler: self.sampler.clone(),
        }
    }

    /// Updates the pixel viewport used to place quads.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::from_physical(width, height);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.uniform_dirty = true;
        }
    }

    pub fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.color = color;
            self.uniform_dirty = true;
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records one render pass drawing every quad in `batch`.
    pub fn encode(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        batch: &GlyphBatch,
    ) {
        if batch.is_empty() {
            return;
        }

        if self.uniform_dirty {
            let uniform = TextUniform::new(self.viewport, self.color);
            ctx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
            self.uniform_dirty = false;
        }

        let vertices: Vec<TextVertex> = batch.vertices().copied().collect();
        self.ensure_vertex_capacity(ctx, vertices.len());
        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else {
            return;
        };
        ctx.queue.write_buffer(vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("letterpress text pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for (i, draw) in batch.draws.iter().enumerate() {
            let first = (i * 4) as u32;
            rpass.set_bind_group(1, &draw.bind_group, &[]);
            rpass.draw(first..first + 4, 0..1);
        }
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_buffer.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.vertex_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("letterpress text vbo"),
            size: (new_cap * std::mem::size_of::<TextVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;

    #[test]
    fn quad_becomes_strip_with_full_uv_range() {
        let quad = GlyphQuad::from_top_left(Vec2::new(50.0, 190.0), Vec2::new(41.0, 61.0));
        let v = quad_vertices(&quad);

        let positions: Vec<_> = v.iter().map(|vertex| vertex.position).collect();
        let uvs: Vec<_> = v.iter().map(|vertex| vertex.tex_coords).collect();
        assert_eq!(
            positions,
            [[50.0, 190.0], [91.0, 190.0], [50.0, 251.0], [91.0, 251.0]]
        );
        assert_eq!(uvs, [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn empty_batch() {
        let mut batch = GlyphBatch::new();
        assert!(batch.is_empty());
        batch.clear();
        assert_eq!(batch.len(), 0);
        assert_eq!(batch.vertices().count(), 0);
    }
}
