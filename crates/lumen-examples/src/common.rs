//! GPU helpers shared by the example units.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Background color most examples clear to.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.09,
    b: 0.12,
    a: 1.0,
};

// ── vertices ──────────────────────────────────────────────────────────────

/// 2D position plus RGB color, matching `position_color.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x3  // color
    ];

    pub const fn new(position: [f32; 2], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// 2D position plus texture coordinate, matching `textured.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Quad covering the middle of the screen, texture coordinates 0..1.
pub const TEXTURED_QUAD: [TexturedVertex; 4] = [
    TexturedVertex { position: [-0.5, -0.5], uv: [0.0, 1.0] },
    TexturedVertex { position: [0.5, -0.5], uv: [1.0, 1.0] },
    TexturedVertex { position: [0.5, 0.5], uv: [1.0, 0.0] },
    TexturedVertex { position: [-0.5, 0.5], uv: [0.0, 0.0] },
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub fn vertex_buffer<T: Pod>(device: &wgpu::Device, label: &str, data: &[T]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

pub fn index_buffer(device: &wgpu::Device, label: &str, data: &[u16]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::INDEX,
    })
}

/// Uniform buffer initialized with `value`, writable from the queue.
pub fn uniform_buffer<T: Pod>(device: &wgpu::Device, label: &str, value: &T) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(value),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

// ── render passes ─────────────────────────────────────────────────────────

/// Starts a render pass on `view` that clears it to `clear`.
pub fn clear_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    label: &str,
    clear: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

// ── pipelines ─────────────────────────────────────────────────────────────

/// Render pipeline description with the defaults the examples share.
///
/// Entry points are `vs_main` and `fs_main`; one color target, no blending.
pub struct PipelineBuilder<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    layout: Option<&'a wgpu::PipelineLayout>,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    primitive: wgpu::PrimitiveState,
    depth_stencil: Option<wgpu::DepthStencilState>,
    sample_count: u32,
    write_mask: wgpu::ColorWrites,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(label: &'a str, shader: &'a wgpu::ShaderModule, format: wgpu::TextureFormat) -> Self {
        Self {
            label,
            shader,
            format,
            layout: None,
            buffers: &[],
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            sample_count: 1,
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    pub fn layout(mut self, layout: &'a wgpu::PipelineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn buffers(mut self, buffers: &'a [wgpu::VertexBufferLayout<'a>]) -> Self {
        self.buffers = buffers;
        self
    }

    pub fn primitive(mut self, primitive: wgpu::PrimitiveState) -> Self {
        self.primitive = primitive;
        self
    }

    pub fn depth_stencil(mut self, state: wgpu::DepthStencilState) -> Self {
        self.depth_stencil = Some(state);
        self
    }

    pub fn sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    pub fn write_mask(mut self, mask: wgpu::ColorWrites) -> Self {
        self.write_mask = mask;
        self
    }

    pub fn build(self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: self.layout,

            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: self.buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: None,
                    write_mask: self.write_mask,
                })],
            }),

            primitive: self.primitive,
            depth_stencil: self.depth_stencil,
            multisample: wgpu::MultisampleState {
                count: self.sample_count,
                ..Default::default()
            },

            multiview_mask: None,
            cache: None,
        })
    }
}

/// Compute pipeline with entry point `cs_main` and a layout derived from the shader.
pub fn compute_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
) -> wgpu::ComputePipeline {
    device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some(label),
        layout: None,
        module: shader,
        entry_point: Some("cs_main"),
        compilation_options: Default::default(),
        cache: None,
    })
}

/// Workgroups needed to cover `size` texels with 8x8 groups.
pub fn workgroups_for(size: u32) -> u32 {
    size.div_ceil(8)
}

// ── textures ──────────────────────────────────────────────────────────────

/// Number of mip levels in a full chain for a `width` x `height` texture.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Uploads an RGBA8 image into level 0 of a new 2D texture.
pub fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &image::RgbaImage,
    format: wgpu::TextureFormat,
    mip_level_count: u32,
    usage: wgpu::TextureUsages,
) -> wgpu::Texture {
    let (width, height) = image.dimensions();
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: usage | wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    texture
}

/// Square 2D texture the compute examples write and the blitter reads.
pub fn storage_texture(device: &wgpu::Device, label: &str, size: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    })
}

/// Layout for a filterable 2D texture at binding 0 and its sampler at binding 1.
pub fn texture_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
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
    })
}

pub fn texture_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

pub fn linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

// ── fullscreen blit ───────────────────────────────────────────────────────

/// Draws a texture over the whole render target with `blit.wgsl`.
///
/// One blitter serves a single target format; bind groups are created per
/// source view with [`Blitter::bind`].
pub struct Blitter {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl Blitter {
    pub fn new(device: &wgpu::Device, shader: &wgpu::ShaderModule, format: wgpu::TextureFormat) -> Self {
        let layout = texture_bind_group_layout(device, "blit bgl");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blit pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = PipelineBuilder::new("blit pipeline", shader, format)
            .layout(&pipeline_layout)
            .build(device);

        Self {
            pipeline,
            layout,
            sampler: linear_sampler(device, "blit sampler"),
        }
    }

    pub fn bind(&self, device: &wgpu::Device, view: &wgpu::TextureView) -> wgpu::BindGroup {
        texture_bind_group(device, "blit bind group", &self.layout, view, &self.sampler)
    }

    /// Records a fullscreen triangle sampling `source`.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, source: &wgpu::BindGroup) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, source, &[]);
        rpass.draw(0..3, 0..1);
    }
}

// ── render targets ────────────────────────────────────────────────────────

/// Offscreen attachment that follows the surface size.
///
/// Recreated lazily when the requested size or sample count changes.
pub struct Attachment {
    label: &'static str,
    format: wgpu::TextureFormat,
    current: Option<(wgpu::Extent3d, u32, wgpu::TextureView)>,
}

impl Attachment {
    pub fn new(label: &'static str, format: wgpu::TextureFormat) -> Self {
        Self {
            label,
            format,
            current: None,
        }
    }

    pub fn view(
        &mut self,
        device: &wgpu::Device,
        size: wgpu::Extent3d,
        sample_count: u32,
    ) -> &wgpu::TextureView {
        let stale = match &self.current {
            Some((s, n, _)) => *s != size || *n != sample_count,
            None => true,
        };
        if stale {
            self.current = None;
        }

        let (label, format) = (self.label, self.format);
        let (_, _, view) = self.current.get_or_insert_with(|| {
            log::debug!(
                "recreating {label} ({}x{}, {sample_count} samples)",
                size.width,
                size.height
            );
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            (size, sample_count, view)
        });
        view
    }
}

/// Steps `index` forward or backward through `len` entries, wrapping.
pub fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_length() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(300, 10), 9);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(0, 6, false), 5);
        assert_eq!(cycle(5, 6, true), 0);
        assert_eq!(cycle(2, 6, true), 3);
        assert_eq!(cycle(0, 0, true), 0);
    }

    #[test]
    fn workgroups_cover_texture() {
        assert_eq!(workgroups_for(256), 32);
        assert_eq!(workgroups_for(250), 32);
        assert_eq!(workgroups_for(1), 1);
    }

    #[test]
    fn vertex_strides_match_attributes() {
        assert_eq!(ColorVertex::layout().array_stride, 20);
        assert_eq!(TexturedVertex::layout().array_stride, 16);
    }
}
