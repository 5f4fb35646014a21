use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{
    clear_pass, index_buffer, linear_sampler, uniform_buffer, upload_rgba8, vertex_buffer,
    PipelineBuilder, TexturedVertex, CLEAR_COLOR, QUAD_INDICES, TEXTURED_QUAD,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Animation {
    time: f32,
    aspect: f32,
    _pad: [f32; 2], // 16-byte alignment
}

const QUAD_COUNT: u32 = 4;

/// Four textured quads animated by a uniform buffer advanced with delta time.
pub struct TexturedAnimatedQuad {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    time: f32,
}

impl Example<Gpu> for TexturedAnimatedQuad {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let shader = ctx.assets.load_shader(device, "textured_animated.wgsl")?;
        let image = ctx.assets.load_image("checker.bmp")?;

        let texture = upload_rgba8(
            device,
            gpu.queue(),
            "animated quad texture",
            &image,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            1,
            wgpu::TextureUsages::empty(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = linear_sampler(device, "animated quad sampler");

        let uniforms = uniform_buffer(
            device,
            "animation ubo",
            &Animation {
                time: 0.0,
                aspect: 1.0,
                _pad: [0.0; 2],
            },
        );

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("animated quad bgl"),
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
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Animation>() as u64),
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("animated quad bind group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("animated quad pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = PipelineBuilder::new("animated quad pipeline", &shader, gpu.surface_format())
            .layout(&pipeline_layout)
            .buffers(&[TexturedVertex::layout()])
            .build(device);

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(device, "animated quad vertices", &TEXTURED_QUAD),
            indices: index_buffer(device, "animated quad indices", &QUAD_INDICES),
            uniforms,
            bind_group,
            time: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        self.time += ctx.dt();

        let size = ctx.gpu.size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let u = Animation {
            time: self.time,
            aspect,
            _pad: [0.0; 2],
        };
        ctx.gpu.queue().write_buffer(&self.uniforms, 0, bytemuck::bytes_of(&u));
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "animated quad pass", CLEAR_COLOR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertices.slice(..));
            rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..QUAD_COUNT);
            Ok(())
        })
    }
}
