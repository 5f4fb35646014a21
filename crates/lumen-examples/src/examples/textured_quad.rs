use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{
    clear_pass, cycle, index_buffer, texture_bind_group, texture_bind_group_layout, upload_rgba8,
    vertex_buffer, PipelineBuilder, TexturedVertex, CLEAR_COLOR, QUAD_INDICES, TEXTURED_QUAD,
};

const SAMPLERS: [(&str, wgpu::FilterMode, wgpu::AddressMode); 6] = [
    ("PointClamp", wgpu::FilterMode::Nearest, wgpu::AddressMode::ClampToEdge),
    ("PointWrap", wgpu::FilterMode::Nearest, wgpu::AddressMode::Repeat),
    ("PointMirror", wgpu::FilterMode::Nearest, wgpu::AddressMode::MirrorRepeat),
    ("LinearClamp", wgpu::FilterMode::Linear, wgpu::AddressMode::ClampToEdge),
    ("LinearWrap", wgpu::FilterMode::Linear, wgpu::AddressMode::Repeat),
    ("LinearMirror", wgpu::FilterMode::Linear, wgpu::AddressMode::MirrorRepeat),
];

/// Image loaded from disk and drawn on an indexed quad.
///
/// Left/Right cycle through six samplers (filter x address mode).
pub struct TexturedQuad {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    bind_groups: Vec<wgpu::BindGroup>,
    current: usize,
}

impl Example<Gpu> for TexturedQuad {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let shader = ctx.assets.load_shader(device, "textured.wgsl")?;
        let image = ctx.assets.load_image("checker.bmp")?;

        let texture = upload_rgba8(
            device,
            gpu.queue(),
            "checker texture",
            &image,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            1,
            wgpu::TextureUsages::empty(),
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let layout = texture_bind_group_layout(device, "textured quad bgl");
        let bind_groups = SAMPLERS
            .iter()
            .map(|&(name, filter, address)| {
                let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
                    label: Some(name),
                    address_mode_u: address,
                    address_mode_v: address,
                    mag_filter: filter,
                    min_filter: filter,
                    ..Default::default()
                });
                texture_bind_group(device, name, &layout, &view, &sampler)
            })
            .collect();

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured quad pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = PipelineBuilder::new("textured quad pipeline", &shader, gpu.surface_format())
            .layout(&pipeline_layout)
            .buffers(&[TexturedVertex::layout()])
            .build(device);

        log::info!("Left/Right: cycle sampler; current: {}", SAMPLERS[0].0);

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(device, "textured quad vertices", &TEXTURED_QUAD),
            indices: index_buffer(device, "textured quad indices", &QUAD_INDICES),
            bind_groups,
            current: 0,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        if ctx.input.left || ctx.input.right {
            self.current = cycle(self.current, self.bind_groups.len(), ctx.input.right);
            log::info!("sampler: {}", SAMPLERS[self.current].0);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "textured quad pass", CLEAR_COLOR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_groups[self.current], &[]);
            rpass.set_vertex_buffer(0, self.vertices.slice(..));
            rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
            Ok(())
        })
    }
}
