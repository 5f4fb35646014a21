use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, vertex_buffer, ColorVertex, PipelineBuilder, CLEAR_COLOR};

const VERTICES: [ColorVertex; 3] = [
    ColorVertex::new([0.0, 0.7], [1.0, 0.5, 0.1]),
    ColorVertex::new([-0.7, -0.7], [0.1, 0.8, 0.5]),
    ColorVertex::new([0.7, -0.7], [0.4, 0.2, 1.0]),
];

/// Triangle whose vertices are uploaded once into a vertex buffer.
pub struct BasicVertexBuffer {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
}

impl Example<Gpu> for BasicVertexBuffer {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let device = ctx.gpu.device();
        let shader = ctx.assets.load_shader(device, "position_color.wgsl")?;

        let pipeline = PipelineBuilder::new("vertex buffer pipeline", &shader, ctx.gpu.surface_format())
            .buffers(&[ColorVertex::layout()])
            .build(device);

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(device, "triangle vertices", &VERTICES),
        })
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "vertex buffer pass", CLEAR_COLOR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.vertices.slice(..));
            rpass.draw(0..VERTICES.len() as u32, 0..1);
            Ok(())
        })
    }
}
