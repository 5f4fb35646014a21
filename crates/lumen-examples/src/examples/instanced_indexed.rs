use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, index_buffer, vertex_buffer, ColorVertex, PipelineBuilder, CLEAR_COLOR};

const INSTANCES: u32 = 16;

/// Two copies of one quad: warm colors first, cool colors second.
const VERTICES: [ColorVertex; 8] = [
    ColorVertex::new([-1.0, -1.0], [1.0, 0.3, 0.2]),
    ColorVertex::new([1.0, -1.0], [1.0, 0.7, 0.1]),
    ColorVertex::new([1.0, 1.0], [0.9, 0.2, 0.5]),
    ColorVertex::new([-1.0, 1.0], [1.0, 0.9, 0.4]),
    ColorVertex::new([-1.0, -1.0], [0.2, 0.5, 1.0]),
    ColorVertex::new([1.0, -1.0], [0.1, 0.9, 0.8]),
    ColorVertex::new([1.0, 1.0], [0.5, 0.3, 1.0]),
    ColorVertex::new([-1.0, 1.0], [0.3, 0.8, 1.0]),
];

/// Lower-right half of the quad, then upper-left half.
const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const QUAD_VERTEX_COUNT: u32 = 4;
const TRIANGLE_INDEX_COUNT: u32 = 3;

/// Instanced draw with optional index buffer, vertex offset and index offset.
///
/// Draws one triangle per instance. Left toggles the vertex offset (selects the
/// cool copy), Right toggles the index offset (the other half of the quad), Up
/// toggles indexed drawing.
pub struct InstancedIndexed {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    use_vertex_offset: bool,
    use_index_offset: bool,
    use_index_buffer: bool,
}

impl Example<Gpu> for InstancedIndexed {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let device = ctx.gpu.device();
        let shader = ctx.assets.load_shader(device, "instanced.wgsl")?;

        let pipeline = PipelineBuilder::new("instanced pipeline", &shader, ctx.gpu.surface_format())
            .buffers(&[ColorVertex::layout()])
            .build(device);

        log::info!("Left: vertex offset, Right: index offset, Up: index buffer");

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(device, "instanced vertices", &VERTICES),
            indices: index_buffer(device, "instanced indices", &INDICES),
            use_vertex_offset: false,
            use_index_offset: false,
            use_index_buffer: true,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        let input = ctx.input;
        if input.left {
            self.use_vertex_offset = !self.use_vertex_offset;
        }
        if input.right {
            self.use_index_offset = !self.use_index_offset;
        }
        if input.up {
            self.use_index_buffer = !self.use_index_buffer;
        }
        if input.left || input.right || input.up {
            log::info!(
                "vertex offset: {}, index offset: {}, index buffer: {}",
                self.use_vertex_offset,
                self.use_index_offset,
                self.use_index_buffer
            );
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        let vertex_offset = if self.use_vertex_offset { QUAD_VERTEX_COUNT } else { 0 };
        let index_offset = if self.use_index_offset { TRIANGLE_INDEX_COUNT } else { 0 };

        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "instanced pass", CLEAR_COLOR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.vertices.slice(..));

            if self.use_index_buffer {
                rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(
                    index_offset..index_offset + TRIANGLE_INDEX_COUNT,
                    vertex_offset as i32,
                    0..INSTANCES,
                );
            } else {
                rpass.draw(vertex_offset..vertex_offset + TRIANGLE_INDEX_COUNT, 0..INSTANCES);
            }
            Ok(())
        })
    }
}
