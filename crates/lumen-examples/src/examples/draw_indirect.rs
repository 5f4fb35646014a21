use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;
use wgpu::util::{DeviceExt, DrawIndexedIndirectArgs, DrawIndirectArgs};

use crate::common::{clear_pass, index_buffer, vertex_buffer, ColorVertex, PipelineBuilder, CLEAR_COLOR};

/// A triangle on the left, a quad on the right.
const VERTICES: [ColorVertex; 7] = [
    ColorVertex::new([-0.5, 0.5], [1.0, 0.4, 0.2]),
    ColorVertex::new([-0.9, -0.5], [1.0, 0.8, 0.2]),
    ColorVertex::new([-0.1, -0.5], [0.9, 0.2, 0.4]),
    ColorVertex::new([0.1, -0.5], [0.2, 0.6, 1.0]),
    ColorVertex::new([0.9, -0.5], [0.2, 0.9, 0.7]),
    ColorVertex::new([0.9, 0.5], [0.6, 0.3, 1.0]),
    ColorVertex::new([0.1, 0.5], [0.3, 0.8, 1.0]),
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Draw arguments read by the GPU from a buffer instead of the command.
pub struct DrawIndirect {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    arguments: wgpu::Buffer,
}

/// Byte offset of the indexed arguments within the argument buffer.
const INDEXED_ARGS_OFFSET: u64 = std::mem::size_of::<DrawIndirectArgs>() as u64;

fn argument_bytes() -> Vec<u8> {
    let draw = DrawIndirectArgs {
        vertex_count: 3,
        instance_count: 1,
        first_vertex: 0,
        first_instance: 0,
    };
    let indexed = DrawIndexedIndirectArgs {
        index_count: QUAD_INDICES.len() as u32,
        instance_count: 1,
        first_index: 0,
        base_vertex: 3,
        first_instance: 0,
    };

    let mut bytes = Vec::with_capacity(INDEXED_ARGS_OFFSET as usize + indexed.as_bytes().len());
    bytes.extend_from_slice(draw.as_bytes());
    bytes.extend_from_slice(indexed.as_bytes());
    bytes
}

impl Example<Gpu> for DrawIndirect {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let device = ctx.gpu.device();
        let shader = ctx.assets.load_shader(device, "position_color.wgsl")?;

        let pipeline = PipelineBuilder::new("indirect pipeline", &shader, ctx.gpu.surface_format())
            .buffers(&[ColorVertex::layout()])
            .build(device);

        let arguments = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("indirect arguments"),
            contents: &argument_bytes(),
            usage: wgpu::BufferUsages::INDIRECT,
        });

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(device, "indirect vertices", &VERTICES),
            indices: index_buffer(device, "indirect indices", &QUAD_INDICES),
            arguments,
        })
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "indirect pass", CLEAR_COLOR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.vertices.slice(..));
            rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indirect(&self.arguments, 0);
            rpass.draw_indexed_indirect(&self.arguments, INDEXED_ARGS_OFFSET);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_layout() {
        let bytes = argument_bytes();
        assert_eq!(INDEXED_ARGS_OFFSET, 16);
        assert_eq!(bytes.len(), 16 + 20);

        let words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .collect();
        assert_eq!(words[..4], [3, 1, 0, 0]);
        assert_eq!(words[4..], [6, 1, 0, 3, 0]);
    }
}
