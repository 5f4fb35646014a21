use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{vertex_buffer, Attachment, ColorVertex, PipelineBuilder, CLEAR_COLOR};

const STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// A small diamond written to the stencil buffer only, then a large triangle
/// that passes the stencil test only where the diamond was.
const VERTICES: [ColorVertex; 9] = [
    // mask (two triangles)
    ColorVertex::new([0.0, 0.5], [0.0, 0.0, 0.0]),
    ColorVertex::new([-0.5, 0.0], [0.0, 0.0, 0.0]),
    ColorVertex::new([0.5, 0.0], [0.0, 0.0, 0.0]),
    ColorVertex::new([-0.5, 0.0], [0.0, 0.0, 0.0]),
    ColorVertex::new([0.0, -0.5], [0.0, 0.0, 0.0]),
    ColorVertex::new([0.5, 0.0], [0.0, 0.0, 0.0]),
    // masked triangle
    ColorVertex::new([0.0, 0.9], [1.0, 0.8, 0.2]),
    ColorVertex::new([-0.9, -0.9], [0.2, 0.9, 0.9]),
    ColorVertex::new([0.9, -0.9], [0.9, 0.2, 0.8]),
];

const STENCIL_REFERENCE: u32 = 1;

/// Stencil write then stencil test inside one render pass.
pub struct BasicStencil {
    mask_pipeline: wgpu::RenderPipeline,
    masked_pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    depth_stencil: Attachment,
}

fn stencil_state(compare: wgpu::CompareFunction, pass_op: wgpu::StencilOperation) -> wgpu::DepthStencilState {
    let face = wgpu::StencilFaceState {
        compare,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op,
    };
    wgpu::DepthStencilState {
        format: STENCIL_FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::Always,
        stencil: wgpu::StencilState {
            front: face,
            back: face,
            read_mask: 0xff,
            write_mask: 0xff,
        },
        bias: wgpu::DepthBiasState::default(),
    }
}

impl Example<Gpu> for BasicStencil {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let device = ctx.gpu.device();
        let format = ctx.gpu.surface_format();
        let shader = ctx.assets.load_shader(device, "position_color.wgsl")?;

        let mask_pipeline = PipelineBuilder::new("stencil mask pipeline", &shader, format)
            .buffers(&[ColorVertex::layout()])
            .depth_stencil(stencil_state(
                wgpu::CompareFunction::Always,
                wgpu::StencilOperation::Replace,
            ))
            .write_mask(wgpu::ColorWrites::empty())
            .build(device);

        let masked_pipeline = PipelineBuilder::new("stencil masked pipeline", &shader, format)
            .buffers(&[ColorVertex::layout()])
            .depth_stencil(stencil_state(
                wgpu::CompareFunction::Equal,
                wgpu::StencilOperation::Keep,
            ))
            .build(device);

        Ok(Self {
            mask_pipeline,
            masked_pipeline,
            vertices: vertex_buffer(device, "stencil vertices", &VERTICES),
            depth_stencil: Attachment::new("stencil attachment", STENCIL_FORMAT),
        })
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        let Self {
            mask_pipeline,
            masked_pipeline,
            vertices,
            depth_stencil,
        } = self;

        ctx.render(|gpu, frame| {
            let stencil_view = depth_stencil.view(gpu.device(), frame.size(), 1);

            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stencil pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: stencil_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Discard,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_vertex_buffer(0, vertices.slice(..));
            rpass.set_stencil_reference(STENCIL_REFERENCE);

            rpass.set_pipeline(mask_pipeline);
            rpass.draw(0..6, 0..1);

            rpass.set_pipeline(masked_pipeline);
            rpass.draw(6..9, 0..1);
            Ok(())
        })
    }
}
