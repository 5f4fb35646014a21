use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, cycle, vertex_buffer, ColorVertex, PipelineBuilder, CLEAR_COLOR};

const MODES: [(&str, Option<wgpu::Face>, wgpu::FrontFace); 6] = [
    ("CullNone_CCW", None, wgpu::FrontFace::Ccw),
    ("CullFront_CCW", Some(wgpu::Face::Front), wgpu::FrontFace::Ccw),
    ("CullBack_CCW", Some(wgpu::Face::Back), wgpu::FrontFace::Ccw),
    ("CullNone_CW", None, wgpu::FrontFace::Cw),
    ("CullFront_CW", Some(wgpu::Face::Front), wgpu::FrontFace::Cw),
    ("CullBack_CW", Some(wgpu::Face::Back), wgpu::FrontFace::Cw),
];

/// Left triangle is wound counter-clockwise, right one clockwise.
const VERTICES: [ColorVertex; 6] = [
    ColorVertex::new([-0.5, 0.5], [1.0, 0.3, 0.3]),
    ColorVertex::new([-0.9, -0.5], [1.0, 0.3, 0.3]),
    ColorVertex::new([-0.1, -0.5], [1.0, 0.3, 0.3]),
    ColorVertex::new([0.5, 0.5], [0.3, 0.6, 1.0]),
    ColorVertex::new([0.9, -0.5], [0.3, 0.6, 1.0]),
    ColorVertex::new([0.1, -0.5], [0.3, 0.6, 1.0]),
];

/// One pipeline per cull/winding combination; Left/Right cycle them.
pub struct CullMode {
    pipelines: Vec<wgpu::RenderPipeline>,
    vertices: wgpu::Buffer,
    current: usize,
}

impl Example<Gpu> for CullMode {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let device = ctx.gpu.device();
        let format = ctx.gpu.surface_format();
        let shader = ctx.assets.load_shader(device, "position_color.wgsl")?;

        let pipelines = MODES
            .iter()
            .map(|&(name, cull_mode, front_face)| {
                let primitive = wgpu::PrimitiveState {
                    front_face,
                    cull_mode,
                    ..Default::default()
                };
                PipelineBuilder::new(name, &shader, format)
                    .buffers(&[ColorVertex::layout()])
                    .primitive(primitive)
                    .build(device)
            })
            .collect();

        log::info!("Left/Right: cycle cull mode; current: {}", MODES[0].0);

        Ok(Self {
            pipelines,
            vertices: vertex_buffer(device, "cull mode vertices", &VERTICES),
            current: 0,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        if ctx.input.left || ctx.input.right {
            self.current = cycle(self.current, self.pipelines.len(), ctx.input.right);
            log::info!("cull mode: {}", MODES[self.current].0);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        let pipeline = &self.pipelines[self.current];
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "cull mode pass", CLEAR_COLOR);
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, self.vertices.slice(..));
            rpass.draw(0..VERTICES.len() as u32, 0..1);
            Ok(())
        })
    }
}
