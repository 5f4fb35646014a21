use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, PipelineBuilder, CLEAR_COLOR};

/// Triangle from a vertex-index shader.
///
/// Left toggles wireframe (when the device supports line polygons), Down
/// toggles a small viewport, Right toggles a scissor rectangle.
pub struct BasicTriangle {
    fill: wgpu::RenderPipeline,
    line: Option<wgpu::RenderPipeline>,
    wireframe: bool,
    small_viewport: bool,
    scissor: bool,
}

impl Example<Gpu> for BasicTriangle {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let shader = ctx.assets.load_shader(device, "triangle.wgsl")?;
        let format = gpu.surface_format();

        let fill = PipelineBuilder::new("triangle fill pipeline", &shader, format).build(device);

        let line = if gpu.features().contains(wgpu::Features::POLYGON_MODE_LINE) {
            let primitive = wgpu::PrimitiveState {
                polygon_mode: wgpu::PolygonMode::Line,
                ..Default::default()
            };
            Some(
                PipelineBuilder::new("triangle line pipeline", &shader, format)
                    .primitive(primitive)
                    .build(device),
            )
        } else {
            log::info!("POLYGON_MODE_LINE unsupported, wireframe disabled");
            None
        };

        log::info!("Left: wireframe, Down: small viewport, Right: scissor");

        Ok(Self {
            fill,
            line,
            wireframe: false,
            small_viewport: false,
            scissor: false,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        if ctx.input.left && self.line.is_some() {
            self.wireframe = !self.wireframe;
            log::info!("wireframe: {}", self.wireframe);
        }
        if ctx.input.down {
            self.small_viewport = !self.small_viewport;
            log::info!("small viewport: {}", self.small_viewport);
        }
        if ctx.input.right {
            self.scissor = !self.scissor;
            log::info!("scissor: {}", self.scissor);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        let pipeline = match (&self.line, self.wireframe) {
            (Some(line), true) => line,
            _ => &self.fill,
        };
        let (small_viewport, scissor) = (self.small_viewport, self.scissor);

        ctx.render(|_, frame| {
            let size = frame.size();
            let (w, h) = (size.width as f32, size.height as f32);

            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "triangle pass", CLEAR_COLOR);
            rpass.set_pipeline(pipeline);

            if small_viewport {
                rpass.set_viewport(w * 0.1, h * 0.1, w * 0.4, h * 0.4, 0.0, 1.0);
            }
            if scissor {
                rpass.set_scissor_rect(size.width / 4, size.height / 4, size.width / 2, size.height / 2);
            }

            rpass.draw(0..3, 0..1);
            Ok(())
        })
    }
}
