use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, cycle, mip_level_count, upload_rgba8, Blitter, CLEAR_COLOR};

const MIP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Builds a full mip chain at init by rendering each level from the one above
/// it with a linear-filtered fullscreen blit.
///
/// Left/Right choose the level drawn to the screen.
pub struct GenerateMipmaps {
    blitter: Blitter,
    levels: Vec<wgpu::BindGroup>,
    current: usize,
}

impl Example<Gpu> for GenerateMipmaps {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let blit_shader = ctx.assets.load_shader(device, "blit.wgsl")?;
        let image = ctx.assets.load_image("checker.bmp")?;

        let (width, height) = image.dimensions();
        let level_count = mip_level_count(width, height);

        let texture = upload_rgba8(
            device,
            gpu.queue(),
            "mipmapped texture",
            &image,
            MIP_FORMAT,
            level_count,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        let views: Vec<wgpu::TextureView> = (0..level_count)
            .map(|level| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("mip level view"),
                    base_mip_level: level,
                    mip_level_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();

        let downsampler = Blitter::new(device, &blit_shader, MIP_FORMAT);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("mipmap encoder"),
        });
        for pair in views.windows(2) {
            let source = downsampler.bind(device, &pair[0]);
            let mut rpass = clear_pass(&mut encoder, &pair[1], "downsample pass", wgpu::Color::BLACK);
            downsampler.draw(&mut rpass, &source);
        }
        gpu.queue().submit(std::iter::once(encoder.finish()));

        log::info!("generated {level_count} mip levels for {width}x{height} texture");
        log::info!("Left/Right: select displayed mip level");

        let blitter = Blitter::new(device, &blit_shader, gpu.surface_format());
        let levels = views.iter().map(|view| blitter.bind(device, view)).collect();

        Ok(Self {
            blitter,
            levels,
            current: 0,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        if ctx.input.left || ctx.input.right {
            self.current = cycle(self.current, self.levels.len(), ctx.input.right);
            log::info!("mip level: {}", self.current);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "mip display pass", CLEAR_COLOR);
            self.blitter.draw(&mut rpass, &self.levels[self.current]);
            Ok(())
        })
    }
}
