use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{clear_pass, compute_pipeline, storage_texture, workgroups_for, Blitter, CLEAR_COLOR};

const TEXTURE_SIZE: u32 = 256;

/// Compute shader fills a storage texture once at init; every frame draws it.
pub struct BasicCompute {
    blitter: Blitter,
    source: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

impl Example<Gpu> for BasicCompute {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let fill_shader = ctx.assets.load_shader(device, "compute_fill.wgsl")?;
        let blit_shader = ctx.assets.load_shader(device, "blit.wgsl")?;

        let texture = storage_texture(device, "compute output", TEXTURE_SIZE);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let pipeline = compute_pipeline(device, "compute fill pipeline", &fill_shader);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("compute fill bind group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            }],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("compute fill encoder"),
        });
        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("compute fill pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&pipeline);
            cpass.set_bind_group(0, &bind_group, &[]);
            let groups = workgroups_for(TEXTURE_SIZE);
            cpass.dispatch_workgroups(groups, groups, 1);
        }
        gpu.queue().submit(std::iter::once(encoder.finish()));

        let blitter = Blitter::new(device, &blit_shader, gpu.surface_format());
        let source = blitter.bind(device, &view);

        Ok(Self {
            blitter,
            source,
            _texture: texture,
        })
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "compute blit pass", CLEAR_COLOR);
            self.blitter.draw(&mut rpass, &self.source);
            Ok(())
        })
    }
}
