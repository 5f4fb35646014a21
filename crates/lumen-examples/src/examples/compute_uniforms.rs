use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{
    clear_pass, compute_pipeline, storage_texture, uniform_buffer, workgroups_for, Blitter, CLEAR_COLOR,
};

const TEXTURE_SIZE: u32 = 256;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Params {
    time: f32,
    speed: f32,
    _pad: [f32; 2], // 16-byte alignment
}

/// Compute pass re-run every frame with uniforms updated from the frame clock.
pub struct ComputeUniforms {
    pipeline: wgpu::ComputePipeline,
    compute_bind_group: wgpu::BindGroup,
    params: wgpu::Buffer,
    blitter: Blitter,
    source: wgpu::BindGroup,
    time: f32,
    _texture: wgpu::Texture,
}

impl Example<Gpu> for ComputeUniforms {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let compute_shader = ctx.assets.load_shader(device, "compute_uniforms.wgsl")?;
        let blit_shader = ctx.assets.load_shader(device, "blit.wgsl")?;

        let texture = storage_texture(device, "plasma output", TEXTURE_SIZE);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let params = uniform_buffer(
            device,
            "plasma params",
            &Params {
                time: 0.0,
                speed: 1.5,
                _pad: [0.0; 2],
            },
        );

        let pipeline = compute_pipeline(device, "plasma pipeline", &compute_shader);
        let compute_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plasma bind group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params.as_entire_binding(),
                },
            ],
        });

        let blitter = Blitter::new(device, &blit_shader, gpu.surface_format());
        let source = blitter.bind(device, &view);

        Ok(Self {
            pipeline,
            compute_bind_group,
            params,
            blitter,
            source,
            time: 0.0,
            _texture: texture,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        self.time += ctx.dt();
        let p = Params {
            time: self.time,
            speed: 1.5,
            _pad: [0.0; 2],
        };
        ctx.gpu.queue().write_buffer(&self.params, 0, bytemuck::bytes_of(&p));
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            {
                let mut cpass = frame.encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("plasma pass"),
                    timestamp_writes: None,
                });
                cpass.set_pipeline(&self.pipeline);
                cpass.set_bind_group(0, &self.compute_bind_group, &[]);
                let groups = workgroups_for(TEXTURE_SIZE);
                cpass.dispatch_workgroups(groups, groups, 1);
            }

            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "plasma blit pass", CLEAR_COLOR);
            self.blitter.draw(&mut rpass, &self.source);
            Ok(())
        })
    }
}
