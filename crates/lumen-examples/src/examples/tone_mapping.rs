use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{
    clear_pass, cycle, storage_texture, uniform_buffer, workgroups_for, Blitter, CLEAR_COLOR,
};

const TEXTURE_SIZE: u32 = 256;

/// Operator names, indexed by the `mode` uniform of `tonemap.wgsl`.
const OPERATORS: [&str; 6] = [
    "Clamp",
    "Reinhard",
    "ExtendedReinhard",
    "ExtendedReinhardLuminance",
    "ACES",
    "Hable",
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Params {
    mode: u32,
    exposure: f32,
    white_point: f32,
    _pad: f32,
}

/// Procedural HDR scene: horizontal intensity ramp from 0 to `peak`, hue
/// varying vertically.
fn hdr_pixels(size: u32, peak: f32) -> Vec<[f32; 4]> {
    let mut pixels = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        let v = y as f32 / (size - 1) as f32;
        let hue = [1.0 - v, 0.5 + 0.5 * (v * std::f32::consts::PI).sin(), v];
        for x in 0..size {
            let u = x as f32 / (size - 1) as f32;
            let intensity = peak * u * u;
            pixels.push([hue[0] * intensity, hue[1] * intensity, hue[2] * intensity, 1.0]);
        }
    }
    pixels
}

/// HDR float texture mapped to displayable range by a compute pass.
///
/// Left/Right cycle the tone mapping operator.
pub struct ToneMapping {
    pipeline: wgpu::ComputePipeline,
    compute_bind_group: wgpu::BindGroup,
    params: wgpu::Buffer,
    blitter: Blitter,
    source: wgpu::BindGroup,
    current: usize,
}

impl ToneMapping {
    fn params(&self) -> Params {
        Params {
            mode: self.current as u32,
            exposure: 1.0,
            white_point: 8.0,
            _pad: 0.0,
        }
    }
}

impl Example<Gpu> for ToneMapping {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let tonemap_shader = ctx.assets.load_shader(device, "tonemap.wgsl")?;
        let blit_shader = ctx.assets.load_shader(device, "blit.wgsl")?;

        let size = wgpu::Extent3d {
            width: TEXTURE_SIZE,
            height: TEXTURE_SIZE,
            depth_or_array_layers: 1,
        };
        let hdr = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("hdr scene"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let pixels = hdr_pixels(TEXTURE_SIZE, 16.0);
        gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &hdr,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&pixels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(TEXTURE_SIZE * std::mem::size_of::<[f32; 4]>() as u32),
                rows_per_image: Some(TEXTURE_SIZE),
            },
            size,
        );
        let hdr_view = hdr.create_view(&wgpu::TextureViewDescriptor::default());

        let output = storage_texture(device, "tonemapped output", TEXTURE_SIZE);
        let output_view = output.create_view(&wgpu::TextureViewDescriptor::default());

        // 32-bit float textures are not filterable; the shader only loads texels.
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tonemap bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: wgpu::TextureFormat::Rgba8Unorm,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Params>() as u64),
                    },
                    count: None,
                },
            ],
        });

        let params = uniform_buffer(
            device,
            "tonemap params",
            &Params {
                mode: 0,
                exposure: 1.0,
                white_point: 8.0,
                _pad: 0.0,
            },
        );

        let compute_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tonemap bind group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&hdr_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&output_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tonemap pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("tonemap pipeline"),
            layout: Some(&pipeline_layout),
            module: &tonemap_shader,
            entry_point: Some("cs_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let blitter = Blitter::new(device, &blit_shader, gpu.surface_format());
        let source = blitter.bind(device, &output_view);

        log::info!("Left/Right: cycle operator; current: {}", OPERATORS[0]);

        Ok(Self {
            pipeline,
            compute_bind_group,
            params,
            blitter,
            source,
            current: 0,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        if ctx.input.left || ctx.input.right {
            self.current = cycle(self.current, OPERATORS.len(), ctx.input.right);
            log::info!("tone mapping operator: {}", OPERATORS[self.current]);
            let p = self.params();
            ctx.gpu.queue().write_buffer(&self.params, 0, bytemuck::bytes_of(&p));
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            {
                let mut cpass = frame.encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("tonemap pass"),
                    timestamp_writes: None,
                });
                cpass.set_pipeline(&self.pipeline);
                cpass.set_bind_group(0, &self.compute_bind_group, &[]);
                let groups = workgroups_for(TEXTURE_SIZE);
                cpass.dispatch_workgroups(groups, groups, 1);
            }

            let mut rpass = clear_pass(&mut frame.encoder, &frame.view, "tonemap blit pass", CLEAR_COLOR);
            self.blitter.draw(&mut rpass, &self.source);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hdr_scene_spans_zero_to_peak() {
        let pixels = hdr_pixels(16, 16.0);
        assert_eq!(pixels.len(), 256);

        let max = pixels
            .iter()
            .flat_map(|p| p[..3].iter().copied())
            .fold(0.0f32, f32::max);
        assert!(max > 1.0, "scene should exceed display range");
        assert!(max <= 16.0);
        assert_eq!(pixels[0][..3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn params_are_uniform_aligned() {
        assert_eq!(std::mem::size_of::<Params>() % 16, 0);
    }
}
