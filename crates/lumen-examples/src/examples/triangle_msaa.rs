use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::{cycle, Attachment, PipelineBuilder, CLEAR_COLOR};

const CANDIDATE_SAMPLE_COUNTS: [u32; 4] = [1, 2, 4, 8];

/// Sample counts usable as render targets of `format` on this device.
///
/// Counts beyond 1 and 4 need adapter-specific format features.
fn supported_sample_counts(gpu: &Gpu, format: wgpu::TextureFormat) -> Vec<u32> {
    let flags = if gpu
        .features()
        .contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES)
    {
        gpu.adapter().get_texture_format_features(format).flags
    } else {
        format.guaranteed_format_features(gpu.features()).flags
    };

    CANDIDATE_SAMPLE_COUNTS
        .into_iter()
        .filter(|&n| n == 1 || flags.sample_count_supported(n))
        .collect()
}

/// Triangle rendered into a multisampled target and resolved to the surface.
///
/// Left/Right cycle the supported sample counts.
pub struct TriangleMSAA {
    pipelines: Vec<(u32, wgpu::RenderPipeline)>,
    target: Attachment,
    current: usize,
}

impl Example<Gpu> for TriangleMSAA {
    fn init(ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        let gpu = &*ctx.gpu;
        let device = gpu.device();
        let format = gpu.surface_format();
        let shader = ctx.assets.load_shader(device, "triangle.wgsl")?;

        let counts = supported_sample_counts(gpu, format);
        log::info!("supported sample counts for {format:?}: {counts:?}");

        let pipelines = counts
            .into_iter()
            .map(|count| {
                let pipeline = PipelineBuilder::new("msaa triangle pipeline", &shader, format)
                    .sample_count(count)
                    .build(device);
                (count, pipeline)
            })
            .collect();

        Ok(Self {
            pipelines,
            target: Attachment::new("msaa target", format),
            current: 0,
        })
    }

    fn update(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        if ctx.input.left || ctx.input.right {
            self.current = cycle(self.current, self.pipelines.len(), ctx.input.right);
            log::info!("sample count: {}", self.pipelines[self.current].0);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        let Some((count, pipeline)) = self.pipelines.get(self.current) else {
            return Ok(());
        };
        let count = *count;
        let target = &mut self.target;

        ctx.render(|gpu, frame| {
            // Single-sampled rendering goes straight to the surface.
            let (view, resolve_target) = if count > 1 {
                let msaa = target.view(gpu.device(), frame.size(), count);
                (msaa, Some(&frame.view))
            } else {
                (&frame.view, None)
            };

            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("msaa pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: if count > 1 {
                            wgpu::StoreOp::Discard
                        } else {
                            wgpu::StoreOp::Store
                        },
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            rpass.set_pipeline(pipeline);
            rpass.draw(0..3, 0..1);
            Ok(())
        })
    }
}
