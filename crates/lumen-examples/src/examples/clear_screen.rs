use anyhow::Result;
use lumen_engine::core::{Context, Example};
use lumen_engine::device::Gpu;

use crate::common::clear_pass;

/// Clears the surface to a solid color; no pipeline at all.
pub struct ClearScreen;

impl Example<Gpu> for ClearScreen {
    fn init(_ctx: &mut Context<'_, Gpu>) -> Result<Self> {
        Ok(Self)
    }

    fn draw(&mut self, ctx: &mut Context<'_, Gpu>) -> Result<()> {
        ctx.render(|_, frame| {
            let color = wgpu::Color {
                r: 0.3,
                g: 0.4,
                b: 0.5,
                a: 1.0,
            };
            let _rpass = clear_pass(&mut frame.encoder, &frame.view, "clear screen pass", color);
            Ok(())
        })
    }
}
