use anyhow::{bail, Result};

use crate::assets::AssetLoader;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::input::Directions;
use crate::time::FrameTime;

/// State passed to every lifecycle call.
///
/// Built by the dispatcher for the duration of one call.
pub struct Context<'a, G> {
    /// Name of the example being driven.
    pub example: &'static str,

    /// GPU host (window, device, queue).
    pub gpu: &'a mut G,

    /// Asset loader for shaders and images.
    pub assets: &'a AssetLoader,

    /// Directional presses of this frame.
    pub input: Directions,

    /// Frame timing. Zero during `init` and `quit`.
    pub time: FrameTime,
}

impl<G> Context<'_, G> {
    /// Seconds since the previous frame.
    pub fn dt(&self) -> f32 {
        self.time.dt
    }
}

impl Context<'_, Gpu> {
    /// Acquires the next surface frame, calls `draw` with it, then presents.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is skipped
    /// without calling `draw`; running out of memory is an error.
    pub fn render<F>(&mut self, draw: F) -> Result<()>
    where
        F: FnOnce(&Gpu, &mut GpuFrame) -> Result<()>,
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface unavailable: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => bail!("surface acquisition failed: out of memory"),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                };
            }
        };

        draw(&*self.gpu, &mut frame)?;
        self.gpu.submit(frame);
        Ok(())
    }
}
