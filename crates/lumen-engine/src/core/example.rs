use anyhow::Result;

use super::Context;

/// One self-contained demonstration.
///
/// The implementing type is the example's resource bundle: `init` creates it
/// (pipelines, buffers, textures), `quit` consumes it. `G` is the GPU host the
/// example renders with; the application uses `device::Gpu`.
///
/// An error from `init`, `update` or `draw` is fatal to the whole run.
pub trait Example<G>: 'static {
    /// Creates the example's resources.
    fn init(ctx: &mut Context<'_, G>) -> Result<Self>
    where
        Self: Sized;

    /// Advances example state. Runs every frame, including while drawing is
    /// suspended.
    fn update(&mut self, ctx: &mut Context<'_, G>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Renders one frame.
    fn draw(&mut self, ctx: &mut Context<'_, G>) -> Result<()>;

    /// Releases the example's resources before the next example starts.
    ///
    /// Resources are also released on drop; override when teardown needs the
    /// context (e.g. restoring window state).
    fn quit(self: Box<Self>, ctx: &mut Context<'_, G>) {
        let _ = ctx;
    }
}
