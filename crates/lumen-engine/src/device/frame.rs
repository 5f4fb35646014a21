/// A single acquired surface frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// Presentation happens in `Gpu::submit`.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the acquired surface texture in physical pixels.
    pub fn size(&self) -> wgpu::Extent3d {
        self.surface_texture.texture.size()
    }
}
