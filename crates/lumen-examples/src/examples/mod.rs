//! Example units, one per module.

mod basic_compute;
mod basic_stencil;
mod basic_triangle;
mod basic_vertex_buffer;
mod clear_screen;
mod compute_uniforms;
mod copy_and_readback;
mod cull_mode;
mod draw_indirect;
mod generate_mipmaps;
mod instanced_indexed;
mod textured_animated_quad;
mod textured_quad;
mod tone_mapping;
mod triangle_msaa;

pub use basic_compute::BasicCompute;
pub use basic_stencil::BasicStencil;
pub use basic_triangle::BasicTriangle;
pub use basic_vertex_buffer::BasicVertexBuffer;
pub use clear_screen::ClearScreen;
pub use compute_uniforms::ComputeUniforms;
pub use copy_and_readback::CopyAndReadback;
pub use cull_mode::CullMode;
pub use draw_indirect::DrawIndirect;
pub use generate_mipmaps::GenerateMipmaps;
pub use instanced_indexed::InstancedIndexed;
pub use textured_animated_quad::TexturedAnimatedQuad;
pub use textured_quad::TexturedQuad;
pub use tone_mapping::ToneMapping;
pub use triangle_msaa::TriangleMSAA;
