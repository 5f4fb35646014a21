//! The lumen example programs.
//!
//! Each example is a self-contained `Example<Gpu>`; [`registry`] lists them in
//! the order the harness cycles through.

pub mod common;
pub mod examples;

use std::path::PathBuf;

use lumen_engine::assets::AssetLoader;
use lumen_engine::device::Gpu;
use lumen_engine::harness::Registry;

use examples::*;

/// All examples, in navigation order.
pub fn registry() -> Registry<Gpu> {
    Registry::new()
        .with::<ClearScreen>("ClearScreen")
        .with::<BasicTriangle>("BasicTriangle")
        .with::<BasicVertexBuffer>("BasicVertexBuffer")
        .with::<CullMode>("CullMode")
        .with::<BasicStencil>("BasicStencil")
        .with::<InstancedIndexed>("InstancedIndexed")
        .with::<TexturedQuad>("TexturedQuad")
        .with::<TexturedAnimatedQuad>("TexturedAnimatedQuad")
        .with::<BasicCompute>("BasicCompute")
        .with::<ComputeUniforms>("ComputeUniforms")
        .with::<ToneMapping>("ToneMapping")
        .with::<GenerateMipmaps>("GenerateMipmaps")
        .with::<TriangleMSAA>("TriangleMSAA")
        .with::<DrawIndirect>("DrawIndirect")
        .with::<CopyAndReadback>("CopyAndReadback")
}

/// Content directory shipped with this crate's sources.
pub fn bundled_content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content")
}

/// Asset loader looking next to the executable first, then in the bundled
/// content directory.
pub fn asset_loader() -> AssetLoader {
    AssetLoader::beside_executable([bundled_content_dir()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_order_and_names() {
        let registry = registry();
        let names: Vec<&str> = registry.names().collect();

        assert_eq!(names.len(), 15);
        assert_eq!(names.first(), Some(&"ClearScreen"));
        assert_eq!(names.last(), Some(&"CopyAndReadback"));

        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn bundled_shaders_are_present() {
        let loader = AssetLoader::new([bundled_content_dir()]);
        for shader in [
            "triangle.wgsl",
            "position_color.wgsl",
            "instanced.wgsl",
            "textured.wgsl",
            "textured_animated.wgsl",
            "blit.wgsl",
            "compute_fill.wgsl",
            "compute_uniforms.wgsl",
            "tonemap.wgsl",
        ] {
            let source = loader.load_wgsl(shader).unwrap();
            assert!(source.contains("fn "), "{shader} has no functions");
        }
    }

    #[test]
    fn bundled_image_decodes() {
        let loader = AssetLoader::new([bundled_content_dir()]);
        let image = loader.load_image("checker.bmp").unwrap();
        assert_eq!(image.dimensions(), (256, 256));
    }
}
