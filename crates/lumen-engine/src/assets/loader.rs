use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::AssetError;

/// Subdirectory holding WGSL sources.
pub const SHADERS_DIR: &str = "shaders";

/// Subdirectory holding images.
pub const IMAGES_DIR: &str = "images";

/// Name of the content directory looked up next to the executable.
const CONTENT_DIR: &str = "content";

/// Reads example assets relative to a content directory.
///
/// The directory is the first existing entry of `candidates`, chosen on the
/// first load and kept for the loader's lifetime. When none exists the first
/// candidate is used so errors name a sensible path.
#[derive(Debug)]
pub struct AssetLoader {
    candidates: Vec<PathBuf>,
    base: OnceLock<PathBuf>,
}

impl AssetLoader {
    /// Creates a loader that picks its base directory lazily from `candidates`.
    pub fn new(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
            base: OnceLock::new(),
        }
    }

    /// Creates a loader with `<executable dir>/content` as the first candidate,
    /// followed by `fallbacks`.
    pub fn beside_executable(fallbacks: impl IntoIterator<Item = PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let candidates = exe_dir
            .map(|dir| dir.join(CONTENT_DIR))
            .into_iter()
            .chain(fallbacks);

        Self::new(candidates)
    }

    /// Base directory every relative path is resolved against.
    pub fn base_dir(&self) -> &Path {
        self.base.get_or_init(|| {
            let base = self
                .candidates
                .iter()
                .find(|dir| dir.is_dir())
                .or_else(|| self.candidates.first())
                .cloned()
                .unwrap_or_default();
            log::debug!("asset base directory: {}", base.display());
            base
        })
    }

    /// Resolves `relative` against the base directory.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base_dir().join(relative)
    }

    /// Reads the whole file into a fresh buffer owned by the caller.
    pub fn load(&self, relative: impl AsRef<Path>) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve(relative);
        match std::fs::read(&path) {
            Ok(bytes) => {
                log::trace!("loaded {} ({} bytes)", path.display(), bytes.len());
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound { path }),
            Err(source) => Err(AssetError::Read { path, source }),
        }
    }

    /// Reads `shaders/<name>` as WGSL source.
    pub fn load_wgsl(&self, name: &str) -> Result<String, AssetError> {
        let relative = Path::new(SHADERS_DIR).join(name);
        let bytes = self.load(&relative)?;
        String::from_utf8(bytes).map_err(|source| AssetError::Utf8 {
            path: self.resolve(&relative),
            source,
        })
    }

    /// Reads `shaders/<name>` and compiles it into a shader module.
    pub fn load_shader(
        &self,
        device: &wgpu::Device,
        name: &str,
    ) -> Result<wgpu::ShaderModule, AssetError> {
        let source = self.load_wgsl(name)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        }))
    }

    /// Reads `images/<name>` and decodes it to tightly packed RGBA8.
    pub fn load_image(&self, name: &str) -> Result<image::RgbaImage, AssetError> {
        let relative = Path::new(IMAGES_DIR).join(name);
        let bytes = self.load(&relative)?;
        image::load_from_memory(&bytes)
            .map(|img| img.to_rgba8())
            .map_err(|source| AssetError::Decode {
                path: self.resolve(&relative),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn loader_in(dir: &Path) -> AssetLoader {
        AssetLoader::new([dir.to_path_buf()])
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let present = dir.path().join("present");
        fs::create_dir(&present).unwrap();

        let loader = AssetLoader::new([missing, present.clone()]);
        assert_eq!(loader.base_dir(), present.as_path());
    }

    #[test]
    fn base_dir_is_chosen_once() {
        let dir = tempfile::tempdir().unwrap();
        let late = dir.path().join("late");
        let fallback = dir.path().join("fallback");
        fs::create_dir(&fallback).unwrap();

        let loader = AssetLoader::new([late.clone(), fallback.clone()]);
        assert_eq!(loader.base_dir(), fallback.as_path());

        // Creating the preferred directory afterwards does not move the base.
        fs::create_dir(&late).unwrap();
        assert_eq!(loader.base_dir(), fallback.as_path());
    }

    #[test]
    fn repeated_loads_return_independent_equal_buffers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [1u8, 2, 3, 4]).unwrap();
        let loader = loader_in(dir.path());

        let mut first = loader.load("blob.bin").unwrap();
        let second = loader.load("blob.bin").unwrap();
        assert_eq!(first, second);

        first[0] = 99;
        assert_eq!(second, vec![1, 2, 3, 4]);
    }

    #[test]
    fn contents_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shader.txt");
        fs::write(&path, b"one").unwrap();
        let loader = loader_in(dir.path());

        assert_eq!(loader.load("shader.txt").unwrap(), b"one");
        fs::write(&path, b"two").unwrap();
        assert_eq!(loader.load("shader.txt").unwrap(), b"two");

        fs::remove_file(&path).unwrap();
        let err = loader.load("shader.txt").unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn wgsl_must_be_utf8() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(SHADERS_DIR)).unwrap();
        fs::write(dir.path().join(SHADERS_DIR).join("bad.wgsl"), [0xff, 0xfe]).unwrap();
        fs::write(dir.path().join(SHADERS_DIR).join("good.wgsl"), "// ok").unwrap();
        let loader = loader_in(dir.path());

        assert!(matches!(loader.load_wgsl("bad.wgsl"), Err(AssetError::Utf8 { .. })));
        assert_eq!(loader.load_wgsl("good.wgsl").unwrap(), "// ok");
    }

    #[test]
    fn undecodable_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(IMAGES_DIR)).unwrap();
        fs::write(dir.path().join(IMAGES_DIR).join("noise.bmp"), b"not an image").unwrap();
        let loader = loader_in(dir.path());

        assert!(matches!(loader.load_image("noise.bmp"), Err(AssetError::Decode { .. })));
    }

    #[test]
    fn image_is_decoded_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(IMAGES_DIR)).unwrap();
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        img.save(dir.path().join(IMAGES_DIR).join("tiny.png")).unwrap();
        let loader = loader_in(dir.path());

        let loaded = loader.load_image("tiny.png").unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }
}
