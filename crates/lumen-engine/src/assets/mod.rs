//! Asset loading.
//!
//! Examples read their shaders and images through an `AssetLoader` during
//! `init`. The loader resolves the content directory once and never caches file
//! contents, so editing a shader and switching back to its example picks up the
//! new source.

mod error;
mod loader;

pub use error::AssetError;
pub use loader::{AssetLoader, IMAGES_DIR, SHADERS_DIR};
