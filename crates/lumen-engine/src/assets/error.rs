use std::path::PathBuf;

/// Failure to load an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read asset {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader {} is not valid UTF-8", .path.display())]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to decode image {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AssetError {
    /// Path the failed load was resolved to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            AssetError::NotFound { path }
            | AssetError::Read { path, .. }
            | AssetError::Utf8 { path, .. }
            | AssetError::Decode { path, .. } => path,
        }
    }
}
