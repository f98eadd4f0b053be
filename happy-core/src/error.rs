//! Error types for happy-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while editing a draft.
#[derive(Debug, Error)]
pub enum FormError {
    /// `remove_image` was called with a position past the end of the list.
    #[error("image index {index} out of range (draft has {len} images)")]
    ImageIndexOutOfRange { index: usize, len: usize },

    /// Reading a selected image from disk failed.
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path handed to [`crate::ImageFile::open`] is not a regular file.
    #[error("not a file: {path}")]
    NotAFile { path: PathBuf },
}

/// All errors that can arise from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load: includes the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.happy/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// A tile URL was requested but no access token is configured.
    #[error("no map tile access token configured; set MAPBOX_TOKEN or `mapbox_token` in config")]
    MissingMapboxToken,
}
