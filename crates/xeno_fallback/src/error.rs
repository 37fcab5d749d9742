use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or loading a decoder program.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("format '{format}' is not a BCn format")]
    UnknownFormat { format: String },

    #[error("no fallback decoder found for '{format}'")]
    NotFound { format: String },

    #[error("failed to read decoder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
