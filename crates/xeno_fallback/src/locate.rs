//! Decoder lookup across the search directories

use crate::{BcFormat, FallbackError};
use std::path::{Path, PathBuf};

/// First `<dir>/<decoder file>` that exists, walking `search_paths` in order.
pub fn locate_decoder<P: AsRef<Path>>(format: &str, search_paths: &[P]) -> Option<PathBuf> {
    locate_with(format, search_paths, |p| p.exists())
}

/// Same as [`locate_decoder`] with a caller-supplied existence check.
/// Stops at the first hit.
pub fn locate_with<P, F>(format: &str, search_paths: &[P], mut exists: F) -> Option<PathBuf>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> bool,
{
    let bc = BcFormat::from_name(format)?;
    let found = search_paths
        .iter()
        .map(|dir| dir.as_ref().join(bc.decoder_file()))
        .find(|candidate| exists(candidate));

    if found.is_none() {
        tracing::warn!(format, "no fallback SPV found");
    }
    found
}

/// Locate and read the whole decoder program for `format`.
pub fn load_decoder_blob<P: AsRef<Path>>(format: &str, search_paths: &[P]) -> Result<Vec<u8>, FallbackError> {
    if BcFormat::from_name(format).is_none() {
        return Err(FallbackError::UnknownFormat { format: format.to_string() });
    }
    let path = locate_decoder(format, search_paths).ok_or_else(|| FallbackError::NotFound {
        format: format.to_string(),
    })?;
    std::fs::read(&path).map_err(|source| FallbackError::Io { path, source })
}
