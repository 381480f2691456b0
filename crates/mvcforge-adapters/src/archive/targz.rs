//! Gzipped tarball extraction.
//!
//! Skeleton archives wrap the whole tree in a single top-level directory
//! (`<repo>-<revision>/...`); extraction unpacks into the scratch directory
//! and returns that root.

use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

use mvcforge_core::{
    application::{ApplicationError, ports::ArchiveExtractor},
    error::ForgeResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for TarGzExtractor {
    fn extract_root(&self, archive: &Path, scratch: &Path) -> ForgeResult<PathBuf> {
        debug!(archive = %archive.display(), scratch = %scratch.display(), "Extracting archive");

        let file = std::fs::File::open(archive)
            .map_err(|e| ApplicationError::archive(format!("cannot open archive: {e}")))?;
        Archive::new(GzDecoder::new(file))
            .unpack(scratch)
            .map_err(|e| ApplicationError::archive(format!("cannot unpack archive: {e}")))?;

        single_root(scratch)
    }
}

/// The one directory the archive unpacked into `scratch`.
fn single_root(scratch: &Path) -> ForgeResult<PathBuf> {
    let mut dirs = Vec::new();
    let entries = std::fs::read_dir(scratch)
        .map_err(|e| ApplicationError::filesystem(scratch, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ApplicationError::filesystem(scratch, e))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        } else {
            return Err(ApplicationError::archive(
                "archive has loose files at the top level",
            )
            .into());
        }
    }
    match dirs.as_slice() {
        [root] => Ok(root.clone()),
        [] => Err(ApplicationError::archive("archive is empty").into()),
        _ => Err(ApplicationError::archive("archive has multiple top-level entries").into()),
    }
}
