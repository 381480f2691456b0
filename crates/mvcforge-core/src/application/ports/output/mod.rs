//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `mvcforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `mvcforge_adapters::filesystem::LocalFilesystem` (production)
/// - `mvcforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Read a file into a string.
    fn read_file(&self, path: &Path) -> ForgeResult<String>;

    /// Copy a single file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()>;

    /// Recursively copy a directory tree into `to`.
    fn copy_tree(&self, from: &Path, to: &Path) -> ForgeResult<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Create a fresh scratch directory for intermediate extraction work.
    /// The caller removes it when done.
    fn create_scratch_dir(&self, prefix: &str) -> ForgeResult<PathBuf>;
}

/// Port for remote skeleton discovery and download.
///
/// Implemented by `mvcforge_adapters::skeleton::GithubSkeletonSource`.
pub trait SkeletonSource: Send + Sync {
    /// Identifier of the newest revision of the skeleton, e.g. a commit id.
    fn latest_revision(&self) -> ForgeResult<String>;

    /// Download the archive for `revision` to `destination`.
    fn download(&self, revision: &str, destination: &Path) -> ForgeResult<()>;
}

/// An archive found in the local cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArchive {
    pub revision: String,
    pub path: PathBuf,
}

/// Port for the local skeleton archive cache.
///
/// Implemented by `mvcforge_adapters::skeleton::DirSkeletonCache`.
pub trait SkeletonCache: Send + Sync {
    /// Where the archive for `revision` is stored (whether or not present).
    fn entry_path(&self, revision: &str) -> ForgeResult<PathBuf>;

    /// Is the archive for `revision` already cached?
    fn contains(&self, revision: &str) -> bool;

    /// The newest cached archive, for offline fallback. Ties between
    /// entries are broken by the greatest revision id.
    fn most_recent(&self) -> ForgeResult<Option<CachedArchive>>;
}

/// Port for unpacking a downloaded skeleton archive.
///
/// Implemented by `mvcforge_adapters::archive::TarGzExtractor`.
pub trait ArchiveExtractor: Send + Sync {
    /// Unpack `archive` into `scratch` and return the skeleton root
    /// directory inside it (archives wrap everything in one top folder).
    fn extract_root(&self, archive: &Path, scratch: &Path) -> ForgeResult<PathBuf>;
}
