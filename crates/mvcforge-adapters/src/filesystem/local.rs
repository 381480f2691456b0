//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use mvcforge_core::{application::ports::Filesystem, error::ForgeResult};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| map_io_error(parent, e, "create directory"))?;
            }
        }
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> ForgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        for entry in WalkDir::new(from) {
            let entry = entry.map_err(|e| {
                map_io_error(from, io::Error::other(e), "walk directory")
            })?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| map_io_error(entry.path(), io::Error::other(e), "walk directory"))?;
            let destination = to.join(relative);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&destination)
                    .map_err(|e| map_io_error(&destination, e, "create directory"))?;
            } else {
                std::fs::copy(entry.path(), &destination)
                    .map_err(|e| map_io_error(&destination, e, "copy file"))?;
            }
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn create_scratch_dir(&self, prefix: &str) -> ForgeResult<PathBuf> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .map_err(|e| map_io_error(Path::new(prefix), e, "create scratch directory"))?;
        // The service is responsible for removal; detach from the guard.
        Ok(dir.keep())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> mvcforge_core::error::ForgeError {
    use mvcforge_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
