//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use mvcforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ForgeResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    scratch_counter: u64,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating parent directories (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            add_dirs(&mut inner.directories, parent);
        }
        inner.files.insert(path, content.into());
    }

    /// Seed an empty directory tree (testing helper).
    pub fn seed_dir(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.write().unwrap();
        add_dirs(&mut inner.directories, &path.into());
    }

    /// List all files (testing helper).
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }
}

fn add_dirs(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn lock_error(path: &Path) -> mvcforge_core::error::ForgeError {
    ApplicationError::filesystem(path, "filesystem lock poisoned").into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        add_dirs(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        if let Some(parent) = path.parent() {
            add_dirs(&mut inner.directories, parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ForgeResult<String> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::filesystem(path, "file not found").into())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        let content = self.read_file(from)?;
        self.write_file(to, &content)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(from))?;
        if !inner.directories.contains(from) {
            return Err(ApplicationError::filesystem(from, "directory not found").into());
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|d| d.starts_with(from))
            .cloned()
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter(|(p, _)| p.starts_with(from))
            .map(|(p, c)| (p.clone(), c.clone()))
            .collect();

        for dir in dirs {
            let relative = dir.strip_prefix(from).unwrap().to_path_buf();
            add_dirs(&mut inner.directories, &to.join(relative));
        }
        for (path, content) in files {
            let relative = path.strip_prefix(from).unwrap().to_path_buf();
            let destination = to.join(relative);
            if let Some(parent) = destination.parent() {
                add_dirs(&mut inner.directories, parent);
            }
            inner.files.insert(destination, content);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn create_scratch_dir(&self, prefix: &str) -> ForgeResult<PathBuf> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_error(Path::new(prefix)))?;
        inner.scratch_counter += 1;
        let path = PathBuf::from(format!("/scratch/{prefix}-{}", inner.scratch_counter));
        add_dirs(&mut inner.directories, &path);
        Ok(path)
    }
}
