//! Directory-backed skeleton archive cache.
//!
//! Entries are keyed by revision identifier: `<cache dir>/<revision>.tar.gz`.
//! The newest entry (by modification time, ties broken by the greatest
//! revision id) is the offline fallback when the remote cannot be reached.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use mvcforge_core::{
    application::{ApplicationError, ports::{CachedArchive, SkeletonCache}},
    error::ForgeResult,
};

const ARCHIVE_EXT: &str = "tar.gz";

/// Skeleton cache over a local directory.
pub struct DirSkeletonCache {
    dir: PathBuf,
}

impl DirSkeletonCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SkeletonCache for DirSkeletonCache {
    fn entry_path(&self, revision: &str) -> ForgeResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ApplicationError::filesystem(&self.dir, e))?;
        Ok(self.dir.join(format!("{revision}.{ARCHIVE_EXT}")))
    }

    fn contains(&self, revision: &str) -> bool {
        self.dir.join(format!("{revision}.{ARCHIVE_EXT}")).is_file()
    }

    fn most_recent(&self) -> ForgeResult<Option<CachedArchive>> {
        if !self.dir.is_dir() {
            return Ok(None);
        }
        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| ApplicationError::filesystem(&self.dir, e))?;

        let mut newest: Option<(SystemTime, CachedArchive)> = None;
        for entry in entries {
            let entry = entry.map_err(|e| ApplicationError::filesystem(&self.dir, e))?;
            let path = entry.path();
            let Some(revision) = revision_of(&path) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            let candidate = CachedArchive { revision, path };

            let newer = match &newest {
                None => true,
                Some((best_time, best)) => {
                    modified > *best_time
                        || (modified == *best_time && candidate.revision > best.revision)
                }
            };
            if newer {
                newest = Some((modified, candidate));
            }
        }

        if let Some((_, archive)) = &newest {
            debug!(revision = %archive.revision, "Newest cached skeleton");
        }
        Ok(newest.map(|(_, archive)| archive))
    }
}

/// `<revision>.tar.gz` → `<revision>`; anything else is not a cache entry.
fn revision_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let revision = name.strip_suffix(&format!(".{ARCHIVE_EXT}"))?;
    if revision.is_empty() || !path.is_file() {
        None
    } else {
        Some(revision.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn entry_paths_are_keyed_by_revision() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirSkeletonCache::new(dir.path());
        let path = cache.entry_path("abc123").unwrap();
        assert_eq!(path, dir.path().join("abc123.tar.gz"));
        assert!(!cache.contains("abc123"));

        fs::write(&path, b"archive").unwrap();
        assert!(cache.contains("abc123"));
    }

    #[test]
    fn most_recent_prefers_newer_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirSkeletonCache::new(dir.path());

        let old = cache.entry_path("older").unwrap();
        fs::write(&old, b"old").unwrap();
        let old_time = SystemTime::UNIX_EPOCH;
        fs::OpenOptions::new()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(old_time)
            .unwrap();

        let new = cache.entry_path("newer").unwrap();
        fs::write(&new, b"new").unwrap();

        let found = cache.most_recent().unwrap().unwrap();
        assert_eq!(found.revision, "newer");
    }

    #[test]
    fn non_archive_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirSkeletonCache::new(dir.path());
        fs::write(dir.path().join("notes.txt"), b"not an archive").unwrap();
        assert!(cache.most_recent().unwrap().is_none());
    }

    #[test]
    fn empty_cache_has_no_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirSkeletonCache::new(dir.path());
        assert!(cache.most_recent().unwrap().is_none());
    }
}
