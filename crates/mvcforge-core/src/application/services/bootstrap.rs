//! Skeleton bootstrap - materialize a fresh application tree.
//!
//! The network-with-cached-fallback behavior is an explicit state machine,
//! not nested conditionals, so the fatal-vs-recoverable boundary stays
//! visible and testable:
//!
//! ```text
//! ResolveRevision ──ok──▶ EnsureArchive ──▶ PreflightTarget ──▶ ExtractAndMerge
//!       │ network failure        │ download failure: fatal
//!       ▼
//! UseCachedFallback (newest cached archive, or fatal CacheEmpty)
//! ```
//!
//! A revision that resolved but then fails to download is fatal; there is
//! no silent fallback once the remote answered.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArchiveExtractor, Filesystem, SkeletonCache, SkeletonSource},
    },
    error::{ForgeError, ForgeResult},
};

/// What `create_project` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReport {
    pub path: PathBuf,
    pub revision: String,
    /// True when the archive came from the cache instead of the network.
    pub from_cache: bool,
}

enum State {
    ResolveRevision,
    EnsureArchive { revision: String },
    PreflightTarget { archive: CacheHit },
    ExtractAndMerge { archive: CacheHit },
    Done(ProjectReport),
}

struct CacheHit {
    revision: String,
    path: PathBuf,
    from_cache: bool,
}

/// Bootstraps a new project from the remote skeleton.
pub struct BootstrapService {
    filesystem: Box<dyn Filesystem>,
    source: Box<dyn SkeletonSource>,
    cache: Box<dyn SkeletonCache>,
    extractor: Box<dyn ArchiveExtractor>,
}

impl BootstrapService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        source: Box<dyn SkeletonSource>,
        cache: Box<dyn SkeletonCache>,
        extractor: Box<dyn ArchiveExtractor>,
    ) -> Self {
        Self {
            filesystem,
            source,
            cache,
            extractor,
        }
    }

    /// Create a new application tree at `target`. Strictly additive: an
    /// existing target directory aborts before anything is downloaded into
    /// place.
    #[instrument(skip_all, fields(target = %target.display()))]
    pub fn create_project(&self, target: &Path) -> ForgeResult<ProjectReport> {
        let mut state = State::ResolveRevision;
        loop {
            state = match state {
                State::ResolveRevision => match self.source.latest_revision() {
                    Ok(revision) => {
                        info!(%revision, "Resolved latest skeleton revision");
                        State::EnsureArchive { revision }
                    }
                    Err(err) => {
                        warn!(error = %err, "Revision check failed, trying cached fallback");
                        match self.cache.most_recent()? {
                            Some(cached) => State::PreflightTarget {
                                archive: CacheHit {
                                    revision: cached.revision,
                                    path: cached.path,
                                    from_cache: true,
                                },
                            },
                            None => return Err(ApplicationError::CacheEmpty.into()),
                        }
                    }
                },

                State::EnsureArchive { revision } => {
                    let path = self.cache.entry_path(&revision)?;
                    if self.cache.contains(&revision) {
                        info!(%revision, "Reusing cached skeleton archive");
                        State::PreflightTarget {
                            archive: CacheHit {
                                revision,
                                path,
                                from_cache: true,
                            },
                        }
                    } else {
                        info!(%revision, "Downloading skeleton archive");
                        // Download failure after a resolved revision is
                        // fatal, never a fallback.
                        self.source.download(&revision, &path).map_err(|err| {
                            ForgeError::from(ApplicationError::archive(format!(
                                "download of revision {revision} failed: {err}"
                            )))
                        })?;
                        State::PreflightTarget {
                            archive: CacheHit {
                                revision,
                                path,
                                from_cache: false,
                            },
                        }
                    }
                }

                State::PreflightTarget { archive } => {
                    if self.filesystem.exists(target) {
                        return Err(ApplicationError::TargetExists {
                            path: target.to_path_buf(),
                        }
                        .into());
                    }
                    State::ExtractAndMerge { archive }
                }

                State::ExtractAndMerge { archive } => {
                    let scratch = self.filesystem.create_scratch_dir("mvcforge-skeleton")?;
                    let copied = self
                        .extractor
                        .extract_root(&archive.path, &scratch)
                        .and_then(|root| {
                            self.filesystem.create_dir_all(target)?;
                            self.filesystem.copy_tree(&root, target)
                        });
                    // Scratch removal runs on both exit paths.
                    if let Err(err) = self.filesystem.remove_dir_all(&scratch) {
                        warn!(error = %err, "Failed to remove scratch directory");
                    }
                    copied?;
                    State::Done(ProjectReport {
                        path: target.to_path_buf(),
                        revision: archive.revision,
                        from_cache: archive.from_cache,
                    })
                }

                State::Done(report) => {
                    info!(path = %report.path.display(), "Project created");
                    return Ok(report);
                }
            };
        }
    }
}
