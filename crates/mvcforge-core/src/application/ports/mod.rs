//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `mvcforge-adapters` implement
//! these.
//!
//! - `Filesystem`: file operations under the project root
//! - `SkeletonSource`: remote skeleton discovery and download
//! - `SkeletonCache`: local archive cache with newest-revision fallback
//! - `ArchiveExtractor`: unpacking downloaded archives

pub mod output;

pub use output::{ArchiveExtractor, CachedArchive, Filesystem, SkeletonCache, SkeletonSource};
