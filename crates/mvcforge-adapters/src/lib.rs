//! Infrastructure adapters for mvcforge.
//!
//! This crate implements the ports defined in
//! `mvcforge-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod archive;
pub mod filesystem;
pub mod skeleton;

// Re-export commonly used adapters
pub use archive::TarGzExtractor;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use skeleton::{DirSkeletonCache, GithubSkeletonSource};
