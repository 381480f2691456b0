//! Skeleton source and cache adapters.

mod cache;
mod github;

pub use cache::DirSkeletonCache;
pub use github::GithubSkeletonSource;
