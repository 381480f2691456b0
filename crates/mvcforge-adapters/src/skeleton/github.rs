//! GitHub-backed skeleton source.
//!
//! The latest revision is the head commit of the skeleton repository's
//! default branch, queried through the GitHub commits API. Archives come
//! from codeload as `.tar.gz` snapshots of that revision.
//!
//! Both requests run with connect and read timeouts; the service layer
//! decides whether a failure degrades to the cache or aborts.

use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use mvcforge_core::{
    application::{ApplicationError, ports::SkeletonSource},
    error::{ForgeError, ForgeResult},
};

const USER_AGENT: &str = concat!("mvcforge/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
}

/// Skeleton source backed by a GitHub repository, e.g.
/// `zendframework/ZendSkeletonApplication`.
pub struct GithubSkeletonSource {
    repository: String,
    client: reqwest::blocking::Client,
}

impl GithubSkeletonSource {
    pub fn new(repository: impl Into<String>, timeout: Duration) -> ForgeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ForgeError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            repository: repository.into(),
            client,
        })
    }

    fn commits_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/commits?per_page=1",
            self.repository
        )
    }

    fn archive_url(&self, revision: &str) -> String {
        format!(
            "https://codeload.github.com/{}/tar.gz/{}",
            self.repository, revision
        )
    }
}

impl SkeletonSource for GithubSkeletonSource {
    fn latest_revision(&self) -> ForgeResult<String> {
        let url = self.commits_url();
        debug!(%url, "Querying latest skeleton revision");

        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| ApplicationError::network(e))?;

        let commits: Vec<CommitEntry> = serde_json::from_str(&body)
            .map_err(|e| ApplicationError::network(format!("unexpected commits payload: {e}")))?;

        commits
            .into_iter()
            .next()
            .map(|c| c.sha)
            .ok_or_else(|| ApplicationError::network("commit list is empty").into())
    }

    fn download(&self, revision: &str, destination: &Path) -> ForgeResult<()> {
        let url = self.archive_url(revision);
        debug!(%url, destination = %destination.display(), "Downloading skeleton archive");

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApplicationError::filesystem(parent, e))?;
        }

        let mut response = self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| ApplicationError::network(e))?;

        // Download to a sibling then rename, so the cache never holds a
        // half-written entry.
        let partial = destination.with_extension("partial");
        let result = write_body(&mut response, &partial)
            .and_then(|_| {
                std::fs::rename(&partial, destination)
                    .map_err(|e| ApplicationError::filesystem(destination, e).into())
            });
        if result.is_err() {
            let _ = std::fs::remove_file(&partial);
        }
        result
    }
}

fn write_body(response: &mut reqwest::blocking::Response, path: &Path) -> ForgeResult<()> {
    let mut file =
        std::fs::File::create(path).map_err(|e| ApplicationError::filesystem(path, e))?;
    io::copy(response, &mut file)
        .map(|_| ())
        .map_err(|e| ApplicationError::filesystem(path, e).into())
}
