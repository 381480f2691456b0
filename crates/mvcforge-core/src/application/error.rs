//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a scaffold or bootstrap use case.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// The working directory is not a scaffolded application.
    #[error("No application found at {path}")]
    NotAProject { path: PathBuf },

    /// Bootstrap target already exists and is not empty.
    #[error("Target directory {path} already exists")]
    TargetExists { path: PathBuf },

    /// Remote skeleton lookup or download failed.
    #[error("Skeleton download failed: {reason}")]
    Network { reason: String },

    /// The skeleton cache has nothing to fall back on.
    #[error("No cached skeleton available")]
    CacheEmpty,

    /// A downloaded archive could not be unpacked.
    #[error("Archive error: {reason}")]
    Archive { reason: String },
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Filesystem {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn network(reason: impl ToString) -> Self {
        Self::Network {
            reason: reason.to_string(),
        }
    }

    pub fn archive(reason: impl ToString) -> Self {
        Self::Archive {
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::NotAProject { path } => vec![
                format!(
                    "Expected a module/ directory and config/application.config.php under {}",
                    path.display()
                ),
                "Run the command from the application root, or pass --path".into(),
                "Use 'mvcforge create project' to bootstrap a new application".into(),
            ],
            Self::TargetExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different target directory".into(),
            ],
            Self::Network { .. } => vec![
                "Check your network connection".into(),
                "A previously downloaded skeleton will be reused when one is cached".into(),
            ],
            Self::CacheEmpty => vec![
                "The skeleton could not be downloaded and nothing is cached yet".into(),
                "Connect to the network once to seed the cache".into(),
            ],
            Self::Archive { .. } => vec![
                "The downloaded archive appears to be corrupt".into(),
                "Clear the skeleton cache and try again".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { .. } | Self::Archive { .. } => ErrorCategory::Internal,
            Self::NotAProject { .. } => ErrorCategory::NotFound,
            Self::TargetExists { .. } => ErrorCategory::Validation,
            Self::Network { .. } | Self::CacheEmpty => ErrorCategory::Internal,
        }
    }
}
