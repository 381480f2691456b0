//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config` path, or the default location if it exists)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote skeleton settings for `create project`.
    pub skeleton: SkeletonConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Source generation settings.
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    /// GitHub repository the skeleton is fetched from, `owner/name` form.
    pub repository: String,
    /// Directory for cached skeleton archives.  `None` means the platform
    /// cache dir.
    pub cache_dir: Option<PathBuf>,
    /// Connect and read timeout for skeleton requests, in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Emit docblocks in generated sources unless a command says otherwise.
    pub docblocks: bool,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            repository: "zendframework/ZendSkeletonApplication".into(),
            cache_dir: None,
            timeout_secs: 30,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { docblocks: true }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`.  An explicit
    /// path must exist; the default location is read only when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = match config_file {
            Some(explicit) => {
                if !explicit.exists() {
                    anyhow::bail!("config file not found: {}", explicit.display());
                }
                explicit.clone()
            }
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.mvcforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "mvcforge", "mvcforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".mvcforge.toml"))
    }

    /// Directory for cached skeleton archives.
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.skeleton.cache_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("com", "mvcforge", "mvcforge")
            .map(|d| d.cache_dir().join("skeleton"))
            .unwrap_or_else(|| PathBuf::from(".mvcforge-cache"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_repository_is_the_upstream_skeleton() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.skeleton.repository,
            "zendframework/ZendSkeletonApplication"
        );
    }

    #[test]
    fn default_docblocks_enabled() {
        assert!(AppConfig::default().generator.docblocks);
    }

    #[test]
    fn load_without_explicit_file_falls_back_to_defaults() {
        // The default config location almost certainly does not exist in the
        // test environment; either way load() must succeed.
        let cfg = AppConfig::load(None).unwrap();
        assert!(cfg.skeleton.timeout_secs > 0);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/nonexistent/mvcforge.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[skeleton]\ntimeout_secs = 5\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.skeleton.timeout_secs, 5);
        assert_eq!(
            cfg.skeleton.repository,
            "zendframework/ZendSkeletonApplication"
        );
        assert!(cfg.generator.docblocks);
    }

    #[test]
    fn cache_dir_override_wins() {
        let mut cfg = AppConfig::default();
        cfg.skeleton.cache_dir = Some(PathBuf::from("/tmp/custom-cache"));
        assert_eq!(cfg.cache_dir(), PathBuf::from("/tmp/custom-cache"));
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
