// Copyright 2026 Oxide Computer Company

//! Configuration for resolving git links.

use crate::ConfigError;
use camino::{Utf8Path, Utf8PathBuf};

/// The default version-control program.
pub const DEFAULT_GIT: &str = "git";

/// The default remote-execution program.
pub const DEFAULT_REMOTE_SHELL: &str = "ssh";

/// The default repository metadata marker.
pub const DEFAULT_METADATA_DIR: &str = ".git";

/// Reads a program name or path from an environment variable, falling
/// back to `default` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_env(var: &'static str, default: &str) -> Result<String, ConfigError> {
    Ok(read_env_opt(var)?.unwrap_or_else(|| default.to_owned()))
}

fn read_env_opt(var: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_owned()))
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(ConfigError::NonUtf8 { var, value })
        }
    }
}

/// Which external programs to run, and where to cache their output.
///
/// Passed to [`GitLinks`](crate::GitLinks) and
/// [`ProcessExecutor`](crate::ProcessExecutor) at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    git: String,
    remote_shell: String,
    cache_root: Utf8PathBuf,
    metadata_dir: String,
}

impl Config {
    /// Creates a configuration with default programs and the given cache
    /// root.
    pub fn new(cache_root: impl Into<Utf8PathBuf>) -> Self {
        Config {
            git: DEFAULT_GIT.to_owned(),
            remote_shell: DEFAULT_REMOTE_SHELL.to_owned(),
            cache_root: cache_root.into(),
            metadata_dir: DEFAULT_METADATA_DIR.to_owned(),
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// - `$GIT`: the version-control program (default `git`).
    /// - `$GIT_LINK_REMOTE_SHELL`: the remote-execution program (default
    ///   `ssh`).
    /// - `$GIT_LINK_CACHE_DIR`: the cache root (default: the process temp
    ///   directory).
    ///
    /// Unset, empty and whitespace-only variables take the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_root = match read_env_opt("GIT_LINK_CACHE_DIR")? {
            Some(dir) => Utf8PathBuf::from(dir),
            None => {
                let temp = std::env::temp_dir();
                Utf8PathBuf::try_from(temp).map_err(|error| {
                    ConfigError::NonUtf8TempDir { path: error.into_path_buf() }
                })?
            }
        };
        Ok(Config {
            git: read_env("GIT", DEFAULT_GIT)?,
            remote_shell: read_env(
                "GIT_LINK_REMOTE_SHELL",
                DEFAULT_REMOTE_SHELL,
            )?,
            cache_root,
            metadata_dir: DEFAULT_METADATA_DIR.to_owned(),
        })
    }

    /// Overrides the version-control program.
    pub fn with_git(mut self, git: impl Into<String>) -> Self {
        self.git = git.into();
        self
    }

    /// Overrides the remote-execution program.
    pub fn with_remote_shell(
        mut self,
        remote_shell: impl Into<String>,
    ) -> Self {
        self.remote_shell = remote_shell.into();
        self
    }

    /// Overrides the cache root.
    pub fn with_cache_root(
        mut self,
        cache_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    /// Overrides the repository metadata marker.
    pub fn with_metadata_dir(
        mut self,
        metadata_dir: impl Into<String>,
    ) -> Self {
        self.metadata_dir = metadata_dir.into();
        self
    }

    /// Returns the version-control program.
    pub fn git(&self) -> &str {
        &self.git
    }

    /// Returns the remote-execution program.
    pub fn remote_shell(&self) -> &str {
        &self.remote_shell
    }

    /// Returns the cache root.
    pub fn cache_root(&self) -> &Utf8Path {
        &self.cache_root
    }

    /// Returns the repository metadata marker.
    pub fn metadata_dir(&self) -> &str {
        &self.metadata_dir
    }
}
