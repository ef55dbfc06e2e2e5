// Copyright 2026 Oxide Computer Company

//! Error types for git link resolution and materialization.

use camino::Utf8PathBuf;
use git_link::{AccessPoint, ContentHash, Reference, ReferenceParseError};
use std::{ffi::OsString, io, path::PathBuf};
use thiserror::Error;

// ---- Configuration errors ----

/// An error from building a [`Config`](crate::Config) from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The environment variable is set but is not valid UTF-8.
    #[error(
        "${var} environment variable is not valid \
         UTF-8: {value:?}"
    )]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },

    /// The process temp directory, used as the default cache root, is not
    /// valid UTF-8.
    #[error("temp directory is not valid UTF-8: {path:?}")]
    NonUtf8TempDir {
        /// The temp directory.
        path: PathBuf,
    },
}

// ---- Execution errors ----

/// An error that occurs when a program cannot be run at all.
///
/// A program that runs and exits unsuccessfully is not a `RunError`; see
/// [`VcsError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// Failed to spawn the process.
    #[error("failed to run {program:?} for access point {access_point}")]
    SpawnFailed {
        /// The program that was invoked (the VCS, or the remote shell).
        program: String,
        /// The access point the invocation was for.
        access_point: AccessPoint,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The remote host starts with `-`, so the remote shell would read it
    /// as an option.
    #[error("refusing to run on remote host {host:?}: starts with '-'")]
    OptionLikeHost {
        /// The rejected host.
        host: String,
    },
}

/// The version-control program (or the remote shell wrapping it) exited
/// unsuccessfully.
#[derive(Debug, Error)]
#[error(
    "git {subcommand} {object:?} failed on {access_point} \
     ({exit_status}): {output}"
)]
#[non_exhaustive]
pub struct VcsError {
    /// The access point the command ran on.
    pub access_point: AccessPoint,
    /// The git subcommand (e.g. `rev-parse`, `show`).
    pub subcommand: &'static str,
    /// The object expression passed to the subcommand.
    pub object: String,
    /// A human-readable description of the exit status (e.g.,
    /// "exit status: 128" or "signal: 9").
    pub exit_status: String,
    /// Everything the command printed, stdout followed by stderr.
    pub output: String,
}

/// An error that occurs while resolving an object expression to a
/// [`ContentHash`](git_link::ContentHash).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The command could not be run.
    #[error(transparent)]
    Run(#[from] RunError),

    /// The command exited unsuccessfully.
    #[error(transparent)]
    Vcs(#[from] VcsError),
}

/// An error that occurs while reading the contents of an object.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadObjectError {
    /// The command could not be run.
    #[error(transparent)]
    Run(#[from] RunError),

    /// The command exited unsuccessfully.
    #[error(transparent)]
    Vcs(#[from] VcsError),
}

// ---- Locator errors ----

/// An error that occurs while looking for the repository enclosing a path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocateError {
    /// No ancestor directory of the path contains repository metadata.
    #[error("{path} is not inside a repository (no {metadata_dir} found)")]
    NotFound {
        /// The (expanded) path that was searched from.
        path: Utf8PathBuf,
        /// The metadata marker that was looked for.
        metadata_dir: String,
    },

    /// An I/O error occurred while probing for repository metadata.
    #[error("I/O error while checking for repository metadata at {path}")]
    Io {
        /// The path being checked when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A relative path was given but the current directory is unavailable.
    #[error("failed to determine the current directory")]
    CurrentDir(#[source] io::Error),

    /// A `~` path was given but the home directory is unknown.
    #[error("cannot expand {path}: home directory is unknown")]
    HomeDir {
        /// The path that needed expansion.
        path: Utf8PathBuf,
    },

    /// The current or home directory is not valid UTF-8.
    #[error("directory is not valid UTF-8: {path:?}")]
    NonUtf8 {
        /// The offending directory.
        path: PathBuf,
    },
}

// ---- Materialization errors ----

/// Errors that can occur while materializing an object into the cache.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaterializeError {
    /// Resolving the object to its content hash failed.
    #[error("failed to resolve object")]
    Resolve(#[from] ResolveError),

    /// Reading the object's contents failed.
    #[error("failed to read object contents")]
    ReadObject(#[from] ReadObjectError),

    /// The resolved hash is not usable as a single path component.
    #[error("resolved hash {hash:?} is not a valid cache key")]
    InvalidHash {
        /// The hash the resolver printed.
        hash: ContentHash,
    },

    /// Failed to create the cache directory.
    #[error("failed to create cache directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Failed to write the cached file.
    #[error("failed to write cached object to {path}")]
    WriteOutput {
        /// The path where the write failed.
        path: Utf8PathBuf,
        /// The underlying write error.
        #[source]
        error: AtomicWriteError,
    },
}

impl MaterializeError {
    /// Returns the underlying [`VcsError`], if the failure was git exiting
    /// unsuccessfully.
    pub fn vcs_error(&self) -> Option<&VcsError> {
        match self {
            MaterializeError::Resolve(ResolveError::Vcs(error))
            | MaterializeError::ReadObject(ReadObjectError::Vcs(error)) => {
                Some(error)
            }
            _ => None,
        }
    }
}

/// An error that occurred during an atomic file write.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AtomicWriteError {
    /// Writing contents to the temporary file failed.
    #[error("writing file contents failed")]
    Write(#[source] io::Error),

    /// The atomic write infrastructure failed (e.g., creating the
    /// temporary file, or renaming it into place).
    #[error("atomic create or rename failed")]
    Rename(#[source] io::Error),
}

// ---- Facade errors ----

/// Errors returned by [`GitLinks`](crate::GitLinks).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitLinkError {
    /// The link text is malformed.
    #[error("invalid git link")]
    Parse(#[from] ReferenceParseError),

    /// The file form was used with a link whose file is not inside a
    /// repository (or the search for one failed).
    #[error("failed to find the repository for the link")]
    Locate(#[from] LocateError),

    /// The file form was used with a non-local access point.
    #[error(
        "git link {reference} uses access point {access_point}, but file \
         links are only supported on localhost"
    )]
    UnsupportedAccessPoint {
        /// The offending link.
        reference: Reference,
        /// Its access point.
        access_point: AccessPoint,
    },

    /// Resolving or fetching the object failed.
    #[error("failed to materialize git link")]
    Materialize(#[from] MaterializeError),

    /// A command could not be run.
    #[error(transparent)]
    Run(#[from] RunError),
}

impl GitLinkError {
    /// Returns true if no enclosing repository was found.
    pub fn is_repository_not_found(&self) -> bool {
        matches!(self, GitLinkError::Locate(LocateError::NotFound { .. }))
    }

    /// Returns the underlying [`VcsError`], if the failure was git exiting
    /// unsuccessfully.
    pub fn vcs_error(&self) -> Option<&VcsError> {
        match self {
            GitLinkError::Materialize(error) => error.vcs_error(),
            _ => None,
        }
    }
}
