// Copyright 2026 Oxide Computer Company

//! Revision resolution and content-addressed materialization for git links.
//!
//! A *git link* (`[access-point:]location[::object]`, parsed by the
//! [`git-link`](https://crates.io/crates/git-link) crate) points at a file as
//! it existed at some revision. This crate turns such links into local files:
//!
//! 1. For file-form links, it finds the enclosing repository by walking up
//!    from the file ([`locate_repository`]).
//! 2. It resolves the object to its canonical hash with `git rev-parse`,
//!    locally or on a remote host through `ssh` ([`Vcs`], [`Executor`]).
//! 3. It fetches the content with `git show` into a cache directory keyed by
//!    that hash, unless it is already there ([`Materializer`]).
//!
//! Every operation is synchronous: each git invocation runs to completion
//! before control returns.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use git_link::Reference;
//! use git_link_vcs::{Config, GitLinks};
//!
//! let links = GitLinks::new(Config::from_env()?);
//!
//! // Bare form: the location is the repository metadata directory.
//! let readme = links.resolve_and_open("/src/repo/.git::v1.0:README.md")?;
//!
//! // File form: the location is a file in a working tree.
//! let link: Reference = "/src/repo/docs/guide.md::master".parse()?;
//! let guide = links.resolve_from_file_path(&link)?;
//!
//! // When authoring a new link.
//! let branch = links.current_branch_name(Utf8Path::new("/src/repo/.git"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

mod config;
mod errors;
mod exec;
mod links;
mod locate;
mod materialize;
mod vcs;

pub use config::{
    Config, DEFAULT_GIT, DEFAULT_METADATA_DIR, DEFAULT_REMOTE_SHELL,
};
pub use errors::{
    AtomicWriteError, ConfigError, GitLinkError, LocateError,
    MaterializeError, ReadObjectError, ResolveError, RunError, VcsError,
};
pub use exec::{CommandOutput, Executor, ProcessExecutor, remote_command_line};
pub use links::{DEFAULT_REVISION, GitLinks};
pub use locate::{RepositoryLocation, locate_repository};
pub use materialize::{CACHE_DIR_PREFIX, Materializer};
pub use vcs::Vcs;
