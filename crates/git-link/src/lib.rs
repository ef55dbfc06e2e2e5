// Copyright 2026 Oxide Computer Company

//! Parsing types for git links.
//!
//! A *git link* is a compact, stable pointer to a file as it existed at some
//! revision of a repository. It is written as
//!
//! ```text
//! [access-point:]location[::object]
//! ```
//!
//! where `access-point` is either `localhost` or the name of a remote host
//! reachable through a remote shell, `location` is a path on that host, and
//! `object` is a revision expression understood by `git` (a branch, a tag,
//! `master@{2009-06-21}`, `HEAD~3:src/lib.rs`, and so on).
//!
//! This crate is purely syntactic: it never touches the filesystem or spawns
//! processes. For resolving links to file contents, see
//! [`git-link-vcs`](https://crates.io/crates/git-link-vcs).
//!
//! # Examples
//!
//! ```
//! use git_link::{AccessPoint, Reference};
//!
//! let link: Reference = "localhost:/src/repo/.git::master:README.md"
//!     .parse()
//!     .unwrap();
//! assert_eq!(link.access_point(), &AccessPoint::Local);
//! assert_eq!(link.location(), "/src/repo/.git");
//! assert_eq!(link.object(), "master:README.md");
//!
//! // Cached files are named after the last path segment of the object.
//! assert_eq!(git_link::derive_file_name(link.object()), "README.md");
//!
//! // The access point defaults to localhost.
//! let link: Reference = "/src/repo/README.md".parse().unwrap();
//! assert!(link.access_point().is_local());
//! assert_eq!(link.object(), "");
//! ```

#![deny(missing_docs)]

mod errors;
mod filename;
mod hash;
mod reference;

pub use errors::ReferenceParseError;
pub use filename::{FALLBACK_FILE_NAME, derive_file_name};
pub use hash::ContentHash;
pub use reference::{AccessPoint, OBJECT_DELIMITER, Reference};
