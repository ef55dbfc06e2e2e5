// Copyright 2026 Oxide Computer Company

//! Finding the repository that encloses a file.

use crate::LocateError;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// The repository enclosing a file, as found by [`locate_repository`].
///
/// # Invariants
///
/// - `root` is an absolute path to the repository metadata (e.g.
///   `/src/repo/.git`).
/// - `root.parent().join(relative_path)` is the (expanded, normalized) path
///   that was searched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryLocation {
    root: Utf8PathBuf,
    relative_path: Utf8PathBuf,
}

impl RepositoryLocation {
    /// Returns the path to the repository metadata.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the directory containing the repository metadata, i.e. the
    /// top of the working tree.
    pub fn work_tree(&self) -> &Utf8Path {
        // `root` always has a parent: it is the metadata marker joined onto
        // an absolute directory.
        self.root.parent().unwrap_or(&self.root)
    }

    /// Returns the file's path relative to the working tree.
    pub fn relative_path(&self) -> &Utf8Path {
        &self.relative_path
    }

    /// Returns the relative path in the `/`-separated form git uses in
    /// `<rev>:<path>` expressions, regardless of platform.
    pub fn git_path(&self) -> String {
        self.relative_path
            .components()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Finds the nearest ancestor directory of `path` that contains
/// `metadata_dir`.
///
/// `path` does not need to exist. A leading `~` is expanded to the home
/// directory, and a relative path is taken relative to the current
/// directory. The walk starts at the directory containing `path` and ends
/// at the filesystem root; `metadata_dir` may be a directory or a file (as
/// with git worktrees and submodules).
pub fn locate_repository(
    path: &Utf8Path,
    metadata_dir: &str,
) -> Result<RepositoryLocation, LocateError> {
    let expanded = normalize(&expand(path)?);
    let not_found = || LocateError::NotFound {
        path: expanded.clone(),
        metadata_dir: metadata_dir.to_owned(),
    };

    let mut relative_path = match expanded.file_name() {
        Some(name) => Utf8PathBuf::from(name),
        None => return Err(not_found()),
    };
    let mut dir = match expanded.parent() {
        Some(dir) => dir,
        None => return Err(not_found()),
    };

    loop {
        let candidate = dir.join(metadata_dir);
        match candidate.try_exists() {
            Ok(true) => {
                tracing::debug!(
                    root = %candidate,
                    relative_path = %relative_path,
                    "found repository"
                );
                return Ok(RepositoryLocation {
                    root: candidate,
                    relative_path,
                });
            }
            Ok(false) => {}
            Err(source) => {
                return Err(LocateError::Io { path: candidate, source });
            }
        }

        match (dir.parent(), dir.file_name()) {
            (Some(parent), Some(name)) if !parent.as_str().is_empty() => {
                relative_path = Utf8Path::new(name).join(&relative_path);
                dir = parent;
            }
            _ => return Err(not_found()),
        }
    }
}

/// Makes `path` absolute, expanding a leading `~`.
fn expand(path: &Utf8Path) -> Result<Utf8PathBuf, LocateError> {
    let home_relative = match path.as_str() {
        "~" => Some(""),
        s => s.strip_prefix("~/"),
    };
    if let Some(rest) = home_relative {
        let home = dirs::home_dir()
            .ok_or_else(|| LocateError::HomeDir { path: path.to_owned() })?;
        let home = Utf8PathBuf::try_from(home).map_err(|error| {
            LocateError::NonUtf8 { path: error.into_path_buf() }
        })?;
        return Ok(home.join(rest));
    }

    if path.is_absolute() {
        return Ok(path.to_owned());
    }
    let cwd = std::env::current_dir().map_err(LocateError::CurrentDir)?;
    let cwd = Utf8PathBuf::try_from(cwd)
        .map_err(|error| LocateError::NonUtf8 { path: error.into_path_buf() })?;
    Ok(cwd.join(path))
}

/// Removes `.` components and resolves `..` lexically.
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_str()),
        }
    }
    out
}
