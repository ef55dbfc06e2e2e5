// Copyright 2026 Oxide Computer Company

//! Content-addressed materialization of git objects.

use crate::{
    AtomicWriteError, Executor, MaterializeError, ProcessExecutor, Vcs,
};
use atomicwrites::AtomicFile;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use git_link::{AccessPoint, ContentHash, derive_file_name};
use std::io::Write;

/// Prefix of every per-hash cache directory.
pub const CACHE_DIR_PREFIX: &str = "git-link-";

/// Materializes git objects into a content-addressed on-disk cache.
///
/// Each object lives at `<cache_root>/git-link-<hash>/<file name>`, where
/// the hash comes from `git rev-parse` and the file name from
/// [`derive_file_name`]. Once written, a cached file is never re-fetched or
/// overwritten by this process, and is never evicted.
///
/// The file name follows the object expression that asked for it, so a
/// hash reached through expressions with different base names (e.g. the
/// same blob at `a.txt` and `b.txt`) gets one file per name, all in the
/// same directory and all with identical content. A directory thus holds
/// one file per distinct name rather than exactly one file.
#[derive(Clone, Debug)]
pub struct Materializer<E = ProcessExecutor> {
    vcs: Vcs<E>,
    cache_root: Utf8PathBuf,
}

impl<E: Executor> Materializer<E> {
    /// Creates a new materializer caching under `cache_root`.
    ///
    /// `cache_root` does not need to exist yet.
    pub fn new(vcs: Vcs<E>, cache_root: impl Into<Utf8PathBuf>) -> Self {
        Materializer { vcs, cache_root: cache_root.into() }
    }

    /// Returns the VCS used to resolve and read objects.
    pub fn vcs(&self) -> &Vcs<E> {
        &self.vcs
    }

    /// Returns the cache root.
    pub fn cache_root(&self) -> &Utf8Path {
        &self.cache_root
    }

    /// Returns the cache directory for `hash`.
    ///
    /// This does not check `hash`; [`materialize`](Self::materialize)
    /// rejects hashes that are not a single path component before using
    /// this.
    pub fn cache_dir(&self, hash: &ContentHash) -> Utf8PathBuf {
        self.cache_root.join(format!("{CACHE_DIR_PREFIX}{hash}"))
    }

    /// Materializes `object` from the repository at `git_dir`, returning the
    /// path to a local file with its content.
    ///
    /// The object is always resolved to its hash. If the cached file for
    /// that hash already exists and is readable it is returned as is,
    /// without fetching anything. Otherwise the content is fetched with
    /// `git show` and written atomically. A failed fetch leaves no file
    /// behind.
    ///
    /// A hash that is empty, `.`, `..`, or contains a path separator or NUL
    /// is rejected with [`MaterializeError::InvalidHash`] before the
    /// filesystem is touched, so the cache never reaches outside
    /// `cache_root`.
    pub fn materialize(
        &self,
        access_point: &AccessPoint,
        git_dir: &str,
        object: &str,
    ) -> Result<Utf8PathBuf, MaterializeError> {
        let hash = self.vcs.resolve(access_point, git_dir, object)?;
        if !is_single_component(hash.as_str()) {
            return Err(MaterializeError::InvalidHash { hash });
        }
        let cache_dir = self.cache_dir(&hash);
        let output_path = cache_dir.join(derive_file_name(object));

        if is_readable_file(&output_path) {
            tracing::debug!(%hash, path = %output_path, "cache hit");
            return Ok(output_path);
        }

        let content = self.vcs.read_object(access_point, git_dir, object)?;

        // Other processes may be materializing the same hash concurrently;
        // the directory already existing is fine.
        fs::create_dir_all(&cache_dir).map_err(|error| {
            MaterializeError::CreateDir { path: cache_dir.clone(), error }
        })?;

        // Concurrent writers produce identical content, so last writer wins.
        AtomicFile::new(
            &output_path,
            atomicwrites::OverwriteBehavior::AllowOverwrite,
        )
        .write(|f| f.write_all(&content))
        .map_err(|error| {
            let error = match error {
                atomicwrites::Error::Internal(e) => AtomicWriteError::Rename(e),
                atomicwrites::Error::User(e) => AtomicWriteError::Write(e),
            };
            MaterializeError::WriteOutput { path: output_path.clone(), error }
        })?;

        tracing::debug!(%hash, path = %output_path, "materialized object");
        Ok(output_path)
    }
}

fn is_single_component(s: &str) -> bool {
    !matches!(s, "" | "." | "..") && !s.contains(['/', '\\', '\0'])
}

fn is_readable_file(path: &Utf8Path) -> bool {
    std::fs::File::open(path)
        .and_then(|f| f.metadata())
        .is_ok_and(|meta| meta.is_file())
}
