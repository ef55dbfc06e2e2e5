// Copyright 2026 Oxide Computer Company

//! Resolving and materializing objects from a real repository.

use crate::helpers::{git, setup_git_repo, write_file};
use anyhow::Result;
use camino::Utf8Path;
use git_link::AccessPoint;
use git_link_vcs::{
    CommandOutput, Config, Executor, MaterializeError, Materializer,
    ProcessExecutor, ResolveError, RunError, Vcs,
};
use std::{cell::Cell, fs};

/// Wraps an executor, counting `show` invocations.
struct CountingShows<E> {
    inner: E,
    shows: Cell<usize>,
}

impl<E> CountingShows<E> {
    fn new(inner: E) -> Self {
        CountingShows { inner, shows: Cell::new(0) }
    }
}

impl<E: Executor> Executor for CountingShows<E> {
    fn run(
        &self,
        access_point: &AccessPoint,
        args: &[String],
    ) -> Result<CommandOutput, RunError> {
        if args.iter().any(|a| a == "show") {
            self.shows.set(self.shows.get() + 1);
        }
        self.inner.run(access_point, args)
    }
}

fn process_executor() -> Result<ProcessExecutor> {
    Ok(ProcessExecutor::new(&Config::from_env()?))
}

fn git_dir(temp: &Utf8Path) -> String {
    temp.join("repo").join(".git").into_string()
}

#[test]
fn test_resolve_matches_rev_parse() -> Result<()> {
    let temp = setup_git_repo()?;
    let vcs = Vcs::new(process_executor()?);

    let hash = vcs.resolve(&AccessPoint::Local, &git_dir(temp.path()), "v2")?;
    let expected = git(&temp.path().join("repo"), &["rev-parse", "v2"])?;
    assert_eq!(
        hash.as_str(),
        expected.trim_end(),
        "hash should be rev-parse output without its newline"
    );

    Ok(())
}

#[test]
fn test_resolve_failure_is_vcs_error() -> Result<()> {
    let temp = setup_git_repo()?;
    let vcs = Vcs::new(process_executor()?);

    let result = vcs.resolve(
        &AccessPoint::Local,
        &git_dir(temp.path()),
        "no-such-branch",
    );
    let Err(ResolveError::Vcs(error)) = result else {
        panic!("expected a VcsError, got {result:?}");
    };
    assert!(
        !error.output.is_empty(),
        "the VcsError should carry git's diagnostics"
    );

    Ok(())
}

#[test]
fn test_materialize_blob() -> Result<()> {
    let temp = setup_git_repo()?;
    let cache_root = temp.path().join("cache");
    let materializer =
        Materializer::new(Vcs::new(process_executor()?), &cache_root);

    let path = materializer.materialize(
        &AccessPoint::Local,
        &git_dir(temp.path()),
        "v1:docs/guide.md",
    )?;

    assert_eq!(fs::read_to_string(&path)?, "# Guide v1\n");
    assert_eq!(path.file_name(), Some("guide.md"));

    let blob =
        git(&temp.path().join("repo"), &["rev-parse", "v1:docs/guide.md"])?;
    assert_eq!(
        path.parent(),
        Some(
            cache_root.join(format!("git-link-{}", blob.trim_end())).as_path()
        ),
        "cache directory should be named by the blob hash"
    );

    Ok(())
}

#[test]
fn test_materialize_twice_fetches_once() -> Result<()> {
    let temp = setup_git_repo()?;
    let executor = CountingShows::new(process_executor()?);
    let materializer =
        Materializer::new(Vcs::new(&executor), temp.path().join("cache"));
    let git_dir = git_dir(temp.path());

    let object = "v2:docs/guide.md";
    let first =
        materializer.materialize(&AccessPoint::Local, &git_dir, object)?;
    let second =
        materializer.materialize(&AccessPoint::Local, &git_dir, object)?;

    assert_eq!(first, second);
    assert_eq!(executor.shows.get(), 1, "second call is served from cache");
    assert_eq!(fs::read_to_string(&second)?, "# Guide v2\n");

    Ok(())
}

#[test]
fn test_equivalent_expressions_share_cache_entry() -> Result<()> {
    let temp = setup_git_repo()?;
    let executor = CountingShows::new(process_executor()?);
    let materializer =
        Materializer::new(Vcs::new(&executor), temp.path().join("cache"));
    let git_dir = git_dir(temp.path());

    let by_tag = materializer.materialize(
        &AccessPoint::Local,
        &git_dir,
        "v1:docs/guide.md",
    )?;
    let by_ancestry = materializer.materialize(
        &AccessPoint::Local,
        &git_dir,
        "main~1:docs/guide.md",
    )?;

    assert_eq!(by_tag, by_ancestry, "same blob, same cache path");
    assert_eq!(fs::read_to_string(&by_ancestry)?, "# Guide v1\n");
    assert_eq!(executor.shows.get(), 1);

    Ok(())
}

#[test]
fn test_materialize_missing_path_leaves_no_cache() -> Result<()> {
    let temp = setup_git_repo()?;
    let cache_root = temp.path().join("cache");
    let materializer =
        Materializer::new(Vcs::new(process_executor()?), &cache_root);

    let result = materializer.materialize(
        &AccessPoint::Local,
        &git_dir(temp.path()),
        "v1:docs/missing.md",
    );

    assert!(
        matches!(result, Err(MaterializeError::Resolve(ResolveError::Vcs(_)))),
        "should fail with a VcsError, got {result:?}"
    );
    assert!(!cache_root.exists(), "no cache directory should be created");

    Ok(())
}

#[test]
fn test_current_branch() -> Result<()> {
    let temp = setup_git_repo()?;
    let vcs = Vcs::new(process_executor()?);
    let git_dir = git_dir(temp.path());

    assert_eq!(
        vcs.current_branch(&AccessPoint::Local, &git_dir)?.as_deref(),
        Some("main")
    );

    git(&temp.path().join("repo"), &["checkout", "-q", "--detach", "v1"])?;
    assert_eq!(
        vcs.current_branch(&AccessPoint::Local, &git_dir)?,
        None,
        "detached HEAD has no branch"
    );

    Ok(())
}

/// Exercises the remote path end to end. The remote shell is a script
/// that checks the host and runs the composed command line locally.
#[cfg(unix)]
#[test]
fn test_materialize_through_remote_shell() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp = setup_git_repo()?;
    let shell = temp.path().join("fake-remote-shell");
    write_file(
        &shell,
        "#!/bin/sh\n\
         [ \"$1\" = build-01 ] || { echo \"bad host\" >&2; exit 255; }\n\
         exec sh -c \"$2\"\n",
    )?;
    fs::set_permissions(&shell, fs::Permissions::from_mode(0o755))?;

    let config = Config::from_env()?.with_remote_shell(shell.as_str());
    let materializer = Materializer::new(
        Vcs::new(ProcessExecutor::new(&config)),
        temp.path().join("cache"),
    );

    let path = materializer.materialize(
        &AccessPoint::Remote("build-01".to_owned()),
        &git_dir(temp.path()),
        "main^{commit}:docs/guide.md",
    )?;
    assert_eq!(fs::read_to_string(&path)?, "# Guide v2\n");

    Ok(())
}
