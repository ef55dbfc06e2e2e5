// Copyright 2026 Oxide Computer Company

//! Repository setup helpers.

use anyhow::Result;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use std::{fs, io::Write, process::Command};

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
pub fn git_command() -> Command {
    let bin = std::env::var("GIT").unwrap_or_else(|_| "git".to_string());
    Command::new(bin)
}

/// Writes content to a file atomically, creating parent directories.
pub fn write_file(
    path: impl AsRef<Utf8Path>,
    content: impl AsRef<[u8]>,
) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(content.as_ref()))
        .map_err(|e| e.into())
}

/// Runs git in `repo_root`, asserting success, and returns its stdout.
pub fn git(repo_root: &Utf8Path, args: &[&str]) -> Result<String> {
    let output = git_command().args(args).current_dir(repo_root).output()?;
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

/// Initializes a git repository on branch `main` and configures the user.
pub fn init_git_repo(repo_root: &Utf8Path) -> Result<()> {
    git(repo_root, &["init", "-q"])?;
    git(repo_root, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(repo_root, &["config", "user.email", "test@example.com"])?;
    git(repo_root, &["config", "user.name", "Test User"])?;
    git(repo_root, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Writes `contents` to `path` (relative to the repository root) and
/// commits it. Returns the commit hash.
pub fn commit_file(
    repo_root: &Utf8Path,
    path: &str,
    contents: &str,
) -> Result<String> {
    write_file(repo_root.join(path), contents)?;
    git(repo_root, &["add", "."])?;
    let message = format!("Update {path}");
    git(repo_root, &["commit", "-q", "-m", message.as_str()])?;
    Ok(git(repo_root, &["rev-parse", "HEAD"])?.trim().to_string())
}

/// Sets up a temporary repository with two commits of `docs/guide.md`,
/// tagged `v1` and `v2`.
///
/// Returns the temp dir, which contains the working tree at `repo/` and
/// leaves room for a cache directory beside it.
pub fn setup_git_repo() -> Result<Utf8TempDir> {
    let temp = Utf8TempDir::with_prefix("git-link-vcs-")?;
    let repo_root = temp.path().join("repo");
    fs::create_dir_all(&repo_root)?;

    init_git_repo(&repo_root)?;
    commit_file(&repo_root, "docs/guide.md", "# Guide v1\n")?;
    git(&repo_root, &["tag", "v1"])?;
    commit_file(&repo_root, "docs/guide.md", "# Guide v2\n")?;
    git(&repo_root, &["tag", "v2"])?;

    Ok(temp)
}
