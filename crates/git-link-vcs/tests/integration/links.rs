// Copyright 2026 Oxide Computer Company

//! End-to-end resolution of git links.

use crate::helpers::{commit_file, setup_git_repo};
use anyhow::Result;
use git_link::Reference;
use git_link_vcs::{Config, GitLinkError, GitLinks};
use std::fs;

fn links(temp: &camino::Utf8Path) -> Result<GitLinks> {
    Ok(GitLinks::new(Config::from_env()?.with_cache_root(temp.join("cache"))))
}

#[test]
fn test_file_link_at_revision() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;

    let file = temp.path().join("repo/docs/guide.md");
    let reference: Reference = format!("localhost:{file}::v1").parse()?;
    let path = links.resolve_from_file_path(&reference)?;

    assert_eq!(fs::read_to_string(&path)?, "# Guide v1\n");
    assert_eq!(path.file_name(), Some("guide.md"));

    Ok(())
}

#[test]
fn test_file_link_defaults_to_head() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;

    // Uncommitted edits in the working tree are not what the link shows.
    let file = temp.path().join("repo/docs/guide.md");
    fs::write(&file, "# Uncommitted\n")?;

    let reference: Reference = file.as_str().parse()?;
    let path = links.resolve_from_file_path(&reference)?;
    assert_eq!(fs::read_to_string(&path)?, "# Guide v2\n");

    Ok(())
}

#[test]
fn test_bare_link_matches_file_link() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;

    let git_dir = temp.path().join("repo/.git");
    let bare = links.resolve_and_open(&format!("{git_dir}::v2:docs/guide.md"))?;

    let file = temp.path().join("repo/docs/guide.md");
    let reference: Reference = format!("{file}::v2").parse()?;
    let from_file = links.resolve_from_file_path(&reference)?;

    assert_eq!(bare, from_file, "both forms name the same cache entry");

    Ok(())
}

#[test]
fn test_new_commit_gets_new_cache_entry() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;
    let file = temp.path().join("repo/docs/guide.md");
    let reference: Reference = file.as_str().parse()?;

    let before = links.resolve_from_file_path(&reference)?;
    commit_file(&temp.path().join("repo"), "docs/guide.md", "# Guide v3\n")?;
    let after = links.resolve_from_file_path(&reference)?;

    assert_ne!(before, after, "HEAD moved to different content");
    assert_eq!(fs::read_to_string(&before)?, "# Guide v2\n");
    assert_eq!(fs::read_to_string(&after)?, "# Guide v3\n");

    Ok(())
}

#[test]
fn test_bare_link_bad_revision() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;

    let git_dir = temp.path().join("repo/.git");
    let err = links
        .resolve_and_open(&format!("{git_dir}::v9:docs/guide.md"))
        .unwrap_err();
    assert!(
        err.vcs_error().is_some(),
        "should carry git's output, got {err:?}"
    );

    Ok(())
}

#[test]
fn test_current_branch_name_and_inside_repository() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;

    let git_dir = temp.path().join("repo/.git");
    assert_eq!(links.current_branch_name(&git_dir)?.as_deref(), Some("main"));
    assert!(links.is_inside_repository(&temp.path().join("repo/docs/new.md")));

    Ok(())
}

#[test]
fn test_file_link_remote_rejected() -> Result<()> {
    let temp = setup_git_repo()?;
    let links = links(temp.path())?;

    let file = temp.path().join("repo/docs/guide.md");
    let reference: Reference = format!("build-01:{file}::v1").parse()?;
    let err = links.resolve_from_file_path(&reference).unwrap_err();
    assert!(
        matches!(err, GitLinkError::UnsupportedAccessPoint { .. }),
        "got {err:?}"
    );
    assert!(!temp.path().join("cache").exists());

    Ok(())
}
