// Copyright 2026 Oxide Computer Company

//! Integration tests for git-link-vcs, run against real git repositories.

mod helpers;
mod links;
mod materialize;
