// Copyright 2026 Oxide Computer Company

//! `git-link`: resolve git links to local files.
//!
//! Usage: git-link <COMMAND>
//!
//! Commands:
//!   open    Materialize a bare link (`[host:]git-dir::object`)
//!   file    Materialize a file link (`[localhost:]file[::revision]`)
//!   branch  Print the branch checked out in a repository
//!   check   Exit successfully if a path is inside a repository

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use git_link::Reference;
use git_link_vcs::{Config, GitLinks};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Resolve git links to local files
#[derive(Parser, Debug)]
#[command(name = "git-link")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Version-control program to run
    #[arg(long, global = true, value_name = "PROGRAM")]
    git: Option<String>,

    /// Program used to reach remote access points
    #[arg(long, global = true, value_name = "PROGRAM")]
    remote_shell: Option<String>,

    /// Directory to cache materialized files under
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<Utf8PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Materialize a bare link and print the cached file's path
    Open {
        /// Link of the form `[host:]git-dir::object`
        reference: String,
    },

    /// Materialize a file link and print the cached file's path
    File {
        /// Link of the form `[localhost:]file[::revision]`
        reference: String,
    },

    /// Print the branch checked out in a repository
    Branch {
        /// Path to the repository metadata directory
        git_dir: Utf8PathBuf,
    },

    /// Exit successfully if the path is inside a repository
    Check {
        /// Any path, which does not need to exist
        path: Utf8PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::from_env()?;
    if let Some(git) = cli.git {
        config = config.with_git(git);
    }
    if let Some(remote_shell) = cli.remote_shell {
        config = config.with_remote_shell(remote_shell);
    }
    if let Some(cache_dir) = cli.cache_dir {
        config = config.with_cache_root(cache_dir);
    }
    tracing::debug!(?config, "resolved configuration");
    let links = GitLinks::new(config);

    match cli.command {
        Commands::Open { reference } => {
            let path = links
                .resolve_and_open(&reference)
                .with_context(|| format!("failed to open {reference}"))?;
            println!("{path}");
        }
        Commands::File { reference } => {
            let parsed: Reference = reference
                .parse()
                .with_context(|| format!("invalid git link {reference}"))?;
            let path = links
                .resolve_from_file_path(&parsed)
                .with_context(|| format!("failed to open {reference}"))?;
            println!("{path}");
        }
        Commands::Branch { git_dir } => {
            match links.current_branch_name(&git_dir)? {
                Some(branch) => println!("{branch}"),
                None => {
                    tracing::warn!(%git_dir, "HEAD is detached");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Check { path } => {
            if !links.is_inside_repository(&path) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
