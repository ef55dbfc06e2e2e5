// Copyright 2026 Oxide Computer Company

//! Git operations needed to resolve and read git links.

use crate::{
    CommandOutput, Executor, ProcessExecutor, ReadObjectError, ResolveError,
    RunError, VcsError,
};
use git_link::{AccessPoint, ContentHash};

const HEADS_PREFIX: &str = "refs/heads/";

/// The git subcommands used for git links, run through an [`Executor`].
///
/// Every invocation is `git --no-pager --git-dir=<git_dir> <subcommand>...`.
/// `git_dir` is the repository metadata directory as seen from the access
/// point, so it is a plain string rather than a local path.
#[derive(Clone, Debug)]
pub struct Vcs<E = ProcessExecutor> {
    executor: E,
}

impl<E: Executor> Vcs<E> {
    /// Creates a new `Vcs` running commands through `executor`.
    pub fn new(executor: E) -> Self {
        Vcs { executor }
    }

    /// Returns the executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Resolves `object` to its canonical content hash.
    ///
    /// Runs `git rev-parse --verify <object>`. The hash is git's output with
    /// exactly one trailing line terminator removed.
    pub fn resolve(
        &self,
        access_point: &AccessPoint,
        git_dir: &str,
        object: &str,
    ) -> Result<ContentHash, ResolveError> {
        let output = self.executor.run(
            access_point,
            &git_args(git_dir, &["rev-parse", "--verify"], object),
        )?;
        if !output.is_success() {
            return Err(
                vcs_error(access_point, "rev-parse", object, &output).into()
            );
        }

        let stdout = String::from_utf8_lossy(output.stdout());
        Ok(ContentHash::new(strip_line_terminator(&stdout)))
    }

    /// Reads the content of `object`.
    ///
    /// Runs `git show <object>` and returns its standard output verbatim.
    pub fn read_object(
        &self,
        access_point: &AccessPoint,
        git_dir: &str,
        object: &str,
    ) -> Result<Vec<u8>, ReadObjectError> {
        let output = self
            .executor
            .run(access_point, &git_args(git_dir, &["show"], object))?;
        if output.is_success() {
            Ok(output.into_stdout())
        } else {
            Err(vcs_error(access_point, "show", object, &output).into())
        }
    }

    /// Returns the short name of the branch `HEAD` points to.
    ///
    /// Runs `git symbolic-ref -q HEAD`. Returns `None` if `HEAD` is detached
    /// (or is otherwise not a symbolic ref).
    pub fn current_branch(
        &self,
        access_point: &AccessPoint,
        git_dir: &str,
    ) -> Result<Option<String>, RunError> {
        let output = self.executor.run(
            access_point,
            &git_args(git_dir, &["symbolic-ref", "-q"], "HEAD"),
        )?;
        if !output.is_success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(output.stdout());
        let full = strip_line_terminator(&stdout);
        let branch = full.strip_prefix(HEADS_PREFIX).unwrap_or(full);
        Ok(Some(branch.to_owned()))
    }
}

fn git_args(git_dir: &str, subcommand: &[&str], object: &str) -> Vec<String> {
    let mut args =
        vec!["--no-pager".to_owned(), format!("--git-dir={git_dir}")];
    args.extend(subcommand.iter().map(|s| (*s).to_owned()));
    args.push(object.to_owned());
    args
}

fn vcs_error(
    access_point: &AccessPoint,
    subcommand: &'static str,
    object: &str,
    output: &CommandOutput,
) -> VcsError {
    VcsError {
        access_point: access_point.clone(),
        subcommand,
        object: object.to_owned(),
        exit_status: output.exit_status().to_owned(),
        output: output.captured_text(),
    }
}

/// Removes one trailing `\n` or `\r\n`, and nothing else.
fn strip_line_terminator(s: &str) -> &str {
    s.strip_suffix("\r\n").or_else(|| s.strip_suffix('\n')).unwrap_or(s)
}
