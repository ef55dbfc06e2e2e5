// Copyright 2026 Oxide Computer Company

//! Running the version-control program, locally or through a remote shell.

use crate::{Config, RunError};
use git_link::AccessPoint;
use std::process::{Command, Output, Stdio};

/// What a finished command produced.
///
/// A nonzero exit status is recorded here rather than reported as an
/// error, so callers decide what failure means for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    success: bool,
    exit_status: String,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl CommandOutput {
    /// Creates the output of a command that exited successfully.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        CommandOutput {
            success: true,
            exit_status: "exit status: 0".to_owned(),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Creates the output of a command that exited unsuccessfully.
    pub fn failure(
        exit_status: impl Into<String>,
        stdout: impl Into<Vec<u8>>,
        stderr: impl Into<Vec<u8>>,
    ) -> Self {
        CommandOutput {
            success: false,
            exit_status: exit_status.into(),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the command exited successfully.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// A human-readable description of the exit status.
    pub fn exit_status(&self) -> &str {
        &self.exit_status
    }

    /// Returns the captured standard output.
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// Returns the captured standard error.
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    /// Consumes `self`, returning the captured standard output.
    pub fn into_stdout(self) -> Vec<u8> {
        self.stdout
    }

    /// Returns stdout followed by stderr, decoded lossily.
    pub fn captured_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        CommandOutput {
            success: output.status.success(),
            exit_status: output.status.to_string(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Runs the version-control program with a list of arguments.
///
/// Implementations block until the program exits and return everything it
/// printed.
pub trait Executor {
    /// Runs the version-control program with `args` on `access_point`.
    ///
    /// An `Err` means the program could not be run at all. A program that
    /// runs and fails is an `Ok` whose [`CommandOutput::is_success`] is
    /// false.
    fn run(
        &self,
        access_point: &AccessPoint,
        args: &[String],
    ) -> Result<CommandOutput, RunError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn run(
        &self,
        access_point: &AccessPoint,
        args: &[String],
    ) -> Result<CommandOutput, RunError> {
        (**self).run(access_point, args)
    }
}

/// An [`Executor`] that spawns real processes.
///
/// For [`AccessPoint::Local`], runs `<git> <args...>`. For
/// [`AccessPoint::Remote`], runs `<remote-shell> <host> '<git>' '<arg>'...`,
/// leaving the remote host's default shell to split the command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessExecutor {
    git: String,
    remote_shell: String,
}

impl ProcessExecutor {
    /// Creates an executor using the programs named in `config`.
    pub fn new(config: &Config) -> Self {
        ProcessExecutor {
            git: config.git().to_owned(),
            remote_shell: config.remote_shell().to_owned(),
        }
    }

    /// Returns the version-control program.
    pub fn git(&self) -> &str {
        &self.git
    }

    /// Returns the remote-execution program.
    pub fn remote_shell(&self) -> &str {
        &self.remote_shell
    }

    /// Builds, without running, the command for an invocation.
    pub fn command(
        &self,
        access_point: &AccessPoint,
        args: &[String],
    ) -> Command {
        let mut cmd = match access_point {
            AccessPoint::Local => {
                let mut cmd = Command::new(&self.git);
                cmd.args(args);
                cmd
            }
            AccessPoint::Remote(host) => {
                let mut cmd = Command::new(&self.remote_shell);
                cmd.arg(host).arg(remote_command_line(&self.git, args));
                cmd
            }
        };
        cmd.stdin(Stdio::null());
        cmd
    }

    fn program(&self, access_point: &AccessPoint) -> &str {
        match access_point {
            AccessPoint::Local => &self.git,
            AccessPoint::Remote(_) => &self.remote_shell,
        }
    }
}

impl Executor for ProcessExecutor {
    fn run(
        &self,
        access_point: &AccessPoint,
        args: &[String],
    ) -> Result<CommandOutput, RunError> {
        let program = self.program(access_point);
        if let AccessPoint::Remote(host) = access_point {
            // `AccessPoint` parsing rejects these, but the variant can also
            // be built directly.
            if host.starts_with('-') {
                return Err(RunError::OptionLikeHost { host: host.clone() });
            }
        }
        tracing::debug!(%access_point, ?args, "running {program}");

        let output = self.command(access_point, args).output().map_err(
            |source| RunError::SpawnFailed {
                program: program.to_owned(),
                access_point: access_point.clone(),
                source,
            },
        )?;

        let output = CommandOutput::from(output);
        if !output.is_success() {
            tracing::debug!(
                %access_point,
                exit_status = output.exit_status(),
                "{program} exited unsuccessfully",
            );
        }
        Ok(output)
    }
}

/// Composes a single shell command line that runs `program` with `args`.
///
/// Every word is single-quoted, so the remote shell passes each through
/// unchanged.
pub fn remote_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
