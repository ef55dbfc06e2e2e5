// Copyright 2026 Oxide Computer Company

//! The entry points used by editor integrations.

use crate::{
    Config, ConfigError, Executor, GitLinkError, LocateError, Materializer,
    ProcessExecutor, RepositoryLocation, Vcs, locate_repository,
};
use camino::{Utf8Path, Utf8PathBuf};
use git_link::{AccessPoint, Reference};

/// The revision a file link refers to when it has no object expression.
pub const DEFAULT_REVISION: &str = "HEAD";

/// Resolves git links to local files.
///
/// Links come in two forms, both written `[access-point:]location[::object]`:
///
/// - The *bare* form, where `location` is a repository metadata directory
///   and `object` is any expression `git show` accepts. See
///   [`resolve_and_open`](Self::resolve_and_open).
/// - The *file* form, where `location` is a file in a working tree and
///   `object` is a revision. See
///   [`resolve_from_file_path`](Self::resolve_from_file_path).
#[derive(Clone, Debug)]
pub struct GitLinks<E = ProcessExecutor> {
    config: Config,
    materializer: Materializer<E>,
}

impl GitLinks<ProcessExecutor> {
    /// Creates a resolver that spawns the programs named in `config`.
    pub fn new(config: Config) -> Self {
        let executor = ProcessExecutor::new(&config);
        Self::with_executor(config, executor)
    }

    /// Creates a resolver configured from the environment. See
    /// [`Config::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }
}

impl<E: Executor> GitLinks<E> {
    /// Creates a resolver that runs commands through `executor`.
    ///
    /// The executor's choice of programs takes precedence over the ones in
    /// `config`; the cache root and metadata marker still come from
    /// `config`.
    pub fn with_executor(config: Config, executor: E) -> Self {
        let materializer =
            Materializer::new(Vcs::new(executor), config.cache_root());
        GitLinks { config, materializer }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the materializer.
    pub fn materializer(&self) -> &Materializer<E> {
        &self.materializer
    }

    /// Parses a bare-form link and materializes its object.
    ///
    /// ```no_run
    /// use git_link_vcs::GitLinks;
    ///
    /// let links = GitLinks::from_env().expect("valid environment");
    /// let path = links
    ///     .resolve_and_open("/src/repo/.git::v1.0:README.md")
    ///     .expect("resolved");
    /// println!("{path}");
    /// ```
    pub fn resolve_and_open(
        &self,
        reference: &str,
    ) -> Result<Utf8PathBuf, GitLinkError> {
        let reference: Reference = reference.parse()?;
        self.open(&reference)
    }

    /// Materializes the object of an already-parsed bare-form link.
    pub fn open(
        &self,
        reference: &Reference,
    ) -> Result<Utf8PathBuf, GitLinkError> {
        tracing::debug!(%reference, "opening bare git link");
        Ok(self.materializer.materialize(
            reference.access_point(),
            reference.location(),
            reference.object(),
        )?)
    }

    /// Materializes the file named by a file-form link, as of the link's
    /// revision (`HEAD` if it has none).
    ///
    /// The link's access point must be `localhost`: the enclosing
    /// repository is found by walking up the local filesystem.
    pub fn resolve_from_file_path(
        &self,
        reference: &Reference,
    ) -> Result<Utf8PathBuf, GitLinkError> {
        if !reference.access_point().is_local() {
            return Err(GitLinkError::UnsupportedAccessPoint {
                reference: reference.clone(),
                access_point: reference.access_point().clone(),
            });
        }

        let location = self.locate(Utf8Path::new(reference.location()))?;
        let revision = match reference.object() {
            "" => DEFAULT_REVISION,
            revision => revision,
        };
        let object = format!("{revision}:{}", location.git_path());
        tracing::debug!(
            %reference,
            root = %location.root(),
            %object,
            "opening file git link"
        );

        Ok(self.materializer.materialize(
            &AccessPoint::Local,
            location.root().as_str(),
            &object,
        )?)
    }

    /// Returns the branch checked out in the local repository at `git_dir`,
    /// or `None` if `HEAD` is detached.
    pub fn current_branch_name(
        &self,
        git_dir: &Utf8Path,
    ) -> Result<Option<String>, GitLinkError> {
        Ok(self
            .materializer
            .vcs()
            .current_branch(&AccessPoint::Local, git_dir.as_str())?)
    }

    /// Returns true if `path` is inside a repository.
    pub fn is_inside_repository(&self, path: &Utf8Path) -> bool {
        self.locate(path).is_ok()
    }

    /// Finds the repository enclosing `path`.
    pub fn locate(
        &self,
        path: &Utf8Path,
    ) -> Result<RepositoryLocation, LocateError> {
        locate_repository(path, self.config.metadata_dir())
    }
}
