use crate::cli::{Backend, Cli, OutputFormat};
use crate::constants::DEFAULT_REDIRECTS_FILE;
use crate::errors::CheckError;
use std::path::{Path, PathBuf};

/// everything a check run needs, resolved up front
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// repository to inspect
    pub repo: PathBuf,

    /// directory posts live in, relative to the repository root
    pub posts_dir: PathBuf,

    /// redirects file consulted for each rename
    pub redirects_file: PathBuf,

    /// parent ref
    pub base: String,

    /// current ref
    pub head: String,

    /// rename similarity threshold in percent
    pub threshold: u8,

    /// url prefix post routes are served under
    pub url_prefix: String,

    /// stop at the first missing redirect instead of collecting them all
    pub fail_fast: bool,

    pub backend: Backend,
    pub format: OutputFormat,
}

impl CheckConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, CheckError> {
        let redirects_file = cli
            .redirects
            .unwrap_or_else(|| site_root(&cli.repo).join(DEFAULT_REDIRECTS_FILE));

        let config = Self {
            repo: cli.repo,
            posts_dir: cli.posts_dir,
            redirects_file,
            base: cli.base,
            head: cli.head,
            threshold: cli.threshold,
            url_prefix: cli.prefix,
            fail_fast: cli.fail_fast,
            backend: cli.backend,
            format: cli.format,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if !(1..=100).contains(&self.threshold) {
            return Err(CheckError::InvalidConfig {
                field: "threshold",
                message: format!("{} is not a percentage between 1 and 100", self.threshold),
            });
        }
        if !self.url_prefix.starts_with('/') {
            return Err(CheckError::InvalidConfig {
                field: "prefix",
                message: format!("`{}` must start with `/`", self.url_prefix),
            });
        }
        if self.posts_dir.is_absolute() {
            return Err(CheckError::InvalidConfig {
                field: "posts-dir",
                message: format!(
                    "`{}` must be relative to the repository root",
                    self.posts_dir.display()
                ),
            });
        }
        if self.base.trim().is_empty() || self.head.trim().is_empty() {
            return Err(CheckError::InvalidConfig {
                field: "base/head",
                message: "refs cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// working tree root when `repo` is inside a repository, otherwise `repo` itself
///
/// renames are read relative to the root, so the redirects file is too
fn site_root(repo: &Path) -> PathBuf {
    git2::Repository::discover(repo)
        .ok()
        .and_then(|r| r.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| repo.to_path_buf())
}
