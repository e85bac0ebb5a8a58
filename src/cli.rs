use crate::constants::{
    DEFAULT_BASE_REF, DEFAULT_HEAD_REF, DEFAULT_POSTS_DIR, DEFAULT_RENAME_THRESHOLD,
    DEFAULT_URL_PREFIX,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// redirect-check: fail when a renamed blog post has no matching redirect
#[derive(Parser, Debug)]
#[command(name = "redirect-check", about, long_about = None)]
pub struct Cli {
    /// repository to inspect
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// posts directory, relative to the repository root
    #[arg(long, default_value = DEFAULT_POSTS_DIR)]
    pub posts_dir: PathBuf,

    /// redirects file [default: _redirects at the repository root]
    #[arg(long)]
    pub redirects: Option<PathBuf>,

    /// parent ref to compare against
    #[arg(long, default_value = DEFAULT_BASE_REF)]
    pub base: String,

    /// current ref
    #[arg(long, default_value = DEFAULT_HEAD_REF)]
    pub head: String,

    /// rename similarity threshold (percent)
    #[arg(long, default_value_t = DEFAULT_RENAME_THRESHOLD)]
    pub threshold: u8,

    /// url prefix posts are served under
    #[arg(long, default_value = DEFAULT_URL_PREFIX)]
    pub prefix: String,

    /// how renames are read from git
    #[arg(long, value_enum, default_value_t = Backend::Libgit2)]
    pub backend: Backend,

    /// stop at the first missing redirect
    #[arg(long)]
    pub fail_fast: bool,

    /// report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// read the repository in-process
    Libgit2,
    /// run the git binary
    Git,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
