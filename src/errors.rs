use crate::constants::{EXIT_CONFIGURATION, EXIT_MISSING_REDIRECT};
use serde::Serialize;
use std::{io, path::PathBuf};
use thiserror::Error;

/// a rename whose slug changed without a matching redirect line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingRedirect {
    pub original: String,
    pub new: String,
    /// the exact line that would satisfy the check
    pub expected: String,
    /// target of an existing rule for the same old url, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_target: Option<String>,
}

/// failures that end a check run
#[derive(Debug, Error)]
pub enum CheckError {
    /// The redirects file is missing or could not be read.
    #[error("failed to read redirects file {path}: {source}")]
    RedirectsUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Renames could not be obtained from version control.
    #[error("failed to query renames: {message}")]
    RenameQuery { message: String },
    /// A configuration value failed validation.
    #[error("invalid `{field}`: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
    /// One or more renames are not covered by the redirects file.
    #[error("{}", describe_missing(.0))]
    MissingRedirects(Vec<MissingRedirect>),
}

impl CheckError {
    pub fn rename_query(message: impl Into<String>) -> Self {
        Self::RenameQuery {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingRedirects(_) => EXIT_MISSING_REDIRECT,
            Self::RedirectsUnreadable { .. }
            | Self::RenameQuery { .. }
            | Self::InvalidConfig { .. } => EXIT_CONFIGURATION,
        }
    }
}

impl From<git2::Error> for CheckError {
    fn from(e: git2::Error) -> Self {
        Self::rename_query(e.message())
    }
}

fn describe_missing(missing: &[MissingRedirect]) -> String {
    match missing {
        [only] => format!(
            "could not find a redirect for {} -> {} (expected `{}`)",
            only.original, only.new, only.expected
        ),
        _ => {
            let pairs: Vec<String> = missing
                .iter()
                .map(|m| format!("{} -> {}", m.original, m.new))
                .collect();
            format!(
                "could not find redirects for {} renames: {}",
                missing.len(),
                pairs.join(", ")
            )
        }
    }
}
