use crate::config::CheckConfig;
use crate::errors::{CheckError, MissingRedirect};
use crate::redirects::{RedirectFile, RedirectRule};
use crate::rename::{RenameQuery, RenameRecord, RenameSource};
use crate::slug;
use serde::Serialize;

/// what the check concluded about a single rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// only the date prefix changed, the url is the same
    SlugUnchanged { rename: RenameRecord, slug: String },
    /// the redirects file has the required line
    Covered {
        rename: RenameRecord,
        original: String,
        new: String,
    },
    /// no redirect for the new slug
    Missing {
        rename: RenameRecord,
        missing: MissingRedirect,
    },
}

impl RenameOutcome {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// result of checking every rename in a change
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub outcomes: Vec<RenameOutcome>,
    /// set when fail-fast stopped the run before every rename was checked
    pub stopped_early: bool,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        !self.outcomes.iter().any(RenameOutcome::is_missing)
    }

    pub fn missing(&self) -> impl Iterator<Item = &MissingRedirect> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            RenameOutcome::Missing { missing, .. } => Some(missing),
            _ => None,
        })
    }

    /// turn a failing report into the error that ends the run
    pub fn into_result(self) -> Result<Self, CheckError> {
        if self.passed() {
            Ok(self)
        } else {
            Err(CheckError::MissingRedirects(self.missing().cloned().collect()))
        }
    }
}

/// verifies renamed posts against the redirects file
pub struct Checker {
    config: CheckConfig,
}

impl Checker {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    fn query(&self) -> RenameQuery {
        RenameQuery {
            base: self.config.base.clone(),
            head: self.config.head.clone(),
            scope: self.config.posts_dir.clone(),
            threshold: self.config.threshold,
        }
    }

    /// check every rename the source reports
    ///
    /// a report is returned even when redirects are missing; only failures to
    /// obtain the renames are errors here
    pub fn run(
        &self,
        source: &dyn RenameSource,
        redirects: &RedirectFile,
    ) -> Result<CheckReport, CheckError> {
        let changes = source.changes(&self.query())?;
        let mut report = CheckReport::default();

        let renames: Vec<RenameRecord> = changes.iter().filter_map(|c| c.as_rename()).collect();
        let total = renames.len();

        for (i, rename) in renames.into_iter().enumerate() {
            let outcome = self.check_rename(rename, redirects);
            let missing = outcome.is_missing();
            report.outcomes.push(outcome);

            if missing && self.config.fail_fast {
                report.stopped_early = i + 1 < total;
                break;
            }
        }

        Ok(report)
    }

    pub fn check_rename(&self, rename: RenameRecord, redirects: &RedirectFile) -> RenameOutcome {
        let original = slug::from_path(&rename.original_path);
        let new = slug::from_path(&rename.new_path);

        if original == new {
            return RenameOutcome::SlugUnchanged {
                rename,
                slug: original,
            };
        }

        let rule = RedirectRule::expected(&self.config.url_prefix, &original, &new);
        if redirects.contains_rule(&rule) {
            return RenameOutcome::Covered {
                rename,
                original,
                new,
            };
        }

        RenameOutcome::Missing {
            rename,
            missing: MissingRedirect {
                existing_target: redirects.target_of(&rule.from),
                expected: rule.to_line(),
                original,
                new,
            },
        }
    }
}
