use crate::check::{CheckReport, RenameOutcome};
use crate::cli::OutputFormat;
use crate::config::CheckConfig;
use crate::redirects::RedirectFile;
use crate::rename::RenameRecord;
use crate::{error, info, status, warning};
use anyhow::{Context, Result};
use serde::Serialize;

/// machine readable form of a report
#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    base: &'a str,
    head: &'a str,
    redirects_file: String,
    #[serde(flatten)]
    report: &'a CheckReport,
}

pub fn print(report: &CheckReport, config: &CheckConfig, redirects: &RedirectFile) -> Result<()> {
    match config.format {
        OutputFormat::Text => {
            print_text(report, config, redirects);
            Ok(())
        }
        OutputFormat::Json => print_json(report, config, redirects),
    }
}

fn print_json(report: &CheckReport, config: &CheckConfig, redirects: &RedirectFile) -> Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport {
        passed: report.passed(),
        base: &config.base,
        head: &config.head,
        redirects_file: redirects.path().display().to_string(),
        report,
    })
    .context("failed to serialise report")?;
    info!(json);
    Ok(())
}

fn print_text(report: &CheckReport, config: &CheckConfig, redirects: &RedirectFile) {
    status!(
        "checking renames in {} between {} and {} against {} ({} lines)...",
        config.posts_dir.display(),
        config.base,
        config.head,
        redirects.path().display(),
        redirects.len()
    );

    if report.outcomes.is_empty() {
        status!("no renamed posts");
        return;
    }

    for outcome in &report.outcomes {
        match outcome {
            RenameOutcome::SlugUnchanged { rename, slug } => {
                info!("{} (slug `{}` unchanged)", describe(rename), slug);
            }
            RenameOutcome::Covered {
                rename,
                original,
                new,
            } => {
                info!("{}", describe(rename));
                status!("  found redirect for {} -> {}", original, new);
            }
            RenameOutcome::Missing { rename, missing } => {
                info!("{}", describe(rename));
                error!("  missing redirect for {} -> {}", missing.original, missing.new);
                if let Some(target) = &missing.existing_target {
                    warning!(
                        "  {}/{} already redirects to {}",
                        config.url_prefix.trim_end_matches('/'),
                        missing.original,
                        target
                    );
                }
            }
        }
    }

    if report.stopped_early {
        warning!("stopped at the first missing redirect, later renames were not checked");
    }

    let missing: Vec<_> = report.missing().collect();
    if missing.is_empty() {
        status!(
            "all {} renamed {} covered by {}",
            report.outcomes.len(),
            if report.outcomes.len() == 1 { "post is" } else { "posts are" },
            redirects.path().display()
        );
    } else {
        info!();
        warning!("add to {}:", redirects.path().display());
        for m in missing {
            info!("{}", m.expected);
        }
        info!();
    }
}

/// show renames as "old_path → new_path", with the similarity when known
fn describe(rename: &RenameRecord) -> String {
    match rename.similarity {
        Some(score) => format!("R{score:03} {} → {}", rename.original_path, rename.new_path),
        None => format!("R {} → {}", rename.original_path, rename.new_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(similarity: Option<u8>) -> RenameRecord {
        RenameRecord {
            original_path: "_posts/a.md".to_string(),
            new_path: "_posts/b.md".to_string(),
            similarity,
        }
    }

    #[test]
    fn test_describe_rename() {
        assert_eq!(describe(&rename(Some(87))), "R087 _posts/a.md → _posts/b.md");
        assert_eq!(describe(&rename(None)), "R _posts/a.md → _posts/b.md");
    }

    #[test]
    fn test_json_shape() {
        let report = CheckReport {
            outcomes: vec![RenameOutcome::SlugUnchanged {
                rename: rename(None),
                slug: "a".to_string(),
            }],
            stopped_early: false,
        };
        let value = serde_json::to_value(JsonReport {
            passed: report.passed(),
            base: "HEAD^",
            head: "HEAD",
            redirects_file: "_redirects".to_string(),
            report: &report,
        })
        .unwrap();

        assert_eq!(value["passed"], true);
        assert_eq!(value["stopped_early"], false);
        assert_eq!(value["outcomes"][0]["status"], "slug_unchanged");
        assert_eq!(value["outcomes"][0]["rename"]["new_path"], "_posts/b.md");
        assert!(value["outcomes"][0]["rename"].get("similarity").is_none());
    }
}
