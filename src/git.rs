use crate::errors::CheckError;
use crate::rename::{ChangeKind, PathChange, RenameQuery, RenameSource, normalize_scope};
use git2::{DiffFindOptions, DiffOptions, Repository, Tree};
use std::path::{Path, PathBuf};
use std::process::Command;

/// rename source backed by libgit2
pub struct Git2RenameSource {
    repo_path: PathBuf,
}

impl Git2RenameSource {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

impl RenameSource for Git2RenameSource {
    fn changes(&self, query: &RenameQuery) -> Result<Vec<PathChange>, CheckError> {
        // can be anywhere within the repo
        let repo = Repository::discover(&self.repo_path).map_err(|e| {
            CheckError::rename_query(format!(
                "not in a git repository ({}): {}",
                self.repo_path.display(),
                e.message()
            ))
        })?;

        let base = resolve_tree(&repo, &query.base)?;
        let head = resolve_tree(&repo, &query.head)?;

        let mut opts = DiffOptions::new();
        if let Some(pathspec) = pathspec(&query.scope) {
            opts.pathspec(pathspec);
        }
        let mut diff = repo.diff_tree_to_tree(Some(&base), Some(&head), Some(&mut opts))?;

        // pair deletions with additions at or above the threshold
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        find_opts.rename_threshold(u16::from(query.threshold));
        diff.find_similar(Some(&mut find_opts))?;

        Ok(changes_from_git_diff(&diff)
            .into_iter()
            .filter(|change| change.within(&query.scope))
            .collect())
    }
}

/// resolve a revision (`HEAD^`, a branch, a sha) to its tree
fn resolve_tree<'r>(repo: &'r Repository, spec: &str) -> Result<Tree<'r>, CheckError> {
    repo.revparse_single(spec)
        .and_then(|object| object.peel_to_tree())
        .map_err(|e| CheckError::rename_query(format!("cannot resolve `{spec}`: {}", e.message())))
}

/// pathspec limiting a diff to the scope, None for the whole repository
fn pathspec(scope: &Path) -> Option<String> {
    let scope = normalize_scope(scope);
    let spec = scope.to_string_lossy().replace('\\', "/");
    let spec = spec.trim_end_matches('/');
    if spec.is_empty() {
        None
    } else {
        Some(spec.to_string())
    }
}

/// extract the list of changes from a `git2::Diff`
fn changes_from_git_diff(diff: &git2::Diff) -> Vec<PathChange> {
    let mut changes = Vec::new();

    for delta in diff.deltas() {
        let kind = ChangeKind::from(delta.status());
        let old_path = delta.old_file().path();
        let new_path = delta.new_file().path();

        // additions only have a new side, deletions only an old side
        let (Some(original), Some(new)) = (old_path.or(new_path), new_path.or(old_path)) else {
            continue;
        };

        changes.push(PathChange {
            kind,
            original_path: original.to_string_lossy().to_string(),
            new_path: new.to_string_lossy().to_string(),
            similarity: None,
        });
    }

    changes
}

/// rename source that shells out to the git binary
///
/// runs `git diff --name-status --diff-filter=R -M<threshold>%` between the
/// two refs, which is what a CI job would otherwise script by hand
pub struct GitCliRenameSource {
    repo_path: PathBuf,
}

impl GitCliRenameSource {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

impl RenameSource for GitCliRenameSource {
    fn changes(&self, query: &RenameQuery) -> Result<Vec<PathChange>, CheckError> {
        let mut command = Command::new("git");
        command
            .arg("diff")
            .arg("--name-status")
            .arg("--diff-filter=R")
            .arg(format!("-M{}%", query.threshold))
            .arg("-z")
            .arg(&query.base)
            .arg(&query.head)
            .arg("--");
        // pathspecs are relative to the repository root, not the working directory
        match pathspec(&query.scope) {
            Some(spec) => command.arg(format!(":(top){spec}")),
            None => command.arg(":/"),
        };

        let output = command
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| CheckError::rename_query(format!("failed to run git diff: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheckError::rename_query(format!(
                "git diff failed with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let changes = parse_name_status(&String::from_utf8_lossy(&output.stdout))?;
        Ok(changes
            .into_iter()
            .filter(|change| change.within(&query.scope))
            .collect())
    }
}

/// parse `git diff --name-status -z` output
///
/// each entry is a status field (`M`, `R087`, ...) followed by one path, or two
/// paths for renames and copies, all NUL separated
fn parse_name_status(output: &str) -> Result<Vec<PathChange>, CheckError> {
    let mut fields = output.split('\0').filter(|field| !field.is_empty());
    let mut changes = Vec::new();

    while let Some(status) = fields.next() {
        let mut chars = status.chars();
        let letter = chars
            .next()
            .ok_or_else(|| CheckError::rename_query("empty status in git diff output"))?;
        let kind = ChangeKind::from_status_letter(letter);
        let similarity = chars.as_str().parse::<u8>().ok();

        let original = fields.next().ok_or_else(|| {
            CheckError::rename_query(format!("missing path after `{status}` in git diff output"))
        })?;
        let new = if matches!(kind, ChangeKind::Renamed | ChangeKind::Copied) {
            fields.next().ok_or_else(|| {
                CheckError::rename_query(format!(
                    "missing destination for `{original}` in git diff output"
                ))
            })?
        } else {
            original
        };

        changes.push(PathChange {
            kind,
            original_path: original.to_string(),
            new_path: new.to_string(),
            similarity,
        });
    }

    Ok(changes)
}
