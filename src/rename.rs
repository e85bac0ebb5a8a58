use crate::errors::CheckError;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// how a path changed between two refs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    Other,
}

impl ChangeKind {
    /// classify a `git diff --name-status` status letter
    pub fn from_status_letter(letter: char) -> Self {
        match letter {
            'A' => Self::Added,
            'D' => Self::Deleted,
            'M' | 'T' => Self::Modified,
            'R' => Self::Renamed,
            'C' => Self::Copied,
            _ => Self::Other,
        }
    }
}

impl From<git2::Delta> for ChangeKind {
    fn from(delta: git2::Delta) -> Self {
        use git2::Delta;
        match delta {
            Delta::Added | Delta::Untracked => Self::Added,
            Delta::Deleted => Self::Deleted,
            Delta::Modified | Delta::Typechange => Self::Modified,
            Delta::Renamed => Self::Renamed,
            Delta::Copied => Self::Copied,
            _ => Self::Other,
        }
    }
}

/// a single change reported by a rename source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    pub kind: ChangeKind,
    pub original_path: String,
    pub new_path: String,
    /// similarity percentage, when the provider reports one
    pub similarity: Option<u8>,
}

impl PathChange {
    #[cfg(test)]
    pub fn renamed(original_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Renamed,
            original_path: original_path.into(),
            new_path: new_path.into(),
            similarity: None,
        }
    }

    /// the rename this change represents, if it is one
    pub fn as_rename(&self) -> Option<RenameRecord> {
        (self.kind == ChangeKind::Renamed).then(|| RenameRecord {
            original_path: self.original_path.clone(),
            new_path: self.new_path.clone(),
            similarity: self.similarity,
        })
    }

    /// whether both sides of the change sit under `scope`
    pub fn within(&self, scope: &Path) -> bool {
        let scope = normalize_scope(scope);
        Path::new(&self.original_path).starts_with(&scope)
            && Path::new(&self.new_path).starts_with(&scope)
    }
}

/// repository-relative scope without `.` components; empty means everything
pub fn normalize_scope(scope: &Path) -> PathBuf {
    scope
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// a post that moved between the base and head refs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub original_path: String,
    pub new_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<u8>,
}

/// what to ask a rename source for
#[derive(Debug, Clone)]
pub struct RenameQuery {
    pub base: String,
    pub head: String,
    /// repository-relative directory renames are restricted to
    pub scope: PathBuf,
    /// minimum similarity percentage for a delete/add pair to count as a rename
    pub threshold: u8,
}

/// something that can list the changes between two refs
///
/// implementations only report paths under `query.scope`
pub trait RenameSource {
    fn changes(&self, query: &RenameQuery) -> Result<Vec<PathChange>, CheckError>;
}

/// fixed list of changes, filtered by scope like a real source
#[cfg(test)]
#[derive(Debug, Default)]
pub struct InMemoryRenameSource {
    changes: Vec<PathChange>,
}

#[cfg(test)]
impl InMemoryRenameSource {
    pub fn new(changes: Vec<PathChange>) -> Self {
        Self { changes }
    }

    pub fn with_rename(mut self, original: &str, new: &str) -> Self {
        self.changes.push(PathChange::renamed(original, new));
        self
    }
}

#[cfg(test)]
impl RenameSource for InMemoryRenameSource {
    fn changes(&self, query: &RenameQuery) -> Result<Vec<PathChange>, CheckError> {
        Ok(self
            .changes
            .iter()
            .filter(|change| change.within(&query.scope))
            .cloned()
            .collect())
    }
}
