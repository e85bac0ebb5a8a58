use crate::errors::CheckError;
use std::fs;
use std::path::{Path, PathBuf};

/// one `<from> <to>` line of the redirects file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

impl RedirectRule {
    /// the rule required when a post moves from `original` to `new`
    pub fn expected(prefix: &str, original: &str, new: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        Self {
            from: format!("{prefix}/{original}"),
            to: format!("{prefix}/{new}"),
        }
    }

    /// parse a line of the form `<from> <to>`, ignoring surrounding whitespace
    ///
    /// returns None for blank lines and for lines that don't have exactly two
    /// fields separated by a single space
    pub fn parse(line: &str) -> Option<Self> {
        let (from, to) = line.trim().split_once(' ')?;
        if from.is_empty() || to.is_empty() || to.contains(' ') {
            return None;
        }
        Some(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.from, self.to)
    }
}

/// the redirects file, held as its lines in file order
#[derive(Debug)]
pub struct RedirectFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl RedirectFile {
    /// read the whole file; a missing or unreadable file is a configuration error
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let content = fs::read_to_string(path).map_err(|source| CheckError::RedirectsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_content(path, &content))
    }

    pub fn from_content(path: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// whether any line equals `expected` once both are trimmed
    pub fn contains(&self, expected: &str) -> bool {
        let expected = expected.trim();
        self.lines.iter().any(|line| line.trim() == expected)
    }

    pub fn contains_rule(&self, rule: &RedirectRule) -> bool {
        self.contains(&rule.to_line())
    }

    /// every line that parses as a rule, in file order
    pub fn rules(&self) -> impl Iterator<Item = RedirectRule> + '_ {
        self.lines.iter().filter_map(|line| RedirectRule::parse(line))
    }

    /// target of the first rule redirecting away from `from`
    pub fn target_of(&self, from: &str) -> Option<String> {
        self.rules().find(|rule| rule.from == from).map(|rule| rule.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file(content: &str) -> RedirectFile {
        RedirectFile::from_content(Path::new("_redirects"), content)
    }

    #[test]
    fn test_expected_rule_line() {
        let rule = RedirectRule::expected("/blog", "foo", "bar");
        assert_eq!(rule.to_line(), "/blog/foo /blog/bar");

        // trailing slash on the prefix is not doubled
        let rule = RedirectRule::expected("/blog/", "foo", "bar");
        assert_eq!(rule.to_line(), "/blog/foo /blog/bar");
    }

    #[test]
    fn test_exact_match_required() {
        let redirects = file("/blog/foo /blog/bar\n/blog/other /blog/thing\n");
        assert!(redirects.contains("/blog/foo /blog/bar"));
        assert!(!redirects.contains("/blog/foo /blog/baz"));
        assert!(!redirects.contains("/blog/foo"));
        assert!(!redirects.contains("/blog/fo /blog/bar"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let redirects = file("  /blog/foo /blog/bar  \r\n\t/blog/a /blog/b\n");
        assert!(redirects.contains("/blog/foo /blog/bar"));
        assert!(redirects.contains(" /blog/a /blog/b "));
        assert!(redirects.contains_rule(&RedirectRule::expected("/blog", "a", "b")));
    }

    #[test]
    fn test_inner_whitespace_must_match() {
        let redirects = file("/blog/foo  /blog/bar\n/blog/a\t/blog/b\n");
        assert!(!redirects.contains("/blog/foo /blog/bar"));
        assert!(!redirects.contains("/blog/a /blog/b"));
    }

    #[test]
    fn test_rules_skip_blank_and_malformed_lines() {
        let redirects = file("\n/blog/a /blog/b\njunk\n/x /y /z\n   \n/c /d\n");
        let rules: Vec<_> = redirects.rules().collect();
        assert_eq!(
            rules,
            vec![
                RedirectRule::parse("/blog/a /blog/b").unwrap(),
                RedirectRule::parse("/c /d").unwrap(),
            ]
        );
        assert_eq!(redirects.len(), 6);
    }

    #[test]
    fn test_target_of_finds_first_rule() {
        let redirects = file("/blog/a /blog/b\n/blog/a /blog/c\n");
        assert_eq!(redirects.target_of("/blog/a"), Some("/blog/b".to_string()));
        assert_eq!(redirects.target_of("/blog/b"), None);
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "/blog/foo /blog/bar").unwrap();

        let redirects = RedirectFile::load(tmp.path()).unwrap();
        assert!(redirects.contains("/blog/foo /blog/bar"));
        assert_eq!(redirects.path(), tmp.path());
    }

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = RedirectFile::load(&dir.path().join("_redirects")).unwrap_err();
        assert!(matches!(err, CheckError::RedirectsUnreadable { .. }));
    }
}
