use std::path::Path;

/// length of a `YYYY-MM-DD-` prefix
const DATE_PREFIX_LEN: usize = 11;

/// derive the url slug of a post from its path
///
/// `_posts/2020-01-01-my-post.md` becomes `my-post`: the directory and the
/// last extension are dropped, then a leading date prefix if present
pub fn from_path(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    strip_date_prefix(&stem).to_string()
}

/// remove a leading `YYYY-MM-DD-` from a file name
pub fn strip_date_prefix(name: &str) -> &str {
    if has_date_prefix(name) {
        &name[DATE_PREFIX_LEN..]
    } else {
        name
    }
}

fn has_date_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < DATE_PREFIX_LEN {
        return false;
    }
    bytes[..DATE_PREFIX_LEN]
        .iter()
        .enumerate()
        .all(|(i, b)| match i {
            4 | 7 | 10 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_directory_extension_and_date() {
        assert_eq!(from_path("_posts/2020-01-01-foo.md"), "foo");
        assert_eq!(from_path("_posts/nested/2019-12-31-a-b-c.markdown"), "a-b-c");
    }

    #[test]
    fn test_without_date_prefix_keeps_basename() {
        assert_eq!(from_path("_posts/foo.md"), "foo");
        assert_eq!(from_path("foo"), "foo");
        assert_eq!(from_path("_posts/20-01-01-foo.md"), "20-01-01-foo");
    }

    #[test]
    fn test_date_pattern_must_be_exact() {
        assert_eq!(strip_date_prefix("2020-1-01-foo"), "2020-1-01-foo");
        assert_eq!(strip_date_prefix("2020_01_01-foo"), "2020_01_01-foo");
        assert_eq!(strip_date_prefix("abcd-01-01-foo"), "abcd-01-01-foo");
        // the dash after the day is part of the prefix
        assert_eq!(strip_date_prefix("2020-01-01foo"), "2020-01-01foo");
        assert_eq!(strip_date_prefix("2020-01-01-"), "");
    }

    #[test]
    fn test_only_leading_date_is_stripped() {
        assert_eq!(from_path("_posts/foo-2020-01-01-bar.md"), "foo-2020-01-01-bar");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        for path in [
            "_posts/2020-01-01-foo.md",
            "_posts/foo.md",
            "_posts/2021-06-30-debugging-with-gdb.md",
            "README",
        ] {
            let once = from_path(path);
            assert_eq!(from_path(&once), once, "{path}");
        }
    }

    #[test]
    fn test_dotted_names_drop_only_the_last_extension() {
        let once = from_path("_posts/2020-01-01-v1.2-release.md");
        assert_eq!(once, "v1.2-release");

        // a second pass treats `.2-release` as an extension
        assert_eq!(from_path(&once), "v1");
    }

    #[test]
    fn test_date_changes_share_a_slug() {
        assert_eq!(
            from_path("_posts/2020-01-01-foo.md"),
            from_path("_posts/2020-02-02-foo.md")
        );
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(from_path("_posts/2020-01-01-café.md"), "café");
        assert_eq!(strip_date_prefix("é"), "é");
    }
}
