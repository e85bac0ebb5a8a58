// locations
pub const DEFAULT_POSTS_DIR: &str = "_posts";
pub const DEFAULT_REDIRECTS_FILE: &str = "_redirects";

// refs (a pull request merge commit is always compared against its first parent)
pub const DEFAULT_BASE_REF: &str = "HEAD^";
pub const DEFAULT_HEAD_REF: &str = "HEAD";

// rename detection
pub const DEFAULT_RENAME_THRESHOLD: u8 = 50;

// redirects
pub const DEFAULT_URL_PREFIX: &str = "/blog";

// exit codes
pub const EXIT_MISSING_REDIRECT: i32 = 1;
pub const EXIT_CONFIGURATION: i32 = 2;
