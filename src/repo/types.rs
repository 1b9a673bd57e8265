//! Types returned by version control operations
use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Matches release tags such as `v1.2.3`
static RELEASE_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+\.\d+\.\d+$").unwrap());

/// Whether the tag names a release rather than a release candidate.
pub fn is_release_tag(tag: &str) -> bool {
    RELEASE_TAG_REGEX.is_match(tag)
}

/// A commit on a branch, newest first when returned from a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    pub id: String,
    /// Commit summary line
    pub message: String,
    /// Commit time as `YYYY-MM-DD HH:MM:SS +ZZZZ`
    pub date: String,
    /// Names of the tags pointing at this commit
    pub tags: Vec<String>,
}

impl LogEntry {
    /// First release tag pointing at this commit.
    pub fn release_tag(&self) -> Option<&str> {
        self.tags
            .iter()
            .map(|tag| tag.as_str())
            .find(|tag| is_release_tag(tag))
    }
}

/// A changed path in the working tree, with short status codes in the style
/// of `git status --short`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub index: char,
    pub worktree: char,
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.index, self.worktree, self.path)
    }
}

impl StatusEntry {
    pub fn from_status(path: impl Into<String>, status: git2::Status) -> Self {
        let path = path.into();

        if status.is_wt_new() {
            return Self {
                path,
                index: '?',
                worktree: '?',
            };
        }

        let index = if status.is_index_new() {
            'A'
        } else if status.is_index_modified() {
            'M'
        } else if status.is_index_deleted() {
            'D'
        } else if status.is_index_renamed() {
            'R'
        } else if status.is_index_typechange() {
            'T'
        } else {
            ' '
        };

        let worktree = if status.is_conflicted() {
            'U'
        } else if status.is_wt_modified() {
            'M'
        } else if status.is_wt_deleted() {
            'D'
        } else if status.is_wt_renamed() {
            'R'
        } else if status.is_wt_typechange() {
            'T'
        } else {
            ' '
        };

        Self {
            path,
            index,
            worktree,
        }
    }
}
