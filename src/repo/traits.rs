//! Version control port used by the workflow
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    repo::types::{LogEntry, StatusEntry},
};

#[cfg_attr(test, automock)]
pub trait Vcs: Send {
    /// True when there are no staged, unstaged or untracked changes.
    fn is_clean(&self) -> Result<bool>;
    fn status_entries(&self) -> Result<Vec<StatusEntry>>;
    /// Patch text of the staged changes against HEAD.
    fn staged_diff(&self) -> Result<String>;
    fn current_branch(&self) -> Result<String>;
    fn branch_exists(&self, branch: &str) -> Result<bool>;
    fn checkout(&self, branch: &str) -> Result<()>;
    /// Create a branch at HEAD and switch to it.
    fn create_branch(&self, branch: &str) -> Result<()>;
    /// Fetch the current branch from the remote and merge it in.
    fn pull(&self, remote: &str) -> Result<()>;
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;
    fn add_all(&self) -> Result<()>;
    fn commit(&self, message: &str) -> Result<()>;
    /// Check out `into` and merge `from` into it. Conflicts are left in the
    /// working tree.
    fn merge(&self, from: &str, into: &str) -> Result<()>;
    fn log(&self, branch: &str) -> Result<Vec<LogEntry>>;
    fn all_tags(&self) -> Result<Vec<String>>;
    /// Highest `vX.Y.Z` release tag.
    fn latest_tag(&self) -> Result<Option<String>>;
    /// Lightweight tag at HEAD.
    fn add_tag(&self, tag: &str) -> Result<()>;
    fn push_tags(&self, remote: &str) -> Result<()>;
}
