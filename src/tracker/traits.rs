//! Traits related to issue trackers
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    tracker::types::{CreateIssueRequest, CreatedIssue, Issue, Transition},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Base URL that issue keys are appended to for browsing,
    /// e.g. `https://jira.example.com/browse`.
    fn browse_base(&self) -> String;
    async fn find_issue(&self, issue_key: &str) -> Result<Issue>;
    async fn create_issue(
        &self,
        req: CreateIssueRequest,
    ) -> Result<CreatedIssue>;
    async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<()>;
    async fn assign_issue(&self, issue_key: &str, username: &str)
    -> Result<()>;
    async fn list_transitions(&self, issue_key: &str)
    -> Result<Vec<Transition>>;
    async fn transition_issue(
        &self,
        issue_key: &str,
        transition: &Transition,
    ) -> Result<()>;
}
