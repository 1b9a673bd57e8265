//! Issue tracker access.
//!
//! The [`IssueTracker`](traits::IssueTracker) port covers the few calls the
//! workflow needs: reading, creating, commenting on, assigning and
//! transitioning issues. [`jira::JiraClient`] implements it over the REST
//! API.
use async_trait::async_trait;
use log::*;

use crate::{
    Result, changelog::lookup::IssueLookup, tracker::traits::IssueTracker,
    tracker::types::Issue,
};

/// Jira REST API client.
pub mod jira;

/// Issue tracker port.
pub mod traits;

/// Request and response payloads.
pub mod types;

/// Changelog issue lookups answered by the tracker.
pub struct TrackerLookup<'a> {
    tracker: &'a dyn IssueTracker,
}

impl<'a> TrackerLookup<'a> {
    pub fn new(tracker: &'a dyn IssueTracker) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl IssueLookup for TrackerLookup<'_> {
    async fn lookup_issue(&self, issue_key: &str) -> Result<Issue> {
        info!("fetching {issue_key}...");
        self.tracker.find_issue(issue_key).await
    }
}

/// Walk an issue through the named transitions in order.
///
/// Names are matched case-insensitively against the transitions available
/// at each step. A name that is not available is logged and skipped.
pub async fn move_issue(
    tracker: &dyn IssueTracker,
    issue_key: &str,
    transitions: &[String],
) -> Result<()> {
    for name in transitions {
        let available = tracker.list_transitions(issue_key).await?;

        let Some(transition) = available
            .iter()
            .find(|transition| transition.name.eq_ignore_ascii_case(name))
        else {
            let names = available
                .iter()
                .map(|transition| transition.name.as_str())
                .collect::<Vec<&str>>();
            warn!(
                "transition \"{name}\" not available for {issue_key}, skipping; available: {}",
                names.join(", ")
            );
            continue;
        };

        info!("moving {issue_key} to {}", transition.name);
        tracker.transition_issue(issue_key, transition).await?;
    }

    debug!("transitions of {issue_key} complete");

    Ok(())
}
