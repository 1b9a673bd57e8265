//! Issue metadata lookup used to enrich changelog entries.
use async_trait::async_trait;
use log::*;

#[cfg(test)]
use mockall::automock;

use crate::{Result, tracker::types::Issue};

/// Summary used when an issue cannot be fetched.
pub const MISSING_ISSUE_SUMMARY: &str = "(Issue not found)";
/// Creator used when an issue cannot be fetched.
pub const MISSING_ISSUE_CREATOR: &str = "error";

/// Resolves an issue key to its tracker payload.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IssueLookup: Send + Sync {
    async fn lookup_issue(&self, issue_key: &str) -> Result<Issue>;
}

/// Wraps a lookup and substitutes a placeholder issue for failed lookups so
/// a single missing issue cannot fail a whole changelog.
pub struct FallbackLookup<'a, L: IssueLookup + ?Sized> {
    inner: &'a L,
}

impl<'a, L: IssueLookup + ?Sized> FallbackLookup<'a, L> {
    pub fn new(inner: &'a L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: IssueLookup + ?Sized> IssueLookup for FallbackLookup<'_, L> {
    async fn lookup_issue(&self, issue_key: &str) -> Result<Issue> {
        match self.inner.lookup_issue(issue_key).await {
            Ok(issue) => Ok(issue),
            Err(err) => {
                warn!("failed to fetch issue {issue_key}: {err}");
                Ok(Issue::new(
                    issue_key,
                    MISSING_ISSUE_SUMMARY,
                    MISSING_ISSUE_CREATOR,
                ))
            }
        }
    }
}
