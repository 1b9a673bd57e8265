//! Traits related to documentation wikis
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{Result, wiki::types::Page};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Wiki: Send + Sync {
    /// Page with the given title in the configured space.
    async fn get_page(&self, title: &str) -> Result<Page>;
    /// Replace the page body, bumping its version.
    async fn update_page(&self, page: &Page, content: &str) -> Result<Page>;
    /// Browser URL of the page.
    fn page_url(&self, page: &Page) -> String;
}
