//! Documentation wiki that release notes are published to.
use log::*;

use crate::{Result, wiki::traits::Wiki};

/// Confluence REST API client.
pub mod confluence;

/// Wiki port.
pub mod traits;

/// Page payloads.
pub mod types;

/// Prepend HTML to the page with the given title and return the page URL.
pub async fn append_to_page(
    wiki: &dyn Wiki,
    title: &str,
    html: &str,
) -> Result<String> {
    let page = wiki.get_page(title).await?;

    debug!(
        "prepending release note to page {} at version {}",
        page.id, page.version.number
    );

    let content = format!("{html}{}", page.body.storage.value);
    let updated = wiki.update_page(&page, &content).await?;

    Ok(wiki.page_url(&updated))
}
