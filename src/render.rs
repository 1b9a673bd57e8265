//! Conversions of changelog markdown into the markup of the wiki and chat
//! collaborators. Both renderers work line by line and never merge or reflow
//! lines.

/// Slack flavoured mrkdwn.
pub mod chat;

/// Confluence storage format HTML.
pub mod wiki;
