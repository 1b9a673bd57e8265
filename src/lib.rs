//! Developer workflow assistant for issue-tracked feature branches.
//!
//! Issues are created and started in the tracker, work happens on
//! `<ISSUE-KEY>/<slug>` branches with area-tagged commits, and deploys turn
//! the commit log into a changelog that is published to the wiki and chat.
pub mod changelog;
pub mod chat;
pub mod cli;
pub mod commit_tag;
pub mod config;
pub mod console;
pub mod error;
pub mod rc_tag;
pub mod release_notes;
pub mod render;
pub mod repo;
pub mod runner;
pub mod slug;
pub mod tracker;
pub mod wiki;
pub mod workflow;

pub use error::{DevflowError, Result};
pub use workflow::{AbortReason, Outcome, Workflow};

#[cfg(test)]
pub mod test_helpers;
