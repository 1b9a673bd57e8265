//! Changelog generation for issue-tracked commit logs.
//!
//! Commit log lines are scanned for issue keys, the keys are enriched with
//! issue metadata through an [`IssueLookup`](lookup::IssueLookup), and the
//! result is rendered as markdown lines grouped into tracked issues and
//! other changes. The rendered text can later be parsed back into issue
//! assignees once a release has been deployed.

/// Parsing of `(@username)` trailers from rendered changelogs.
pub mod assignees;

/// Changelog line rendering and the async build pipeline.
pub mod builder;

/// Issue key matching for commit messages and branch names.
pub mod issue_key;

/// Issue metadata lookup port and its fallback wrapper.
pub mod lookup;
