//! Builds markdown changelogs from commit log lines.
use derive_builder::Builder;
use futures_util::future::try_join_all;
use log::*;

use crate::{
    Result,
    changelog::{issue_key::IssueKeyMatcher, lookup::IssueLookup},
    tracker::types::Issue,
};

/// First line of every changelog.
pub const CHANGES_HEADER: &str = "Changes:";
/// Heading shown above tracked issues when other changes exist too.
pub const ISSUES_HEADING: &str = "### JIRA issues:";
/// Heading shown above other changes when tracked issues exist too.
pub const OTHERS_HEADING: &str = "### Others:";

/// Controls which lines end up in a changelog and how issues are linked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct ChangelogOptions {
    /// Leave out every line that is not a tracked issue
    pub issue_only: bool,
    /// Base URL to link issue keys to, the key is appended as a path segment
    pub issue_link: Option<String>,
    /// List every log line under others, including lines that referenced
    /// a tracked issue
    pub duplicate_issues: bool,
}

/// Tracked issue as it appears in a changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub key: String,
    pub title: String,
    pub creator: String,
}

impl IssueRecord {
    pub fn from_issue(key: impl Into<String>, issue: Issue) -> Self {
        Self {
            key: key.into(),
            title: issue.fields.summary,
            creator: issue.fields.creator.name,
        }
    }
}

/// Build changelog lines for the given commit log lines.
///
/// Every distinct issue key is looked up concurrently; the records keep the
/// order in which their keys first appeared. A failed lookup fails the whole
/// changelog.
pub async fn build_changelog<S, L>(
    logs: &[S],
    issue_prefix: &str,
    lookup: &L,
    options: &ChangelogOptions,
) -> Result<Vec<String>>
where
    S: AsRef<str>,
    L: IssueLookup + ?Sized,
{
    let matcher = IssueKeyMatcher::new(issue_prefix)?;
    let issue_keys = matcher.extract_keys(logs);

    debug!(
        "found {} issue keys in changelog: {:?}",
        issue_keys.len(),
        issue_keys
    );

    let issues = try_join_all(
        issue_keys.iter().map(|key| lookup.lookup_issue(key.as_str())),
    )
    .await?;

    let records = issue_keys
        .into_iter()
        .zip(issues)
        .map(|(key, issue)| IssueRecord::from_issue(key, issue))
        .collect::<Vec<IssueRecord>>();

    let others = select_other_lines(logs, &matcher, options);

    Ok(render_changelog_lines(
        &records,
        &others,
        options.issue_link.as_deref(),
    ))
}

/// Lines listed under "others" for the given options.
pub fn select_other_lines<'l, S: AsRef<str>>(
    logs: &'l [S],
    matcher: &IssueKeyMatcher,
    options: &ChangelogOptions,
) -> Vec<&'l str> {
    if options.issue_only {
        return vec![];
    }

    let lines = logs.iter().map(|log| log.as_ref());

    if options.duplicate_issues {
        return lines.collect();
    }

    lines.filter(|line| !matcher.is_match(line)).collect()
}

/// Render a single tracked issue line.
pub fn render_issue_line(
    issue: &IssueRecord,
    issue_link: Option<&str>,
) -> String {
    match issue_link {
        Some(link) => format!(
            "- [[{key}]]({link}/{key}) {} (@{})",
            issue.title,
            issue.creator,
            key = issue.key,
        ),
        None => format!(
            "- [{}] {} (@{})",
            issue.key, issue.title, issue.creator
        ),
    }
}

/// Render changelog lines. Section headings are only added when both
/// tracked issues and other changes are present.
pub fn render_changelog_lines<S: AsRef<str>>(
    issues: &[IssueRecord],
    others: &[S],
    issue_link: Option<&str>,
) -> Vec<String> {
    let section_count =
        usize::from(!issues.is_empty()) + usize::from(!others.is_empty());

    let mut output = vec![CHANGES_HEADER.to_string(), String::new()];

    if !issues.is_empty() {
        if section_count >= 2 {
            output.push(ISSUES_HEADING.to_string());
        }
        output.extend(
            issues
                .iter()
                .map(|issue| render_issue_line(issue, issue_link)),
        );
    }

    if !others.is_empty() {
        if section_count >= 2 {
            output.push(String::new());
            output.push(OTHERS_HEADING.to_string());
        }
        output.extend(others.iter().map(|line| format!("- {}", line.as_ref())));
    }

    output
}

#[cfg(test)]
#[path = "./builder_tests.rs"]
mod tests;
