//! Recovers issue assignees from an edited changelog.
use regex::Regex;

use crate::Result;

/// Issue key and the user named at the end of its changelog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeEntry {
    pub issue_key: String,
    pub username: String,
}

/// Collect `(issue key, username)` pairs from changelog lines shaped like
/// `- [SE-1] title (@user)`, `- SE-1 title (@user)` or
/// `- [[SE-1]](link) title (@user)`. Other lines are skipped and repeated
/// keys are kept.
pub fn parse_assignees(
    text: &str,
    issue_prefix: &str,
) -> Result<Vec<AssigneeEntry>> {
    let regex = Regex::new(&format!(
        r"\s?[\[\s]({}-[0-9]+)[\]\s].*?\(@(.*?)\)$",
        regex::escape(issue_prefix)
    ))?;

    Ok(text
        .lines()
        .filter_map(|line| regex.captures(line))
        .map(|caps| AssigneeEntry {
            issue_key: caps[1].to_string(),
            username: caps[2].to_string(),
        })
        .collect())
}
