//! Issue key matching for commit messages and branch names.
use regex::Regex;
use std::collections::HashSet;

use crate::Result;

/// Finds issue keys of a single project inside commit log lines.
///
/// A key must be preceded by `[`, `'` or whitespace and followed by `]`,
/// whitespace or `/`, which accepts `[SE-123]`, ` SE-123 ` and
/// ` SE-123/branch-slug` forms.
#[derive(Debug, Clone)]
pub struct IssueKeyMatcher {
    regex: Regex,
}

impl IssueKeyMatcher {
    pub fn new(issue_prefix: &str) -> Result<Self> {
        let pattern = format!(
            r"[\[\s']({}-[0-9]+)[\]\s/]",
            regex::escape(issue_prefix)
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// First issue key found in the line.
    pub fn find<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Distinct issue keys in order of first appearance, one per line.
    pub fn extract_keys<S: AsRef<str>>(&self, logs: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keys = vec![];

        for log in logs.iter() {
            if let Some(key) = self.find(log.as_ref())
                && seen.insert(key.to_string())
            {
                keys.push(key.to_string());
            }
        }

        keys
    }
}

/// Qualify a bare issue number with the project code. Keys that already
/// carry the prefix are returned unchanged.
pub fn full_issue_key(project_code: &str, issue_key: &str) -> String {
    let number = issue_key
        .strip_prefix(project_code)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(issue_key);
    format!("{project_code}-{number}")
}

/// Feature branches are named `<ISSUE-KEY>/<slug>`.
pub fn issue_key_from_branch(branch: &str) -> &str {
    branch.split('/').next().unwrap_or(branch)
}

/// Issue keys of all branches following the `<ISSUE-KEY>/<slug>` naming
/// convention for the given project.
pub fn parse_branch_issue_keys<S: AsRef<str>>(
    branches: &[S],
    issue_prefix: &str,
) -> Result<Vec<String>> {
    let regex = Regex::new(&format!(
        r"^({}-[0-9]+)/",
        regex::escape(issue_prefix)
    ))?;

    Ok(branches
        .iter()
        .filter_map(|branch| regex.captures(branch.as_ref()))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect())
}
