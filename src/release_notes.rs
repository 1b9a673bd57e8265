//! Release history notes built from the full commit log of the main branch.
use futures_util::future::try_join_all;
use log::*;

use crate::{
    Result,
    changelog::{
        builder::{ChangelogOptions, build_changelog},
        lookup::{FallbackLookup, IssueLookup},
    },
    repo::types::LogEntry,
};

/// Tag and date used for commits newer than the latest release.
pub const UNRELEASED: &str = "future";

/// Commit messages that shipped with a single release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseGroup {
    pub tag: String,
    pub date: String,
    pub messages: Vec<String>,
}

/// Split a newest-first log into release groups.
///
/// A commit carrying a release tag opens the group for that release and its
/// own message is left out; the commits that follow it (older ones) belong to
/// that release until the next release tag. Commits before the first release
/// tag are grouped under [`UNRELEASED`]. Releases without any commits of
/// their own produce no group.
pub fn group_by_release(entries: &[LogEntry]) -> Vec<ReleaseGroup> {
    let mut groups: Vec<ReleaseGroup> = vec![];
    let mut tag = UNRELEASED.to_string();
    let mut date = UNRELEASED.to_string();

    for entry in entries {
        if let Some(release) = entry.release_tag() {
            tag = release.to_string();
            date = entry.date.clone();
            continue;
        }

        match groups.iter_mut().find(|group| group.tag == tag) {
            Some(group) => group.messages.push(entry.message.clone()),
            None => groups.push(ReleaseGroup {
                tag: tag.clone(),
                date: date.clone(),
                messages: vec![entry.message.clone()],
            }),
        }
    }

    groups
}

/// Messages of the commits made after the latest release tag, newest first.
pub fn commits_since_last_release(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .take_while(|entry| entry.release_tag().is_none())
        .map(|entry| entry.message.clone())
        .collect()
}

/// Render the notes of every release in the log under a `# title` heading.
/// Issues that cannot be fetched are listed with a placeholder title.
pub async fn generate_release_notes<L: IssueLookup + ?Sized>(
    entries: &[LogEntry],
    title: &str,
    issue_prefix: &str,
    lookup: &L,
) -> Result<String> {
    let groups = group_by_release(entries);
    let lookup = FallbackLookup::new(lookup);
    let options = ChangelogOptions::default();

    info!("building release notes for {} releases", groups.len());

    let changelogs = try_join_all(groups.iter().map(|group| {
        build_changelog(&group.messages, issue_prefix, &lookup, &options)
    }))
    .await?;

    let mut notes = vec![format!("# {title}")];

    for (group, lines) in groups.iter().zip(changelogs) {
        notes.push(String::new());
        notes.push(format!("## Release {} ({}):", group.tag, group.date));
        notes.push(lines.join("\n"));
    }

    Ok(notes.join("\n"))
}
