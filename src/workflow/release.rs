use chrono::Local;
use futures_util::future::join_all;
use log::*;
use serde::Serialize;

use crate::{
    DevflowError, Result,
    changelog::{
        assignees::{AssigneeEntry, parse_assignees},
        builder::{ChangelogOptions, build_changelog},
    },
    chat::ChatMessage,
    rc_tag::next_rc_tag,
    release_notes::{commits_since_last_release, generate_release_notes},
    render::{chat::to_chat_markup, wiki::to_wiki_html},
    tracker::{TrackerLookup, move_issue},
    wiki::append_to_page,
    workflow::{AbortReason, Outcome, Workflow},
};

/// Format of the release timestamp in release note titles.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
struct ReleaseTitleContext<'a> {
    tag: &'a str,
    date: &'a str,
}

/// Render the release note title template with `tag` and `date`.
pub fn render_release_title(
    template: &str,
    tag: &str,
    date: &str,
) -> Result<String> {
    let context =
        tera::Context::from_serialize(ReleaseTitleContext { tag, date })?;
    Ok(tera::Tera::one_off(template, &context, false)?)
}

/// Markdown release note: a level two title followed by the changelog.
pub fn release_note(title: &str, changelog: &str) -> String {
    format!("## {title}\n{changelog}")
}

impl Workflow {
    /// Deploy the main branch, close out the deployed issues and publish
    /// the reviewed changelog to the wiki and chat.
    pub async fn deploy(&self) -> Result<Outcome> {
        let branch = self.vcs.current_branch()?;

        if branch != self.main_branch() {
            return Ok(Outcome::abort(AbortReason::NotOnMainBranch));
        }

        if !self.vcs.is_clean()? {
            return Ok(Outcome::abort(AbortReason::DirtyRepository));
        }

        info!("fetching issues info from the tracker...");
        let entries = self.vcs.log(self.main_branch())?;
        let logs = commits_since_last_release(&entries);
        let options = ChangelogOptions {
            issue_link: Some(self.tracker.browse_base()),
            ..ChangelogOptions::default()
        };
        let lines = build_changelog(
            &logs,
            &self.config.project.code,
            &TrackerLookup::new(&*self.tracker),
            &options,
        )
        .await?;

        let changelog = self.console.edit(&lines.join("\n"))?;

        if changelog.trim().is_empty() {
            return Ok(Outcome::abort(AbortReason::Cancelled));
        }

        self.console.show(&changelog);

        info!("creating new tag and triggering deploy...");
        self.runner.deploy().await?;

        let pending = parse_assignees(&changelog, &self.config.project.code)?;
        let tag = self
            .vcs
            .latest_tag()?
            .ok_or(DevflowError::MissingReleaseTag)?;

        info!("pending issues: {} issue(s)", pending.len());
        for entry in pending.iter() {
            info!(" - {} ({})", entry.issue_key, entry.username);
        }

        let closed = join_all(
            pending.iter().map(|entry| self.close_deployed(entry, &tag)),
        )
        .await;

        let mut first_error = None;
        for (entry, result) in pending.iter().zip(closed) {
            if let Err(err) = result {
                error!("failed to close issue {}: {err}", entry.issue_key);
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        info!("updating release note...");
        let date = Local::now().format(RELEASE_DATE_FORMAT).to_string();
        let title = render_release_title(
            &self.config.project.release_title,
            &tag,
            &date,
        )?;
        let note = release_note(&title, &changelog);

        let page_url = append_to_page(
            &*self.wiki,
            &self.config.confluence.release_page,
            &to_wiki_html(&note),
        )
        .await?;

        info!("notifying chat...");
        self.notifier
            .send(&ChatMessage::new(to_chat_markup(&note, Some(&page_url))))
            .await?;

        info!("done");

        Ok(Outcome::Completed)
    }

    /// Move a deployed issue, note the release tag and hand it back to the
    /// user named in the changelog.
    async fn close_deployed(
        &self,
        entry: &AssigneeEntry,
        tag: &str,
    ) -> Result<()> {
        move_issue(
            &*self.tracker,
            &entry.issue_key,
            &self.config.jira.transitions.deployed,
        )
        .await?;
        self.tracker
            .add_comment(&entry.issue_key, &format!("Done at {tag}."))
            .await?;
        self.tracker
            .assign_issue(&entry.issue_key, &entry.username)
            .await?;

        info!("issue {}... done", entry.issue_key);

        Ok(())
    }

    /// Tag the next release candidate of the current feature branch and
    /// push it.
    pub fn rc(&self, version: Option<String>) -> Result<Outcome> {
        let version = match version {
            Some(version) => version,
            None => self
                .vcs
                .latest_tag()?
                .ok_or(DevflowError::MissingReleaseTag)?,
        };

        let (_, feature) = self.current_issue()?;
        let tags = self.vcs.all_tags()?;
        let tag = next_rc_tag(&tags, &feature, &version);

        info!("tagging {tag}");
        self.vcs.add_tag(&tag)?;
        self.vcs.push_tags(self.remote())?;

        Ok(Outcome::Completed)
    }

    /// Print notes for every release on the main branch.
    pub async fn release_notes(&self) -> Result<Outcome> {
        let entries = self.vcs.log(self.main_branch())?;

        let notes = generate_release_notes(
            &entries,
            &self.config.project.notes_title,
            &self.config.project.code,
            &TrackerLookup::new(&*self.tracker),
        )
        .await?;

        self.console.show(&notes);

        Ok(Outcome::Completed)
    }
}
