use log::*;

use crate::{
    Result,
    commit_tag::classify_with_rules,
    tracker::move_issue,
    workflow::{AbortReason, Outcome, Workflow},
};

/// Actions offered when committing without a message.
pub const COMMIT_ACTIONS: [&str; 3] =
    ["Show diff", "Add all & write commit message", "Cancel"];

const SHOW_DIFF: usize = 0;
const ADD_AND_COMMIT: usize = 1;

impl Workflow {
    /// Commit every change on the feature branch. Without a message the
    /// status is shown and the user picks what to do next.
    pub async fn commit(&self, message: Option<String>) -> Result<Outcome> {
        if self.vcs.is_clean()? {
            return Ok(Outcome::abort(AbortReason::NothingToCommit));
        }

        if let Some(message) = message {
            self.vcs.add_all()?;
            return self.commit_staged(&message).await;
        }

        let status = self
            .vcs
            .status_entries()?
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<String>>();

        self.console.show(&format!(
            "----- GIT STATUS BEGIN -----\n{}\n----- GIT STATUS END -----",
            status.join("\n")
        ));

        let actions = COMMIT_ACTIONS
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<String>>();

        match self.console.choose(
            "Please select an action",
            &actions,
            ADD_AND_COMMIT,
        )? {
            Some(SHOW_DIFF) => {
                self.vcs.add_all()?;
                self.console.show(&self.vcs.staged_diff()?);
                Ok(Outcome::Completed)
            }
            Some(ADD_AND_COMMIT) => {
                self.vcs.add_all()?;
                let text = self.console.edit("")?;
                self.commit_staged(&text).await
            }
            _ => Ok(Outcome::abort(AbortReason::Cancelled)),
        }
    }

    /// Commit the index as `<area tag> [<issue key>] <text>`. Empty text is
    /// replaced by the summary of the branch's issue.
    async fn commit_staged(&self, text: &str) -> Result<Outcome> {
        let (_, issue_key) = self.current_issue()?;

        let text = match text.trim() {
            "" => {
                info!("fetching issue title as commit message...");
                self.tracker.find_issue(&issue_key).await?.fields.summary
            }
            text => text.to_string(),
        };

        let paths = self
            .vcs
            .status_entries()?
            .into_iter()
            .map(|entry| entry.path)
            .collect::<Vec<String>>();
        let tag = classify_with_rules(&paths, &self.config.commit_tags);

        let message = format!("{tag} [{issue_key}] {text}");
        let message = message.trim_start();

        info!("committing: {message}");
        self.vcs.commit(message)?;

        Ok(Outcome::Completed)
    }

    /// Merge the current feature branch into the main branch once tests
    /// pass, then mark its issue ready to deploy.
    pub async fn done(&self) -> Result<Outcome> {
        let (branch, issue_key) = self.current_issue()?;

        if branch == self.main_branch() {
            return Ok(Outcome::abort(AbortReason::OnMainBranch));
        }

        if !self.vcs.is_clean()? {
            return Ok(Outcome::abort(AbortReason::DirtyRepository));
        }

        info!("merging {} into {branch}", self.main_branch());
        self.vcs.merge(self.main_branch(), &branch)?;

        if !self.vcs.is_clean()? {
            return Ok(Outcome::abort(AbortReason::MergeConflict));
        }

        self.runner.run_tests().await?;

        self.vcs.checkout(self.main_branch())?;
        info!("merging {branch} into {}", self.main_branch());
        self.vcs.merge(&branch, self.main_branch())?;
        self.vcs.push_branch(self.remote(), self.main_branch())?;

        move_issue(
            &*self.tracker,
            &issue_key,
            &self.config.jira.transitions.ready_to_deploy,
        )
        .await?;

        info!("done");

        Ok(Outcome::Completed)
    }
}
