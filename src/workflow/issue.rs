use log::*;

use crate::{
    Result,
    slug::slug,
    tracker::{
        move_issue,
        types::{CreateIssueRequest, IssueType},
    },
    workflow::{AbortReason, Outcome, Workflow},
};

impl Workflow {
    /// Create an issue in the active sprint and offer to start it.
    pub async fn create(
        &self,
        title: &str,
        issue_type: IssueType,
        story_points: Option<f64>,
    ) -> Result<Outcome> {
        info!("creating {issue_type} \"{title}\"");

        let created = self
            .tracker
            .create_issue(CreateIssueRequest {
                summary: title.to_string(),
                issue_type,
                story_points,
            })
            .await?;

        info!("created issue {}", created.key);

        let question = format!("Start issue {} now?", created.key);
        if self.console.confirm(&question)? {
            return self.start(&created.key).await;
        }

        Ok(Outcome::Completed)
    }

    /// Switch to the feature branch of an issue, creating and publishing it
    /// from an up to date main branch when it does not exist yet.
    pub async fn start(&self, issue: &str) -> Result<Outcome> {
        let issue_key = self.issue_key(issue);

        if !self.vcs.is_clean()? {
            return Ok(Outcome::abort(AbortReason::DirtyRepository));
        }

        info!("fetching issue {issue_key}");
        let issue = self.tracker.find_issue(&issue_key).await?;
        let key = if issue.key.is_empty() {
            issue_key.as_str()
        } else {
            issue.key.as_str()
        };
        let branch = format!("{key}/{}", slug(&issue.fields.summary));

        info!("issue: {key} / {}", issue.fields.summary);

        if self.vcs.branch_exists(&branch)? {
            info!("branch {branch} already exists, checking out");
            self.vcs.checkout(&branch)?;
        } else {
            info!("updating {}", self.main_branch());
            self.vcs.checkout(self.main_branch())?;
            self.vcs.pull(self.remote())?;

            info!("creating branch {branch}");
            self.vcs.create_branch(&branch)?;
            self.vcs.push_branch(self.remote(), &branch)?;
        }

        move_issue(
            &*self.tracker,
            &issue_key,
            &self.config.jira.transitions.start_progress,
        )
        .await?;

        info!("done! happy coding!");

        Ok(Outcome::Completed)
    }

    pub fn open(&self, issue: &str) -> Result<Outcome> {
        let url =
            format!("{}/{}", self.tracker.browse_base(), self.issue_key(issue));
        self.console.open_url(&url)?;
        Ok(Outcome::Completed)
    }

    /// Move an issue through every configured transition.
    pub async fn move_through_all(&self, issue: &str) -> Result<Outcome> {
        move_issue(
            &*self.tracker,
            &self.issue_key(issue),
            &self.config.jira.transitions.all,
        )
        .await?;

        Ok(Outcome::Completed)
    }
}
