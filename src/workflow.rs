//! Workflow commands tying the tracker, repository, wiki, chat and local
//! scripts together.
//!
//! A [`Workflow`] owns one implementation of every collaborator port. Each
//! command checks its preconditions first; a failed precondition is logged
//! and reported as [`Outcome::Aborted`] instead of an error so the CLI can
//! exit cleanly.
use derive_builder::Builder;
use log::*;
use std::{fmt, path::Path};

use crate::{
    DevflowError, Result,
    changelog::issue_key::{full_issue_key, issue_key_from_branch},
    chat::{Notifier, slack::SlackNotifier},
    cli::Command,
    config::Config,
    console::{Console, TerminalConsole},
    repo::{GitRepository, traits::Vcs},
    runner::{ProcessRunner, ScriptRunner},
    tracker::{jira::JiraClient, traits::IssueTracker},
    wiki::{confluence::ConfluenceClient, traits::Wiki},
};

/// Committing and merging feature branches.
mod commit;

/// Creating, starting, opening and moving issues.
mod issue;

/// Deploys, release candidates and release history notes.
mod release;

/// Why a command stopped before doing anything irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    DirtyRepository,
    NothingToCommit,
    OnMainBranch,
    NotOnMainBranch,
    MergeConflict,
    Cancelled,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AbortReason::DirtyRepository => "repository is not clean",
            AbortReason::NothingToCommit => {
                "repository is clean, there is nothing to commit"
            }
            AbortReason::OnMainBranch => {
                "this command cannot run on the main branch"
            }
            AbortReason::NotOnMainBranch => {
                "this command can only run on the main branch"
            }
            AbortReason::MergeConflict => {
                "merge left changes behind, resolve the conflicts first"
            }
            AbortReason::Cancelled => "cancelled",
        };
        write!(f, "{reason}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Aborted(AbortReason),
}

impl Outcome {
    fn abort(reason: AbortReason) -> Self {
        warn!("{reason}");
        Outcome::Aborted(reason)
    }
}

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(private, name = "_build"))]
pub struct Workflow {
    config: Config,
    tracker: Box<dyn IssueTracker>,
    vcs: Box<dyn Vcs>,
    wiki: Box<dyn Wiki>,
    notifier: Box<dyn Notifier>,
    runner: Box<dyn ScriptRunner>,
    console: Box<dyn Console>,
}

impl WorkflowBuilder {
    pub fn build(self) -> Result<Workflow> {
        self._build().map_err(|e| {
            DevflowError::invalid_config(format!(
                "Failed to build workflow: {e}"
            ))
        })
    }
}

impl Workflow {
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::default()
    }

    /// Wire the real collaborators described by the config.
    pub fn from_config(config: Config) -> Result<Self> {
        let tracker = JiraClient::new(&config)?;
        let vcs = GitRepository::open(Path::new(&config.project.repo_path))?;
        let wiki = ConfluenceClient::new(&config)?;
        let notifier = SlackNotifier::new(&config.slack)?;
        let runner = ProcessRunner::new(config.commands.clone());

        Self::builder()
            .tracker(Box::new(tracker))
            .vcs(Box::new(vcs))
            .wiki(Box::new(wiki))
            .notifier(Box::new(notifier))
            .runner(Box::new(runner))
            .console(Box::new(TerminalConsole))
            .config(config)
            .build()
    }

    pub async fn run(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::Create {
                title,
                points,
                issue_type,
            } => self.create(&title, issue_type, points).await,
            Command::Start { issue } => self.start(&issue).await,
            Command::Open { issue } => self.open(&issue),
            Command::Commit { message } => self.commit(message).await,
            Command::Done => self.done().await,
            Command::Deploy => self.deploy().await,
            Command::Rc { version } => self.rc(version),
            Command::Move { issue } => self.move_through_all(&issue).await,
            Command::ReleaseNotes => self.release_notes().await,
        }
    }

    fn issue_key(&self, issue: &str) -> String {
        full_issue_key(&self.config.project.code, issue)
    }

    fn main_branch(&self) -> &str {
        &self.config.project.main_branch
    }

    fn remote(&self) -> &str {
        &self.config.project.remote
    }

    /// Current branch and the issue key it was named after.
    fn current_issue(&self) -> Result<(String, String)> {
        let branch = self.vcs.current_branch()?;
        let issue_key = issue_key_from_branch(&branch).to_string();
        Ok((branch, issue_key))
    }
}
