//! CLI argument parsing.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{config::DEFAULT_CONFIG_FILE, tracker::types::IssueType};

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Path of the devflow config file.
    pub config: PathBuf,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Workflow subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an issue in the active sprint and optionally start it.
    Create {
        /// Summary of the new issue.
        title: String,

        #[arg(long)]
        /// Story point estimate.
        points: Option<f64>,

        #[arg(long = "type", value_enum, default_value_t = IssueType::Task)]
        /// Kind of issue to create.
        issue_type: IssueType,
    },

    /// Create or check out the feature branch of an issue.
    Start {
        /// Issue key, with or without the project prefix.
        issue: String,
    },

    /// Open an issue in the browser.
    Open {
        /// Issue key, with or without the project prefix.
        issue: String,
    },

    /// Commit the working tree with a tagged message.
    Commit {
        /// Commit text. Prompts interactively when omitted.
        message: Option<String>,
    },

    /// Merge the current feature branch into the main branch.
    Done,

    /// Deploy the main branch and publish its release notes.
    Deploy,

    /// Tag a release candidate of the current feature branch.
    Rc {
        #[arg(long)]
        /// Release version the candidate targets. Defaults to the latest
        /// release tag.
        version: Option<String>,
    },

    /// Move an issue through every configured transition.
    Move {
        /// Issue key, with or without the project prefix.
        issue: String,
    },

    /// Print release notes for the whole history of the main branch.
    ReleaseNotes,
}
