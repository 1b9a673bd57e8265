use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueUser {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFields {
    pub summary: String,
    pub creator: IssueUser,
}

/// Issue payload as returned by the tracker, reduced to the fields used
/// for branching and changelogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub key: String,
    pub fields: IssueFields,
}

impl Issue {
    pub fn new(
        key: impl Into<String>,
        summary: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            fields: IssueFields {
                summary: summary.into(),
                creator: IssueUser {
                    name: creator.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TransitionsResponse {
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Serialize)]
pub struct TransitionId {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct TransitionBody {
    pub transition: TransitionId,
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct AssigneeBody {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct BoardsResponse {
    pub values: Vec<Board>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SprintsResponse {
    pub values: Vec<Sprint>,
}

/// Kinds of issues that can be created from the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IssueType {
    #[default]
    Task,
    Bug,
    Change,
    Other,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueType::Task => "task",
            IssueType::Bug => "bug",
            IssueType::Change => "change",
            IssueType::Other => "other",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Request to create a new issue in the active sprint.
pub struct CreateIssueRequest {
    pub summary: String,
    pub issue_type: IssueType,
    pub story_points: Option<f64>,
}
