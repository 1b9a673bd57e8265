use serde::Deserialize;

use crate::tracker::types::IssueType;

/// Issue type ids of the tracker, per kind of issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssueTypeIds {
    pub task: String,
    pub bug: String,
    pub change: String,
    pub other: String,
}

impl IssueTypeIds {
    /// Configured id for the issue type, `None` when left empty.
    pub fn id_for(&self, issue_type: IssueType) -> Option<&str> {
        let id = match issue_type {
            IssueType::Task => &self.task,
            IssueType::Bug => &self.bug,
            IssueType::Change => &self.change,
            IssueType::Other => &self.other,
        };
        (!id.is_empty()).then_some(id.as_str())
    }
}

/// Workflow transition names walked through at each stage of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransitionsConfig {
    pub all: Vec<String>,
    pub start_progress: Vec<String>,
    pub ready_to_deploy: Vec<String>,
    pub deployed: Vec<String>,
}

impl Default for TransitionsConfig {
    fn default() -> Self {
        Self {
            all: vec![
                "Start Progress".into(),
                "Ready to Deploy".into(),
                "Deployed".into(),
            ],
            start_progress: vec!["Start Progress".into()],
            ready_to_deploy: vec!["Ready to Deploy".into()],
            deployed: vec!["Deployed".into()],
        }
    }
}

/// Issue tracker project settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    pub project_id: String,
    pub priority_id: String,
    pub component_id: String,
    /// User new issues are assigned to
    pub assignee: String,
    /// Agile board whose active sprint receives new issues
    pub board: String,
    pub issue_types: IssueTypeIds,
    /// Custom field holding the sprint id, e.g. `customfield_10007`
    pub sprint_field: String,
    /// Custom field holding story points
    pub story_point_field: String,
    pub transitions: TransitionsConfig,
}
