//! Implements the IssueTracker trait for Jira
use async_trait::async_trait;
use log::*;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value, json};

use crate::{
    Result,
    config::{Config, jira::JiraConfig},
    error::DevflowError,
    tracker::{
        traits::IssueTracker,
        types::{
            AssigneeBody, BoardsResponse, CommentBody, CreateIssueRequest,
            CreatedIssue, Issue, Sprint, SprintsResponse, Transition,
            TransitionBody, TransitionId, TransitionsResponse,
        },
    },
};

/// Path of the core REST API on the server.
const API_PATH: &str = "rest/api/2";
/// Path of the agile REST API used for boards and sprints.
const AGILE_PATH: &str = "rest/agile/1.0";

/// Build the create-issue payload.
///
/// Optional ids left empty in the config are omitted. The sprint id is only
/// sent when a sprint field is configured, story points only when given and
/// a story point field is configured.
pub fn build_issue_payload(
    jira: &JiraConfig,
    req: &CreateIssueRequest,
    sprint_id: Option<u64>,
) -> Result<Value> {
    let type_id =
        jira.issue_types.id_for(req.issue_type).ok_or_else(|| {
            DevflowError::UnsupportedIssueType(req.issue_type.to_string())
        })?;

    let mut fields = Map::new();
    fields.insert("project".into(), json!({ "id": jira.project_id }));
    fields.insert("summary".into(), json!(req.summary));
    fields.insert("issuetype".into(), json!({ "id": type_id }));

    if !jira.assignee.is_empty() {
        fields.insert("assignee".into(), json!({ "name": jira.assignee }));
    }

    if !jira.priority_id.is_empty() {
        fields.insert("priority".into(), json!({ "id": jira.priority_id }));
    }

    if !jira.component_id.is_empty() {
        fields.insert(
            "components".into(),
            json!([{ "id": jira.component_id }]),
        );
    }

    if !jira.sprint_field.is_empty()
        && let Some(sprint_id) = sprint_id
    {
        fields.insert(jira.sprint_field.clone(), json!(sprint_id));
    }

    if !jira.story_point_field.is_empty()
        && let Some(points) = req.story_points
    {
        fields.insert(jira.story_point_field.clone(), json!(points));
    }

    Ok(json!({ "fields": fields }))
}

/// Jira client using basic authentication for every request.
pub struct JiraClient {
    client: Client,
    api_url: Url,
    agile_url: Url,
    browse_base: String,
    user: String,
    password: SecretString,
    project_code: String,
    jira: JiraConfig,
}

impl JiraClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_url: config.server.base_url(API_PATH)?,
            agile_url: config.server.base_url(AGILE_PATH)?,
            browse_base: config.server.browse_base(),
            user: config.server.user.clone(),
            password: config.server.password.clone(),
            project_code: config.project.code.clone(),
            jira: config.jira.clone(),
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.user, Some(self.password.expose_secret()))
    }

    /// Last active sprint of the configured board.
    async fn active_sprint(&self) -> Result<Sprint> {
        let mut boards_url = self.agile_url.join("board")?;
        boards_url
            .query_pairs_mut()
            .append_pair("projectKeyOrId", &self.project_code);

        debug!("looking up board \"{}\"", self.jira.board);
        let response = self.request(Method::GET, boards_url).send().await?;
        let boards: BoardsResponse = response.error_for_status()?.json().await?;

        let board = boards
            .values
            .into_iter()
            .find(|board| board.name.eq_ignore_ascii_case(&self.jira.board))
            .ok_or_else(|| {
                DevflowError::tracker(format!(
                    "board \"{}\" not found for project {}",
                    self.jira.board, self.project_code
                ))
            })?;

        let mut sprints_url =
            self.agile_url.join(&format!("board/{}/sprint", board.id))?;
        sprints_url.query_pairs_mut().append_pair("state", "active");

        debug!("looking up active sprint of board \"{}\"", board.name);
        let response = self.request(Method::GET, sprints_url).send().await?;
        let mut sprints: SprintsResponse =
            response.error_for_status()?.json().await?;

        sprints.values.pop().ok_or_else(|| {
            DevflowError::tracker(format!(
                "board \"{}\" has no active sprint",
                board.name
            ))
        })
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    fn browse_base(&self) -> String {
        self.browse_base.clone()
    }

    async fn find_issue(&self, issue_key: &str) -> Result<Issue> {
        let url = self.api_url.join(&format!("issue/{issue_key}"))?;
        let response = self.request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DevflowError::tracker(format!(
                "invalid issue number {issue_key}"
            )));
        }

        let issue: Issue = response.error_for_status()?.json().await?;
        Ok(issue)
    }

    async fn create_issue(
        &self,
        req: CreateIssueRequest,
    ) -> Result<CreatedIssue> {
        // fail on unsupported types before any request is made
        build_issue_payload(&self.jira, &req, None)?;

        let sprint_id = if self.jira.sprint_field.is_empty() {
            None
        } else {
            let sprint = self.active_sprint().await?;
            info!("creating {} issue in {}", req.issue_type, sprint.name);
            Some(sprint.id)
        };

        let payload = build_issue_payload(&self.jira, &req, sprint_id)?;
        let url = self.api_url.join("issue")?;
        let response =
            self.request(Method::POST, url).json(&payload).send().await?;

        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.text().await?;
            return Err(DevflowError::tracker(format!(
                "issue rejected: {body}"
            )));
        }

        let created: CreatedIssue = response.error_for_status()?.json().await?;
        info!("issue created: {}", created.key);
        Ok(created)
    }

    async fn add_comment(&self, issue_key: &str, comment: &str) -> Result<()> {
        let url = self.api_url.join(&format!("issue/{issue_key}/comment"))?;
        self.request(Method::POST, url)
            .json(&CommentBody {
                body: comment.into(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn assign_issue(
        &self,
        issue_key: &str,
        username: &str,
    ) -> Result<()> {
        let url = self.api_url.join(&format!("issue/{issue_key}/assignee"))?;
        self.request(Method::PUT, url)
            .json(&AssigneeBody {
                name: username.into(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn list_transitions(
        &self,
        issue_key: &str,
    ) -> Result<Vec<Transition>> {
        let url = self.api_url.join(&format!("issue/{issue_key}/transitions"))?;
        let response = self.request(Method::GET, url).send().await?;
        let body: TransitionsResponse =
            response.error_for_status()?.json().await?;
        Ok(body.transitions)
    }

    async fn transition_issue(
        &self,
        issue_key: &str,
        transition: &Transition,
    ) -> Result<()> {
        let url = self.api_url.join(&format!("issue/{issue_key}/transitions"))?;
        self.request(Method::POST, url)
            .json(&TransitionBody {
                transition: TransitionId {
                    id: transition.id.clone(),
                },
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./jira_tests.rs"]
mod tests;
