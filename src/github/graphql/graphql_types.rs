//! Wire types for the GraphQL queries this tool issues
//!
//! The structs mirror the shape of the GraphQL responses; conversions into
//! the domain types in [`crate::types`] live next to the response structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Issue, IssueState, Label, Milestone, MilestoneNumber};

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLQuery(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLPayload<T: serde::Serialize> {
    pub query: GraphQLQuery,
    pub variables: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<serde_json::Value>,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConnection {
    pub nodes: Vec<LabelNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelNode {
    pub name: String,
}

/// Response structure for the repository milestones query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMilestonesResponse {
    pub repository: Option<MilestonesRepositoryNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestonesRepositoryNode {
    pub milestones: MilestonesConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestonesConnection {
    pub nodes: Vec<MilestoneNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneNode {
    pub number: u64,
    pub title: String,
    #[serde(rename = "dueOn")]
    pub due_on: Option<DateTime<Utc>>,
}

impl From<MilestoneNode> for Milestone {
    fn from(node: MilestoneNode) -> Self {
        Milestone::new(MilestoneNumber::new(node.number), node.title, node.due_on)
    }
}

/// Response structure for the milestone issues query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneIssuesResponse {
    pub repository: Option<IssuesRepositoryNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesRepositoryNode {
    pub milestone: Option<MilestoneIssuesNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneIssuesNode {
    pub issues: IssuesConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesConnection {
    pub nodes: Vec<IssueNode>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueNode {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub labels: Option<LabelsConnection>,
}

impl TryFrom<IssueNode> for Issue {
    type Error = anyhow::Error;

    fn try_from(issue_node: IssueNode) -> Result<Self, Self::Error> {
        let state = issue_node
            .state
            .parse::<IssueState>()
            .map_err(|_| anyhow::anyhow!("Unknown issue state: {}", issue_node.state))?;

        let labels = issue_node
            .labels
            .map(|labels| {
                labels
                    .nodes
                    .into_iter()
                    .map(|label| Label::new(label.name))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Issue::new(
            crate::types::IssueNumber::new(issue_node.number),
            issue_node.title,
            state,
            labels,
        ))
    }
}
