//! Query builders for the GraphQL requests this tool issues

use serde::Serialize;

use crate::types::{MilestoneNumber, Owner, RepositoryName};

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryMilestonesVariable {
    pub owner: Owner,
    pub repository_name: RepositoryName,
}

pub fn repository_milestones_query() -> String {
    r#"
        query($owner: String!, $repository_name: String!) {
            repository(owner: $owner, name: $repository_name) {
                milestones(first: 100, states: [OPEN, CLOSED]) {
                    nodes {
                        number
                        title
                        dueOn
                    }
                }
            }
        }
    "#
    .to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneIssuesVariable {
    pub owner: Owner,
    pub repository_name: RepositoryName,
    pub cursor: Option<String>,
}

/// Builds the cursor-paged query for the issues of one milestone.
///
/// The milestone number is baked into the query text; owner, repository name,
/// and the page cursor travel as variables. Both open and closed issues are
/// requested, oldest first, so retrieval order is stable across pages.
pub fn milestone_issues_query(milestone_number: MilestoneNumber, with_cursor: bool) -> String {
    let issues_arguments = if with_cursor {
        "first: 100, after: $cursor, states: [OPEN, CLOSED], orderBy: {field: CREATED_AT, direction: ASC}"
    } else {
        "first: 100, states: [OPEN, CLOSED], orderBy: {field: CREATED_AT, direction: ASC}"
    };
    let variable_declarations = if with_cursor {
        "$owner: String!, $repository_name: String!, $cursor: String!"
    } else {
        "$owner: String!, $repository_name: String!"
    };

    format!(
        r#"
        query({}) {{
            repository(owner: $owner, name: $repository_name) {{
                milestone(number: {}) {{
                    issues({}) {{
                        nodes {{
                            number
                            title
                            state
                            labels(first: 100) {{
                                nodes {{
                                    name
                                }}
                            }}
                        }}
                        pageInfo {{
                            hasNextPage
                            endCursor
                        }}
                    }}
                }}
            }}
        }}"#,
        variable_declarations,
        milestone_number.value(),
        issues_arguments
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_issues_query_embeds_number() {
        let query = milestone_issues_query(MilestoneNumber::new(7), false);
        assert!(query.contains("milestone(number: 7)"));
        assert!(!query.contains("$cursor"));
    }

    #[test]
    fn test_milestone_issues_query_with_cursor() {
        let query = milestone_issues_query(MilestoneNumber::new(7), true);
        assert!(query.contains("after: $cursor"));
        assert!(query.contains("$cursor: String!"));
    }
}
