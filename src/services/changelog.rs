//! Changelog assembly service
//!
//! Orchestrates the steps behind one changelog run: resolve the requested
//! milestone by exact title, fetch every issue attached to it, and hand the
//! flat issue list to the grouping core.

use anyhow::Result;
use tracing::info;

use crate::github::GitHubClient;
use crate::types::{GroupSpec, GroupedChangelog, Issue, Milestone, RepositoryId};

/// Changelog service errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogServiceError {
    /// The requested milestone title does not exist in the repository
    MilestoneNotFound {
        milestone: String,
        repository: String,
    },
}

impl std::fmt::Display for ChangelogServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MilestoneNotFound {
                milestone,
                repository,
            } => {
                write!(
                    f,
                    "Cannot find milestone {} in repository {}",
                    milestone, repository
                )
            }
        }
    }
}

impl std::error::Error for ChangelogServiceError {}

/// Builds grouped changelogs for one repository
pub struct ChangelogService {
    github_client: GitHubClient,
}

impl ChangelogService {
    /// Creates a new ChangelogService instance
    pub fn new(github_client: GitHubClient) -> Self {
        Self { github_client }
    }

    /// Resolve a milestone by exact, case-sensitive title match.
    ///
    /// The repository's milestones are scanned linearly and the first hit
    /// wins. No match is a fatal [`ChangelogServiceError::MilestoneNotFound`].
    pub async fn resolve_milestone(
        &self,
        repository_id: &RepositoryId,
        milestone_title: &str,
    ) -> Result<Milestone> {
        let milestones = self
            .github_client
            .fetch_repository_milestones(repository_id)
            .await?;

        milestones
            .into_iter()
            .find(|milestone| milestone.title == milestone_title)
            .ok_or_else(|| {
                anyhow::Error::new(ChangelogServiceError::MilestoneNotFound {
                    milestone: milestone_title.to_string(),
                    repository: repository_id.full_name(),
                })
            })
    }

    /// Fetch every issue assigned to `milestone`, open and closed, in
    /// retrieval order
    pub async fn milestone_issues(
        &self,
        repository_id: &RepositoryId,
        milestone: &Milestone,
    ) -> Result<Vec<Issue>> {
        self.github_client
            .fetch_milestone_issues(repository_id, milestone.number)
            .await
    }

    /// Build the grouped changelog for one milestone of one repository
    pub async fn build_changelog(
        &self,
        repository_id: &RepositoryId,
        milestone_title: &str,
        spec: &GroupSpec,
    ) -> Result<GroupedChangelog> {
        let milestone = self.resolve_milestone(repository_id, milestone_title).await?;
        info!("Resolved milestone {} in {}", milestone, repository_id);

        let issues = self.milestone_issues(repository_id, &milestone).await?;
        info!(
            "Fetched {} issues for milestone {}",
            issues.len(),
            milestone
        );

        Ok(GroupedChangelog::from_issues(issues, spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_not_found_message_names_both_sides() {
        let error = ChangelogServiceError::MilestoneNotFound {
            milestone: "v1.0".to_string(),
            repository: "owner/repo".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot find milestone v1.0 in repository owner/repo"
        );
    }
}
