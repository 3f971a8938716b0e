use crate::github::error::ApiRetryableError;
use crate::types::{Issue, Milestone, MilestoneNumber, RepositoryId};

use super::graphql::error::classify_graphql_error;
use super::graphql::graphql_types::{
    GraphQLPayload, GraphQLQuery, GraphQLResponse, MilestoneIssuesResponse,
    RepositoryMilestonesResponse,
};
use super::graphql::query::{
    MilestoneIssuesVariable, RepositoryMilestonesVariable, milestone_issues_query,
    repository_milestones_query,
};

use anyhow::{Context, Result};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

/// Default maximum number of retry attempts for API operations
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 15;

/// Default per-request timeout for GraphQL calls
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub trait GraphQLExecutor {
    #[allow(async_fn_in_trait)]
    async fn execute_graphql<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<GraphQLResponse<R>>;
}

#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) client: octocrab::Octocrab,
    request_timeout: Duration,
}

impl GitHubClient {
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if let Some(token) = token {
            builder = builder.personal_token(token);
        }

        let timeout_duration = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let connection_timeout = if timeout_duration < Duration::from_secs(10) {
            std::cmp::max(timeout_duration, Duration::from_secs(1))
        } else {
            Duration::from_secs(30)
        };

        let read_write_timeout = std::cmp::max(timeout_duration, Duration::from_secs(1));

        builder = builder
            .set_connect_timeout(Some(connection_timeout))
            .set_read_timeout(Some(read_write_timeout))
            .set_write_timeout(Some(read_write_timeout));

        let client = builder.build().context("Failed to build GitHub client")?;

        Ok(Self {
            client,
            request_timeout: read_write_timeout,
        })
    }

    /// Fetches the milestones of a repository, open and closed alike.
    ///
    /// Milestones come back in the API's listing order; the caller scans them
    /// for a title match. Repositories rarely carry more than a handful of
    /// milestones, so a single page of 100 is fetched.
    ///
    /// # Errors
    ///
    /// Fails when the repository does not exist or is inaccessible, on
    /// authentication problems, and when retries against transient API
    /// errors are exhausted.
    pub async fn fetch_repository_milestones(
        &self,
        repository_id: &RepositoryId,
    ) -> Result<Vec<Milestone>> {
        let query = repository_milestones_query();
        let variables = RepositoryMilestonesVariable {
            owner: repository_id.owner().clone(),
            repository_name: repository_id.repo_name().clone(),
        };

        let payload = GraphQLPayload {
            query: GraphQLQuery(query),
            variables: Some(variables),
        };

        let response: GraphQLResponse<RepositoryMilestonesResponse> =
            self.execute_graphql("repository_milestones", payload).await?;

        let data = response
            .data
            .ok_or_else(|| anyhow::anyhow!("No data in GraphQL repository milestones response"))?;

        let repository_node = data
            .repository
            .ok_or_else(|| anyhow::anyhow!("Repository not found: {}", repository_id))?;

        Ok(repository_node
            .milestones
            .nodes
            .into_iter()
            .map(Milestone::from)
            .collect())
    }

    /// Fetches every issue assigned to a milestone, open and closed alike.
    ///
    /// Pages through the milestone's issue connection with GraphQL cursors
    /// until exhausted, preserving the API's created-at-ascending order in
    /// the returned vector.
    ///
    /// # Errors
    ///
    /// Fails when the repository or milestone cannot be resolved, and when
    /// retries against transient API errors are exhausted.
    pub async fn fetch_milestone_issues(
        &self,
        repository_id: &RepositoryId,
        milestone_number: MilestoneNumber,
    ) -> Result<Vec<Issue>> {
        let mut all_issues = Vec::new();
        let mut current_cursor: Option<String> = None;

        loop {
            let query = milestone_issues_query(milestone_number, current_cursor.is_some());
            let variables = MilestoneIssuesVariable {
                owner: repository_id.owner().clone(),
                repository_name: repository_id.repo_name().clone(),
                cursor: current_cursor.clone(),
            };

            let payload = GraphQLPayload {
                query: GraphQLQuery(query),
                variables: Some(variables),
            };

            let response: GraphQLResponse<MilestoneIssuesResponse> =
                self.execute_graphql("milestone_issues", payload).await?;

            let data = response
                .data
                .ok_or_else(|| anyhow::anyhow!("No data in GraphQL milestone issues response"))?;

            let repository_node = data
                .repository
                .ok_or_else(|| anyhow::anyhow!("Repository not found: {}", repository_id))?;

            let milestone_node = repository_node.milestone.ok_or_else(|| {
                anyhow::anyhow!(
                    "Milestone #{} not found in repository {}",
                    milestone_number,
                    repository_id
                )
            })?;

            let page = milestone_node.issues;
            for issue_node in page.nodes {
                let issue = Issue::try_from(issue_node)
                    .context("Failed to convert issue from GraphQL response")?;
                all_issues.push(issue);
            }

            if page.page_info.has_next_page {
                if let Some(next_cursor) = page.page_info.end_cursor {
                    info!(
                        "Fetching next issue page for milestone #{} with cursor",
                        milestone_number
                    );
                    current_cursor = Some(next_cursor);
                    continue;
                }
            }

            break;
        }

        Ok(all_issues)
    }
}

impl GraphQLExecutor for GitHubClient {
    async fn execute_graphql<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<GraphQLResponse<R>> {
        // Use retry logic for GraphQL requests (3 retries for faster failure)
        let result = retry_with_backoff(query_name, Some(3), || async {
            tracing::debug!(
                "Starting GraphQL request with payload: {}",
                serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| "Invalid JSON".to_string())
            );

            let start_time = std::time::Instant::now();

            // Cap the request so a stalled connection cannot hang the run
            let response: GraphQLResponse<R> =
                tokio::time::timeout(self.request_timeout, self.client.graphql(&payload))
                    .await
                    .map_err(|_| {
                        let duration = start_time.elapsed();
                        error!("GraphQL request timed out after {:?}", duration);
                        ApiRetryableError::Retryable(format!(
                            "GraphQL request timed out after {:?}",
                            duration
                        ))
                    })?
                    .map_err(ApiRetryableError::from_octocrab_error)?;

            tracing::debug!(
                "GraphQL request completed successfully in {:?}",
                start_time.elapsed()
            );

            // Check for GraphQL errors within the retry loop
            if let Some(errors) = &response.errors {
                if !errors.is_empty() {
                    let error_msg = errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");

                    return Err(classify_graphql_error(&error_msg));
                }
            }

            Ok(response)
        })
        .await?;

        Ok(result)
    }
}

pub(crate) async fn retry_with_backoff<F, Fut, T>(
    operation_name: &str,
    max_retry_count: Option<u32>,
    execute_operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, ApiRetryableError>>,
{
    let mut attempt = 0;
    let max_retries = max_retry_count.unwrap_or(DEFAULT_MAX_RETRY_COUNT);

    loop {
        match execute_operation().await {
            Ok(result) => {
                tracing::debug!(
                    "Operation {} succeeded on attempt {}",
                    operation_name,
                    attempt + 1
                );
                return Ok(result);
            }
            Err(e) => {
                tracing::warn!(
                    "Operation {} failed on attempt {}: {}",
                    operation_name,
                    attempt + 1,
                    e,
                );

                match e {
                    ApiRetryableError::NonRetryable(_) => {
                        tracing::warn!(
                            "Operation {} returned non-retryable error, failing immediately: {}",
                            operation_name,
                            e
                        );
                        return Err(anyhow::anyhow!(e));
                    }
                    ApiRetryableError::RateLimit => {
                        if attempt < max_retries {
                            attempt += 1;
                            let backoff_delay = Duration::from_millis(
                                (1000_u64).saturating_mul(2_u64.saturating_pow(attempt - 1)),
                            );

                            tracing::warn!(
                                "Rate limit hit for {}, attempt {}/{}, backing off for {:?}",
                                operation_name,
                                attempt,
                                max_retries,
                                backoff_delay
                            );

                            sleep(backoff_delay).await;
                            continue;
                        } else {
                            tracing::warn!(
                                "Rate limit retries exhausted for {} after {} attempts",
                                operation_name,
                                attempt + 1
                            );
                            return Err(anyhow::anyhow!(e));
                        }
                    }
                    ApiRetryableError::Retryable(_) => {
                        if attempt < max_retries {
                            attempt += 1;
                            let backoff_delay = Duration::from_millis(
                                (500_u64).saturating_mul(2_u64.saturating_pow(attempt - 1)),
                            );

                            tracing::warn!(
                                "Retryable error for {}, attempt {}/{}, backing off for {:?}",
                                operation_name,
                                attempt,
                                max_retries,
                                backoff_delay
                            );

                            sleep(backoff_delay).await;
                            continue;
                        } else {
                            tracing::warn!(
                                "Retryable error retries exhausted for {} after {} attempts",
                                operation_name,
                                attempt + 1
                            );
                            return Err(anyhow::anyhow!(e));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retry_with_backoff_returns_first_success() {
        let result = retry_with_backoff("test_op", Some(3), || async {
            Ok::<_, ApiRetryableError>(42)
        })
        .await
        .unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_retry_with_backoff_fails_fast_on_non_retryable() {
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let result: Result<u32> = retry_with_backoff("test_op", Some(3), || {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async { Err(ApiRetryableError::NonRetryable("bad request".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_with_backoff_retries_until_exhausted() {
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let result: Result<u32> = retry_with_backoff("test_op", Some(2), || {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            async { Err(ApiRetryableError::Retryable("flaky".to_string())) }
        })
        .await;

        assert!(result.is_err());
        // Initial attempt plus two retries
        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 3);
    }
}
