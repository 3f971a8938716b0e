use crate::github::error::ApiRetryableError;

/// Classifies GraphQL errors for retry handling.
///
/// GraphQL requests come back with HTTP 200 even when they fail, so the
/// error messages in the response body are the only signal for deciding
/// whether a retry makes sense.
pub fn classify_graphql_error(error_msg: &str) -> ApiRetryableError {
    if error_msg.contains("rate limit") || error_msg.contains("API rate limit") {
        tracing::warn!("GraphQL rate limit error - will retry: {}", error_msg);
        ApiRetryableError::RateLimit
    } else if error_msg.contains("timeout") || error_msg.contains("server error") {
        tracing::warn!("GraphQL server error - will retry: {}", error_msg);
        ApiRetryableError::Retryable(format!("GraphQL server error: {}", error_msg))
    } else if error_msg.contains("Could not resolve to a Repository")
        || error_msg.contains("Could not resolve to a Milestone")
    {
        // Non-existent resources will not appear on retry
        tracing::info!(
            "GraphQL resource not found - treating as non-retryable: {}",
            error_msg
        );
        ApiRetryableError::NonRetryable(format!("Resource not found: {}", error_msg))
    } else if error_msg.contains("validation") || error_msg.contains("syntax") {
        tracing::error!("GraphQL validation error - not retryable: {}", error_msg);
        ApiRetryableError::NonRetryable(format!("GraphQL validation error: {}", error_msg))
    } else {
        // Default to retryable for unknown GraphQL errors to improve reliability
        tracing::warn!(
            "Unknown GraphQL error - treating as retryable: {}",
            error_msg
        );
        ApiRetryableError::Retryable(format!("GraphQL error: {}", error_msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        assert_eq!(
            classify_graphql_error("API rate limit exceeded for user"),
            ApiRetryableError::RateLimit
        );
    }

    #[test]
    fn test_missing_resource_is_non_retryable() {
        let classified =
            classify_graphql_error("Could not resolve to a Repository with the name 'a/b'.");
        assert!(matches!(classified, ApiRetryableError::NonRetryable(_)));
    }

    #[test]
    fn test_unknown_error_defaults_to_retryable() {
        let classified = classify_graphql_error("Something went wrong");
        assert!(matches!(classified, ApiRetryableError::Retryable(_)));
    }
}
