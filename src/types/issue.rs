//! Issue domain types
//!
//! Issues are read-only from this tool's perspective: they carry the number,
//! title, state, and label names needed to group and render a changelog entry,
//! and nothing else.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::label::Label;

/// Wrapper type for issue numbers providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueNumber(pub u64);

impl IssueNumber {
    /// Create a new issue number
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the state of a GitHub issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "UPPERCASE")] // For GraphQL API compatibility
pub enum IssueState {
    /// Issue is open and active
    #[strum(serialize = "OPEN")]
    Open,
    /// Issue is closed
    #[strum(serialize = "CLOSED")]
    Closed,
}

/// A single issue attached to a milestone.
///
/// Only the fields a changelog entry needs are carried; the relative order of
/// issues as retrieved from GitHub is significant and preserved by every
/// consumer of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: IssueNumber,
    pub title: String,
    pub state: IssueState,
    pub labels: Vec<Label>,
}

impl Issue {
    /// Create a new issue
    pub fn new(number: IssueNumber, title: String, state: IssueState, labels: Vec<Label>) -> Self {
        Self {
            number,
            title,
            state,
            labels,
        }
    }

    /// Whether this issue carries a label with exactly the given name.
    /// Matching is exact-string and case-sensitive.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name() == name)
    }

    /// Comma-joined label names in the order GitHub returned them
    pub fn joined_label_names(&self) -> String {
        self.labels
            .iter()
            .map(|label| label.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_with_labels(labels: &[&str]) -> Issue {
        Issue::new(
            IssueNumber::new(1),
            "An issue".to_string(),
            IssueState::Open,
            labels.iter().map(|l| Label::from(*l)).collect(),
        )
    }

    #[test]
    fn test_has_label_is_case_sensitive() {
        let issue = issue_with_labels(&["Bug"]);
        assert!(issue.has_label("Bug"));
        assert!(!issue.has_label("bug"));
    }

    #[test]
    fn test_joined_label_names() {
        let issue = issue_with_labels(&["bug", "regression"]);
        assert_eq!(issue.joined_label_names(), "bug, regression");

        let unlabeled = issue_with_labels(&[]);
        assert_eq!(unlabeled.joined_label_names(), "");
    }

    #[test]
    fn test_issue_state_parses_graphql_values() {
        assert_eq!("OPEN".parse::<IssueState>().unwrap(), IssueState::Open);
        assert_eq!("CLOSED".parse::<IssueState>().unwrap(), IssueState::Closed);
    }
}
