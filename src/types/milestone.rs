//! Milestone domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper type for milestone numbers providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneNumber(pub u64);

impl MilestoneNumber {
    /// Create a new milestone number
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Get the inner value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MilestoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository milestone as listed by GitHub.
///
/// The `title` is the human-readable name that users pass on the command line;
/// the `number` is what the API needs to enumerate the milestone's issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub number: MilestoneNumber,
    pub title: String,
    pub due_on: Option<DateTime<Utc>>,
}

impl Milestone {
    /// Create a new milestone
    pub fn new(number: MilestoneNumber, title: String, due_on: Option<DateTime<Utc>>) -> Self {
        Self {
            number,
            title,
            due_on,
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.title, self.number)
    }
}
