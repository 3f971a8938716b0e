//! Repository domain types and URL parsing
//!
//! This module contains the Repository domain types with the URL parsing
//! needed to accept `owner/name` identifiers, GitHub HTTPS URLs, and SSH
//! remote URLs. All repository-specific parsing logic is contained within
//! this module.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Repository URL wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryUrl(pub String);

static HTTPS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?github\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/.*)?/?$")
        .expect("Failed to compile HTTPS regex")
});

static SSH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"git@github\.com:([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("Failed to compile SSH regex")
});

static SIMPLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/]+)/([^/]+)$").expect("Failed to compile simple regex"));

/// Owner name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Owner(pub String);

impl Owner {
    pub fn new(owner: String) -> Self {
        Self(owner)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Owner {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Owner {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Repository name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RepositoryName(pub String);

impl RepositoryName {
    pub fn new(repo_name: String) -> Self {
        Self(repo_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RepositoryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl RepositoryUrl {
    pub fn new(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RepositoryUrl {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryUrl {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed repository identifier for GitHub repositories
///
/// Encapsulates all repository identification logic and URL parsing specific
/// to repositories, so callers never pass bare `owner`/`name` strings around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RepositoryId {
    pub owner: Owner,
    pub repository_name: RepositoryName,
}

impl RepositoryId {
    /// Parse repository identifier from various input formats
    /// - "owner/repo" - plain identifier
    /// - "https://github.com/owner/repo" - GitHub URL
    /// - "git@github.com:owner/repo.git" - SSH format
    pub fn parse_url(input: &RepositoryUrl) -> Result<Self, String> {
        let input_str = input.as_str().trim_end_matches('/');

        // Handle GitHub HTTPS URLs
        if let Some(captures) = HTTPS_REGEX.captures(input_str) {
            let owner = captures.get(1).unwrap().as_str().to_string();
            let repo = captures.get(2).unwrap().as_str().to_string();
            return Ok(Self::new(owner, repo));
        }

        // Handle SSH URLs (git@github.com:owner/repo.git)
        if let Some(captures) = SSH_REGEX.captures(input_str) {
            let owner = captures.get(1).unwrap().as_str().to_string();
            let repo = captures.get(2).unwrap().as_str().to_string();
            return Ok(Self::new(owner, repo));
        }

        // Handle simple owner/repo format
        if let Some(captures) = SIMPLE_REGEX.captures(input_str) {
            let owner = captures.get(1).unwrap().as_str().to_string();
            let repo = captures.get(2).unwrap().as_str().to_string();
            return Ok(Self::new(owner, repo));
        }

        Err(format!("Invalid repository format: {}", input_str))
    }

    /// Creates a new repository identifier
    pub fn new<T1: Into<String>, T2: Into<String>>(owner: T1, name: T2) -> Self {
        Self {
            owner: Owner::new(owner.into()),
            repository_name: RepositoryName::new(name.into()),
        }
    }

    /// Returns the owner part of the repository
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Returns the repository name
    pub fn repo_name(&self) -> &RepositoryName {
        &self.repository_name
    }

    /// Returns the repository URL
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repository_name)
    }

    /// Returns the full name (owner/repository_name format)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository_name)
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_identifier() {
        let parsed = RepositoryId::parse_url(&RepositoryUrl::from("tokio-rs/tokio")).unwrap();
        assert_eq!(parsed, RepositoryId::new("tokio-rs", "tokio"));
    }

    #[test]
    fn test_parse_https_url() {
        let parsed =
            RepositoryId::parse_url(&RepositoryUrl::from("https://github.com/tokio-rs/tokio"))
                .unwrap();
        assert_eq!(parsed, RepositoryId::new("tokio-rs", "tokio"));

        let with_git_suffix =
            RepositoryId::parse_url(&RepositoryUrl::from("https://github.com/tokio-rs/tokio.git"))
                .unwrap();
        assert_eq!(with_git_suffix, RepositoryId::new("tokio-rs", "tokio"));
    }

    #[test]
    fn test_parse_ssh_url() {
        let parsed =
            RepositoryId::parse_url(&RepositoryUrl::from("git@github.com:tokio-rs/tokio.git"))
                .unwrap();
        assert_eq!(parsed, RepositoryId::new("tokio-rs", "tokio"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RepositoryId::parse_url(&RepositoryUrl::from("not a repository")).is_err());
    }

    #[test]
    fn test_full_name_and_display() {
        let repo_id = RepositoryId::new("rust-lang", "rust");
        assert_eq!(repo_id.full_name(), "rust-lang/rust");
        assert_eq!(repo_id.to_string(), "rust-lang/rust");
        assert_eq!(repo_id.url(), "https://github.com/rust-lang/rust");
    }
}
