//! Repository auto-discovery from local git metadata
//!
//! Walks upward from a starting directory looking for a `.git` directory and
//! scans its `config` file's remote URLs for a GitHub `owner/name` pattern.
//! Discovery is best-effort: every failure path yields `None`, never an
//! error, since the caller falls back to requiring an explicit repository
//! argument.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::RepositoryId;

static REMOTE_REPO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[:/]([^/\s]+/[^/\s]+)\.git").expect("Failed to compile remote repo regex")
});

static SECTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[([^\]]+)\]").expect("Failed to compile section regex"));

static URL_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*url\s*=\s*(.+)$").expect("Failed to compile url key regex"));

/// Discover the GitHub repository of the current working directory, if any
pub fn discover_repository() -> Option<RepositoryId> {
    let cwd = std::env::current_dir().ok()?;
    discover_repository_from(&cwd)
}

/// Discover the GitHub repository governing `start`, walking up through its
/// ancestors until a `.git` directory is found
pub fn discover_repository_from(start: &Path) -> Option<RepositoryId> {
    let git_dir = find_git_dir(start)?;
    let repository_id = scan_git_config(&git_dir.join("config"))?;
    tracing::debug!(
        "Discovered repository {} from {:?}",
        repository_id,
        git_dir
    );
    Some(repository_id)
}

fn find_git_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".git"))
        .find(|candidate| candidate.is_dir())
}

/// Scan a git config file for the first remote URL naming a GitHub repository
fn scan_git_config(config_path: &Path) -> Option<RepositoryId> {
    let content = std::fs::read_to_string(config_path).ok()?;

    let mut in_remote_section = false;
    for line in content.lines() {
        if let Some(captures) = SECTION_REGEX.captures(line) {
            let section = captures.get(1).unwrap().as_str();
            in_remote_section = section.starts_with("remote");
            continue;
        }

        if !in_remote_section {
            continue;
        }

        if let Some(captures) = URL_KEY_REGEX.captures(line) {
            let url = captures.get(1).unwrap().as_str().trim();
            if let Some(repo_match) = REMOTE_REPO_REGEX.captures(url) {
                let full_name = repo_match.get(1).unwrap().as_str();
                let (owner, name) = full_name.split_once('/')?;
                return Some(RepositoryId::new(owner, name));
            }
        }
    }

    None
}
