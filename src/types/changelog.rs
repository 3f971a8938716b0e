//! Changelog grouping types
//!
//! This module contains the grouping core of the tool: an insertion-ordered
//! association list from group name to issues, built from a flat issue
//! sequence and a caller-supplied group specification. The ordering and
//! membership invariants are enforced by construction here rather than by
//! convention in the callers.

use serde::{Deserialize, Serialize};

use crate::types::issue::Issue;

/// Name of the single group used when no grouping was requested
pub const DEFAULT_GROUP_NAME: &str = "Issues";

/// Reserved name of the catch-all group receiving issues that match none of
/// the requested labels
pub const CATCH_ALL_GROUP_NAME: &str = "Other";

/// Wrapper type for group names providing type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GroupName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Ordered sequence of distinct group names, each mapped to a label of the
/// same name.
///
/// Built from repeated `-g/--group-by` flags. Duplicate names are removed on
/// construction, first occurrence wins, so the grouping below never sees the
/// same name twice. An empty spec means "no grouping requested".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSpec(Vec<GroupName>);

impl GroupSpec {
    /// Create a spec from caller-supplied names, deduplicating while keeping
    /// the first occurrence's position.
    pub fn new(names: Vec<GroupName>) -> Self {
        let mut distinct: Vec<GroupName> = Vec::with_capacity(names.len());
        for name in names {
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }
        Self(distinct)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &GroupName> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for GroupSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|s| GroupName::new(s.into())).collect())
    }
}

/// One named group of issues in the changelog, in retrieval order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogGroup {
    pub name: GroupName,
    pub issues: Vec<Issue>,
}

impl ChangelogGroup {
    fn empty(name: GroupName) -> Self {
        Self {
            name,
            issues: Vec::new(),
        }
    }
}

/// An insertion-ordered mapping from group name to the issues belonging to
/// that group.
///
/// Invariants, guaranteed by [`GroupedChangelog::from_issues`]:
/// - every group is non-empty,
/// - no group name appears twice,
/// - iteration order follows the spec's order, with the catch-all group last,
/// - issues inside a group keep their relative retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedChangelog {
    groups: Vec<ChangelogGroup>,
}

impl GroupedChangelog {
    /// Group `issues` according to `spec`.
    ///
    /// With an empty spec every issue lands in the single default group
    /// `Issues`. With a non-empty spec each issue is appended to every group
    /// whose name matches one of its labels (a fan-out, not a partition), or
    /// to the reserved catch-all group `Other` when no label matches. Empty
    /// groups are dropped, and the survivors are ordered by the spec with the
    /// catch-all last.
    ///
    /// A spec that itself contains `Other` is not an error: that name shares
    /// the catch-all bucket, is skipped during the spec-order walk, and the
    /// combined bucket is ordered last.
    pub fn from_issues(issues: Vec<Issue>, spec: &GroupSpec) -> Self {
        if spec.is_empty() {
            if issues.is_empty() {
                return Self { groups: Vec::new() };
            }
            return Self {
                groups: vec![ChangelogGroup {
                    name: GroupName::from(DEFAULT_GROUP_NAME),
                    issues,
                }],
            };
        }

        // One bucket per requested name, sharing the catch-all bucket when the
        // caller reuses its reserved name.
        let mut buckets: Vec<ChangelogGroup> = spec
            .names()
            .map(|name| ChangelogGroup::empty(name.clone()))
            .collect();
        if !buckets
            .iter()
            .any(|bucket| bucket.name.as_str() == CATCH_ALL_GROUP_NAME)
        {
            buckets.push(ChangelogGroup::empty(GroupName::from(CATCH_ALL_GROUP_NAME)));
        }

        for issue in issues {
            let matched: Vec<GroupName> = spec
                .names()
                .filter(|name| issue.has_label(name.as_str()))
                .cloned()
                .collect();

            if matched.is_empty() {
                Self::push_to_bucket(&mut buckets, CATCH_ALL_GROUP_NAME, issue);
            } else {
                for name in matched {
                    Self::push_to_bucket(&mut buckets, name.as_str(), issue.clone());
                }
            }
        }

        // Drop the catch-all out of spec order, elide empty groups, and put
        // the catch-all back at the end if it collected anything.
        let catch_all_position = buckets
            .iter()
            .position(|bucket| bucket.name.as_str() == CATCH_ALL_GROUP_NAME)
            .expect("catch-all bucket always exists");
        let catch_all = buckets.remove(catch_all_position);

        let mut groups: Vec<ChangelogGroup> = buckets
            .into_iter()
            .filter(|bucket| !bucket.issues.is_empty())
            .collect();
        if !catch_all.issues.is_empty() {
            groups.push(catch_all);
        }

        Self { groups }
    }

    fn push_to_bucket(buckets: &mut [ChangelogGroup], name: &str, issue: Issue) {
        let bucket = buckets
            .iter_mut()
            .find(|bucket| bucket.name.as_str() == name)
            .expect("buckets cover every spec name and the catch-all");
        bucket.issues.push(issue);
    }

    /// The groups in final iteration order
    pub fn groups(&self) -> &[ChangelogGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of issue entries across all groups (fan-out counted once
    /// per group membership)
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.issues.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::issue::{IssueNumber, IssueState};
    use crate::types::label::Label;

    fn issue(number: u64, title: &str, labels: &[&str]) -> Issue {
        Issue::new(
            IssueNumber::new(number),
            title.to_string(),
            IssueState::Closed,
            labels.iter().map(|l| Label::from(*l)).collect(),
        )
    }

    fn sample_issues() -> Vec<Issue> {
        vec![
            issue(1, "A", &["bug"]),
            issue(2, "B", &["feature"]),
            issue(3, "C", &[]),
        ]
    }

    fn group_names(changelog: &GroupedChangelog) -> Vec<&str> {
        changelog
            .groups()
            .iter()
            .map(|group| group.name.as_str())
            .collect()
    }

    fn issue_numbers(group: &ChangelogGroup) -> Vec<u64> {
        group.issues.iter().map(|i| i.number.value()).collect()
    }

    #[test]
    fn test_empty_spec_yields_single_default_group_in_input_order() {
        let changelog = GroupedChangelog::from_issues(sample_issues(), &GroupSpec::default());

        assert_eq!(group_names(&changelog), vec![DEFAULT_GROUP_NAME]);
        assert_eq!(issue_numbers(&changelog.groups()[0]), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_issues_yield_empty_result() {
        let no_grouping = GroupedChangelog::from_issues(Vec::new(), &GroupSpec::default());
        assert!(no_grouping.is_empty());

        let spec: GroupSpec = ["bug"].into_iter().collect();
        let grouped = GroupedChangelog::from_issues(Vec::new(), &spec);
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_grouping_by_labels_with_catch_all() {
        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(sample_issues(), &spec);

        assert_eq!(
            group_names(&changelog),
            vec!["bug", "feature", CATCH_ALL_GROUP_NAME]
        );
        assert_eq!(issue_numbers(&changelog.groups()[0]), vec![1]);
        assert_eq!(issue_numbers(&changelog.groups()[1]), vec![2]);
        assert_eq!(issue_numbers(&changelog.groups()[2]), vec![3]);
    }

    #[test]
    fn test_fan_out_appears_in_every_matching_group() {
        let mut issues = sample_issues();
        issues.push(issue(4, "D", &["bug", "feature"]));

        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        assert_eq!(issue_numbers(&changelog.groups()[0]), vec![1, 4]);
        assert_eq!(issue_numbers(&changelog.groups()[1]), vec![2, 4]);
        assert_eq!(issue_numbers(&changelog.groups()[2]), vec![3]);
    }

    #[test]
    fn test_every_issue_lands_in_at_least_one_group() {
        let issues = vec![
            issue(1, "A", &["bug"]),
            issue(2, "B", &["docs"]),
            issue(3, "C", &[]),
            issue(4, "D", &["bug", "docs"]),
        ];
        let spec: GroupSpec = ["bug"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        let mut seen: Vec<u64> = changelog
            .groups()
            .iter()
            .flat_map(|group| group.issues.iter().map(|i| i.number.value()))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unmatched_issue_lands_only_in_catch_all() {
        let issues = vec![issue(1, "A", &["docs"])];
        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        assert_eq!(group_names(&changelog), vec![CATCH_ALL_GROUP_NAME]);
        assert_eq!(issue_numbers(&changelog.groups()[0]), vec![1]);
    }

    #[test]
    fn test_empty_groups_are_elided() {
        let issues = vec![issue(1, "A", &["bug"])];
        let spec: GroupSpec = ["feature", "bug"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        // "feature" matched nothing, catch-all collected nothing
        assert_eq!(group_names(&changelog), vec!["bug"]);
    }

    #[test]
    fn test_group_order_follows_spec_with_catch_all_last() {
        let issues = vec![
            issue(1, "A", &[]),
            issue(2, "B", &["feature"]),
            issue(3, "C", &["bug"]),
        ];
        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        assert_eq!(
            group_names(&changelog),
            vec!["bug", "feature", CATCH_ALL_GROUP_NAME]
        );
    }

    #[test]
    fn test_catch_all_name_in_spec_shares_bucket_and_orders_last() {
        let issues = vec![
            issue(1, "A", &["Other"]),
            issue(2, "B", &["bug"]),
            issue(3, "C", &[]),
        ];
        let spec: GroupSpec = ["Other", "bug"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        // Issue 1 matched the requested "Other" label, issue 3 fell through;
        // both share the catch-all bucket, ordered last.
        assert_eq!(group_names(&changelog), vec!["bug", CATCH_ALL_GROUP_NAME]);
        assert_eq!(issue_numbers(&changelog.groups()[0]), vec![2]);
        assert_eq!(issue_numbers(&changelog.groups()[1]), vec![1, 3]);
    }

    #[test]
    fn test_duplicate_spec_names_are_deduplicated() {
        let spec: GroupSpec = ["bug", "feature", "bug"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(sample_issues(), &spec);

        assert_eq!(
            group_names(&changelog),
            vec!["bug", "feature", CATCH_ALL_GROUP_NAME]
        );
        assert_eq!(issue_numbers(&changelog.groups()[0]), vec![1]);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        let first = GroupedChangelog::from_issues(sample_issues(), &spec);
        let second = GroupedChangelog::from_issues(sample_issues(), &spec);
        assert_eq!(first, second);
    }

    #[test]
    fn test_label_matching_is_case_sensitive() {
        let issues = vec![issue(1, "A", &["Bug"])];
        let spec: GroupSpec = ["bug"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        assert_eq!(group_names(&changelog), vec![CATCH_ALL_GROUP_NAME]);
    }

    #[test]
    fn test_entry_count_counts_fan_out_per_group() {
        let mut issues = sample_issues();
        issues.push(issue(4, "D", &["bug", "feature"]));
        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        let changelog = GroupedChangelog::from_issues(issues, &spec);

        assert_eq!(changelog.entry_count(), 5);
    }
}
