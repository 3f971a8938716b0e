//! Markdown rendering of grouped changelogs
//!
//! Both renderers iterate the changelog strictly in the order the grouping
//! produced; nothing here re-sorts or re-groups.

use crate::types::GroupedChangelog;

use super::MarkdownContent;

/// Render a changelog as per-group bullet lists.
///
/// ```text
/// ## Group name
///
/// - The issue title #1
/// - Another issue #2
/// ```
pub fn changelog_markdown_simple(changelog: &GroupedChangelog) -> MarkdownContent {
    let mut content = String::new();

    for group in changelog.groups() {
        content.push_str(&format!("## {}\n\n", group.name));
        for issue in &group.issues {
            content.push_str(&format!("- {} #{}\n", issue.title, issue.number));
        }
        content.push('\n');
    }

    MarkdownContent(content)
}

/// Render a changelog as per-group tables with number, title, and labels.
///
/// ```text
/// ## Group name
///
/// | # | Title | Labels |
/// | --- | ----- | ------ |
/// | #1 | The issue title | bug, regression |
/// ```
pub fn changelog_markdown_table(changelog: &GroupedChangelog) -> MarkdownContent {
    let mut content = String::new();

    for group in changelog.groups() {
        content.push_str(&format!("## {}\n\n", group.name));
        content.push_str("| # | Title | Labels |\n");
        content.push_str("| --- | ----- | ------ |\n");
        for issue in &group.issues {
            content.push_str(&format!(
                "| #{} | {} | {} |\n",
                issue.number,
                issue.title,
                issue.joined_label_names()
            ));
        }
        content.push('\n');
    }

    MarkdownContent(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupSpec, Issue, IssueNumber, IssueState, Label};

    fn issue(number: u64, title: &str, labels: &[&str]) -> Issue {
        Issue::new(
            IssueNumber::new(number),
            title.to_string(),
            IssueState::Closed,
            labels.iter().map(|l| Label::from(*l)).collect(),
        )
    }

    fn grouped_sample() -> GroupedChangelog {
        let issues = vec![
            issue(1, "Fix crash on empty input", &["bug"]),
            issue(2, "Add table output", &["feature"]),
            issue(3, "Tidy the readme", &[]),
        ];
        let spec: GroupSpec = ["bug", "feature"].into_iter().collect();
        GroupedChangelog::from_issues(issues, &spec)
    }

    #[test]
    fn test_simple_format() {
        let rendered = changelog_markdown_simple(&grouped_sample());
        let expected = "\
## bug

- Fix crash on empty input #1

## feature

- Add table output #2

## Other

- Tidy the readme #3

";
        assert_eq!(rendered.0, expected);
    }

    #[test]
    fn test_table_format() {
        let rendered = changelog_markdown_table(&grouped_sample());
        let expected = "\
## bug

| # | Title | Labels |
| --- | ----- | ------ |
| #1 | Fix crash on empty input | bug |

## feature

| # | Title | Labels |
| --- | ----- | ------ |
| #2 | Add table output | feature |

## Other

| # | Title | Labels |
| --- | ----- | ------ |
| #3 | Tidy the readme |  |

";
        assert_eq!(rendered.0, expected);
    }

    #[test]
    fn test_empty_changelog_renders_nothing() {
        let empty = GroupedChangelog::from_issues(Vec::new(), &GroupSpec::default());
        assert_eq!(changelog_markdown_simple(&empty).0, "");
        assert_eq!(changelog_markdown_table(&empty).0, "");
    }

    #[test]
    fn test_ungrouped_changelog_renders_single_issues_heading() {
        let changelog = GroupedChangelog::from_issues(
            vec![issue(5, "Anything", &["bug"])],
            &GroupSpec::default(),
        );
        let rendered = changelog_markdown_simple(&changelog);
        assert_eq!(rendered.0, "## Issues\n\n- Anything #5\n\n");
    }
}
