use crate::models::{Column, Issue, IssueStatus, IssueType, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filters applied on top of the free-text search
///
/// An empty set means "no restriction" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub statuses: BTreeSet<IssueStatus>,
    pub labels: BTreeSet<String>,
    /// Assignee user IDs
    pub assignees: BTreeSet<String>,
    pub issue_types: BTreeSet<IssueType>,
    pub priorities: BTreeSet<Priority>,
    /// Reporter user IDs
    pub reporters: BTreeSet<String>,
    /// Include issues without an assignee
    pub unassigned: bool,
}

impl FilterOptions {
    /// Whether no filter is active
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.labels.is_empty()
            && self.assignees.is_empty()
            && self.issue_types.is_empty()
            && self.priorities.is_empty()
            && self.reporters.is_empty()
            && !self.unassigned
    }

    /// Whether an issue passes every active filter
    pub fn accepts(&self, issue: &Issue) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&issue.status) {
            return false;
        }
        if !self.labels.is_empty() && self.labels.is_disjoint(&issue.labels) {
            return false;
        }
        if !self.issue_types.is_empty() && !self.issue_types.contains(&issue.issue_type) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&issue.priority) {
            return false;
        }
        if !self.reporters.is_empty() && !self.reporters.contains(&issue.reporter.id) {
            return false;
        }
        self.accepts_assignee(issue)
    }

    fn accepts_assignee(&self, issue: &Issue) -> bool {
        if self.assignees.is_empty() && !self.unassigned {
            return true;
        }
        match &issue.assignee {
            None => self.unassigned,
            Some(user) => self.assignees.contains(&user.id),
        }
    }
}

/// Case-insensitive substring search over the text fields of an issue
///
/// A blank query matches everything.
pub fn matches_query(issue: &Issue, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    hit(&issue.key)
        || hit(&issue.summary)
        || hit(&issue.description)
        || issue.assignee.as_ref().is_some_and(|u| hit(&u.name))
        || hit(&issue.reporter.name)
        || issue.labels.iter().any(|label| hit(label))
}

/// Filtered copy of the board
///
/// Column metadata is kept as is; each column only holds the issues that
/// match both the query and the filters, in their original order. The
/// input is never modified.
pub fn project_columns(columns: &[Column], query: &str, filters: &FilterOptions) -> Vec<Column> {
    columns
        .iter()
        .map(|column| {
            let issues = column
                .issues
                .iter()
                .filter(|issue| matches_query(issue, query) && filters.accepts(issue))
                .cloned()
                .collect();
            column.with_issues(issues)
        })
        .collect()
}

/// Total number of issues across columns
pub fn issue_count(columns: &[Column]) -> usize {
    columns.iter().map(|c| c.issues.len()).sum()
}
