use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A person that can report, be assigned to, or comment on issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Short form shown in avatars (e.g., "JD")
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Derive initials from a display name: first letter of up to two words
    pub fn initials_for(name: &str) -> String {
        name.split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Project that owns the issues on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    /// Issue key prefix (e.g., "PROJ")
    pub key: String,
    pub name: String,
    pub description: String,
    pub lead: User,
    pub category: String,
    #[serde(rename = "type")]
    pub project_type: String,
}

/// Kind of work an issue represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Story,
    Bug,
    Task,
    Epic,
}

impl IssueType {
    pub const ALL: [IssueType; 4] = [
        IssueType::Story,
        IssueType::Bug,
        IssueType::Task,
        IssueType::Epic,
    ];

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "story" => Some(IssueType::Story),
            "bug" => Some(IssueType::Bug),
            "task" => Some(IssueType::Task),
            "epic" => Some(IssueType::Epic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Story => "story",
            IssueType::Bug => "bug",
            IssueType::Task => "task",
            IssueType::Epic => "epic",
        }
    }
}

/// Issue priority, from most to least urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Highest,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Lowest,
    ];

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "highest" => Some(Priority::Highest),
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            "lowest" => Some(Priority::Lowest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Highest => "highest",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Lowest => "lowest",
        }
    }
}

/// Workflow state of an issue; each status has exactly one board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    ToDo,
    InProgress,
    Done,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [IssueStatus::ToDo, IssueStatus::InProgress, IssueStatus::Done];

    /// Parse from string representation, accepting common spellings
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match normalized.as_str() {
            "todo" => Some(IssueStatus::ToDo),
            "inprogress" => Some(IssueStatus::InProgress),
            "done" => Some(IssueStatus::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::ToDo => "to-do",
            IssueStatus::InProgress => "in-progress",
            IssueStatus::Done => "done",
        }
    }

    /// Column title used when a board is built without explicit titles
    pub fn default_title(&self) -> &'static str {
        match self {
            IssueStatus::ToDo => "To Do",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Done => "Done",
        }
    }
}

macro_rules! text_enum {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = BoardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::parse(s).ok_or_else(|| {
                    let allowed: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                    BoardError::Validation(format!(
                        "invalid {} '{}' (expected one of: {})",
                        $what,
                        s,
                        allowed.join(", ")
                    ))
                })
            }
        }
    };
}

text_enum!(IssueType, "issue type");
text_enum!(Priority, "priority");
text_enum!(IssueStatus, "status");

/// Comment on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: User,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A unit of trackable work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Internal ID
    pub id: String,
    /// Human-readable ID (e.g., "PROJ-12"), unique within the project
    pub key: String,
    pub summary: String,
    pub description: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub priority: Priority,
    pub status: IssueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    pub reporter: User,
    pub project: Project,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Number part of the key, if the key has the `PREFIX-N` shape
    pub fn key_number(&self) -> Option<u64> {
        key_number(&self.key, &self.project.key)
    }
}

/// Extract `N` from `PREFIX-N` when the prefix matches (case-insensitive)
pub fn key_number(key: &str, prefix: &str) -> Option<u64> {
    let (head, tail) = key.rsplit_once('-')?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    tail.parse().ok()
}

/// A board column holding every issue of one status, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub status: IssueStatus,
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Advisory work-in-progress limit, never enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Column {
    pub fn new(id: impl Into<String>, status: IssueStatus) -> Self {
        Self {
            id: id.into(),
            title: status.default_title().to_string(),
            status,
            issues: Vec::new(),
            limit: None,
        }
    }

    /// Whether the column holds more issues than its WIP limit (display only)
    pub fn is_over_limit(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.issues.len() > limit as usize)
    }

    /// Same column metadata with a different issue list
    pub fn with_issues(&self, issues: Vec<Issue>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status,
            issues,
            limit: self.limit,
        }
    }
}

/// Data for creating a new issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssue {
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_issue_type")]
    pub issue_type: IssueType,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    /// User ID of the assignee
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Column to place the issue in; the first column when unset
    #[serde(default)]
    pub target_column_id: Option<String>,
}

fn default_issue_type() -> IssueType {
    IssueType::Task
}

fn default_priority() -> Priority {
    Priority::Medium
}

impl CreateIssue {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: String::new(),
            issue_type: default_issue_type(),
            priority: default_priority(),
            assignee_id: None,
            story_points: None,
            labels: Vec::new(),
            target_column_id: None,
        }
    }
}

/// Change to an optional field: set a new value or clear it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldChange<T> {
    Set(T),
    Clear,
}

/// Data for updating an issue; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateIssue {
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<IssueType>,
    pub priority: Option<Priority>,
    pub status: Option<IssueStatus>,
    /// Assignee user ID
    pub assignee: Option<FieldChange<String>>,
    pub story_points: Option<FieldChange<u32>>,
    /// Replaces the label set
    pub labels: Option<Vec<String>>,
}

impl UpdateIssue {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.issue_type.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.assignee.is_none()
            && self.story_points.is_none()
            && self.labels.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: IssueStatus = serde_json::from_str("\"to-do\"").unwrap();
        assert_eq!(parsed, IssueStatus::ToDo);
    }

    #[test]
    fn status_parse_accepts_common_spellings() {
        for s in ["to-do", "todo", "To Do", "TO_DO"] {
            assert_eq!(IssueStatus::parse(s), Some(IssueStatus::ToDo), "{s}");
        }
        assert_eq!(IssueStatus::parse("in progress"), Some(IssueStatus::InProgress));
        assert_eq!(IssueStatus::parse("closed"), None);
    }

    #[test]
    fn from_str_rejects_unknown_values_as_validation_errors() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("highest, high, medium, low, lowest"));

        assert_eq!("BUG".parse::<IssueType>().unwrap(), IssueType::Bug);
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(User::initials_for("Jane Doe"), "JD");
        assert_eq!(User::initials_for("ada"), "A");
        assert_eq!(User::initials_for("Mary Ann Smith"), "MA");
        assert_eq!(User::initials_for(""), "");
    }

    #[test]
    fn key_number_requires_matching_prefix() {
        assert_eq!(key_number("PROJ-12", "PROJ"), Some(12));
        assert_eq!(key_number("proj-3", "PROJ"), Some(3));
        assert_eq!(key_number("OTHER-3", "PROJ"), None);
        assert_eq!(key_number("PROJ-x", "PROJ"), None);
        assert_eq!(key_number("MY-PROJ-7", "MY-PROJ"), Some(7));
    }

    #[test]
    fn column_limit_is_advisory() {
        let mut column = Column::new("todo", IssueStatus::ToDo);
        assert!(!column.is_over_limit());
        column.limit = Some(0);
        assert!(!column.is_over_limit());
        assert_eq!(column.title, "To Do");
    }

    #[test]
    fn update_payload_parses_field_changes() {
        let update: UpdateIssue =
            serde_json::from_str(r#"{"status": "done", "assignee": "clear", "story_points": {"set": 5}}"#)
                .unwrap();
        assert_eq!(update.status, Some(IssueStatus::Done));
        assert_eq!(update.assignee, Some(FieldChange::Clear));
        assert_eq!(update.story_points, Some(FieldChange::Set(5)));
        assert!(!update.is_empty());
        assert!(UpdateIssue::default().is_empty());
    }

    #[test]
    fn create_payload_defaults_type_and_priority() {
        let create: CreateIssue = serde_json::from_str(r#"{"summary": "Fix bug"}"#).unwrap();
        assert_eq!(create.issue_type, IssueType::Task);
        assert_eq!(create.priority, Priority::Medium);
        assert!(create.target_column_id.is_none());

        let bad = serde_json::from_str::<CreateIssue>(r#"{"summary": "x", "type": "chore"}"#);
        assert!(bad.is_err());
    }
}
