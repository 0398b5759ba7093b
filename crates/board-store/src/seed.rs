//! Seed dataset parsing and validation
//!
//! A seed describes the initial board: the project, its users, the columns
//! and the issues inside them. The board returns to this state whenever a
//! new store is built from it.

use board_core::{
    validation, BoardError, Column, Comment, Issue, IssueStatus, IssueType, Priority, Project,
    Result, User,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

const DEMO_SEED: &str = include_str!("../seed/demo.toml");

/// Seed file layout as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    pub project: SeedProject,

    #[serde(default)]
    pub users: Vec<SeedUser>,

    pub columns: Vec<SeedColumn>,

    #[serde(default)]
    pub issues: Vec<SeedIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProject {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// User ID of the project lead
    pub lead: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(rename = "type", default = "default_project_type")]
    pub project_type: String,
}

fn default_category() -> String {
    "Software".to_string()
}

fn default_project_type() -> String {
    "Kanban".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Derived from the name when omitted
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedColumn {
    pub id: String,
    /// Defaults to the status' display title
    #[serde(default)]
    pub title: Option<String>,
    pub status: IssueStatus,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedIssue {
    /// Defaults to the key
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub priority: Priority,
    pub status: IssueStatus,
    #[serde(default)]
    pub assignee: Option<String>,
    pub reporter: String,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Defaults to `created_at`
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedComment {
    #[serde(default)]
    pub id: Option<String>,
    /// User ID of the author
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A validated seed, ready to back a store
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub project: Project,
    pub users: Vec<User>,
    pub columns: Vec<Column>,
}

impl Seed {
    /// The demo board bundled with the crate
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SEED)
    }

    /// Load a seed from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BoardError::Io(format!("Failed to read seed {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SeedFile = toml::from_str(content)
            .map_err(|e| BoardError::Parse(format!("Failed to parse seed: {}", e)))?;
        Self::from_file(file)
    }

    /// Validate a parsed seed file and build the board from it
    pub fn from_file(file: SeedFile) -> Result<Self> {
        let users = build_users(&file.users)?;
        let directory: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();
        let lookup = |id: &str, what: &str| -> Result<User> {
            directory
                .get(id)
                .map(|u| (*u).clone())
                .ok_or_else(|| BoardError::Seed(format!("{} refers to unknown user '{}'", what, id)))
        };

        let project = Project {
            id: file.project.id.clone(),
            key: file.project.key.trim().to_string(),
            name: file.project.name.clone(),
            description: file.project.description.clone(),
            lead: lookup(&file.project.lead, "project lead")?,
            category: file.project.category.clone(),
            project_type: file.project.project_type.clone(),
        };
        if project.key.is_empty() {
            return Err(BoardError::Seed("project key must not be empty".to_string()));
        }

        let mut columns = build_columns(&file.columns)?;

        let mut ids = HashSet::new();
        let mut keys = HashSet::new();
        for raw in &file.issues {
            let issue = build_issue(raw, &project, &lookup)?;
            if !ids.insert(issue.id.clone()) {
                return Err(BoardError::Seed(format!("duplicate issue id '{}'", issue.id)));
            }
            // PROJ-7, proj-7 and PROJ-007 all claim number 7
            if !keys.insert(issue.key_number()) {
                return Err(BoardError::Seed(format!("duplicate issue key '{}'", issue.key)));
            }
            let column = columns
                .iter_mut()
                .find(|c| c.status == issue.status)
                .ok_or_else(|| {
                    BoardError::Seed(format!(
                        "issue {} has status '{}' but no column holds that status",
                        issue.key, issue.status
                    ))
                })?;
            column.issues.push(issue);
        }

        Ok(Self {
            project,
            users,
            columns,
        })
    }
}

fn build_users(raw: &[SeedUser]) -> Result<Vec<User>> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|u| {
            if !seen.insert(u.id.as_str()) {
                return Err(BoardError::Seed(format!("duplicate user id '{}'", u.id)));
            }
            Ok(User {
                id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone(),
                initials: u
                    .initials
                    .clone()
                    .unwrap_or_else(|| User::initials_for(&u.name)),
                avatar_url: u.avatar_url.clone(),
            })
        })
        .collect()
}

fn build_columns(raw: &[SeedColumn]) -> Result<Vec<Column>> {
    if raw.is_empty() {
        return Err(BoardError::Seed("a board needs at least one column".to_string()));
    }
    let mut ids = HashSet::new();
    let mut statuses = HashSet::new();
    raw.iter()
        .map(|c| {
            if !ids.insert(c.id.as_str()) {
                return Err(BoardError::Seed(format!("duplicate column id '{}'", c.id)));
            }
            if !statuses.insert(c.status) {
                return Err(BoardError::Seed(format!(
                    "status '{}' is used by more than one column",
                    c.status
                )));
            }
            let mut column = Column::new(c.id.clone(), c.status);
            if let Some(title) = &c.title {
                column.title = title.clone();
            }
            column.limit = c.limit;
            Ok(column)
        })
        .collect()
}

fn build_issue(
    raw: &SeedIssue,
    project: &Project,
    lookup: &dyn Fn(&str, &str) -> Result<User>,
) -> Result<Issue> {
    let key = raw.key.trim().to_string();
    if board_core::key_number(&key, &project.key).is_none() {
        return Err(BoardError::Seed(format!(
            "issue key '{}' does not have the form {}-<number>",
            key, project.key
        )));
    }
    let context = |e: BoardError| BoardError::Seed(format!("issue {}: {}", key, e));

    let summary = validation::summary(&raw.summary).map_err(context)?;
    let labels: BTreeSet<String> = validation::labels(&raw.labels).map_err(context)?;
    let story_points = raw
        .story_points
        .map(validation::story_points)
        .transpose()
        .map_err(context)?;

    let assignee = raw
        .assignee
        .as_deref()
        .map(|id| lookup(id, &format!("assignee of {}", key)))
        .transpose()?;
    let reporter = lookup(&raw.reporter, &format!("reporter of {}", key))?;

    let comments = raw
        .comments
        .iter()
        .enumerate()
        .map(|(n, c)| {
            Ok(Comment {
                id: c.id.clone().unwrap_or_else(|| format!("{}-c{}", key, n + 1)),
                author: lookup(&c.author, &format!("comment on {}", key))?,
                body: validation::comment_body(&c.body).map_err(context)?,
                created_at: c.created_at,
                updated_at: c.updated_at.unwrap_or(c.created_at),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Issue {
        id: raw.id.clone().unwrap_or_else(|| key.clone()),
        key: key.clone(),
        summary,
        description: raw.description.clone(),
        issue_type: raw.issue_type,
        priority: raw.priority,
        status: raw.status,
        assignee,
        reporter,
        project: project.clone(),
        story_points,
        labels,
        comments,
        created_at: raw.created_at,
        updated_at: raw.updated_at.unwrap_or(raw.created_at),
    })
}
