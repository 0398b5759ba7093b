//! In-memory board implementing the IssueBoard trait
//!
//! All column state lives behind a single mutex, so every operation is one
//! atomic transition no matter how many threads share the store.

use crate::seed::Seed;
use board_core::{
    key_number, validation, BoardError, Column, Comment, CreateIssue, FieldChange, Issue,
    IssueBoard, IssueStatus, Project, Result, UpdateIssue, User,
};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Source of "now" for created/updated timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Single-owner store for one project's board
pub struct MemoryBoard {
    /// Reference data, never mutated after construction
    project: Project,
    users: Vec<User>,

    /// User recorded as reporter of new issues and author of new comments
    acting_user: User,

    /// Column order and every issue inside
    columns: Mutex<Vec<Column>>,

    clock: Clock,
}

impl MemoryBoard {
    /// Create a store from a seed, acting as the project lead
    pub fn new(seed: Seed) -> Self {
        let acting_user = seed.project.lead.clone();
        Self {
            project: seed.project,
            users: seed.users,
            acting_user,
            columns: Mutex::new(seed.columns),
            clock: Arc::new(Utc::now),
        }
    }

    /// Act as another known user
    pub fn with_acting_user(mut self, user_id: &str) -> Result<Self> {
        self.acting_user = self.find_user(user_id)?;
        Ok(self)
    }

    /// Replace the clock used for timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn acting_user(&self) -> &User {
        &self.acting_user
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Column>> {
        // Mutations never panic between steps, so a poisoned lock still holds a consistent board
        self.columns
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn find_user(&self, user_id: &str) -> Result<User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| BoardError::UserNotFound(user_id.to_string()))
    }

    /// Next free key number: one past the highest number in use
    fn next_key_number(&self, columns: &[Column]) -> Result<u64> {
        let highest = columns
            .iter()
            .flat_map(|c| c.issues.iter())
            .filter_map(|i| key_number(&i.key, &self.project.key))
            .max()
            .unwrap_or(0);
        highest.checked_add(1).ok_or_else(|| {
            BoardError::Validation(format!(
                "no issue key left after {}-{}",
                self.project.key, highest
            ))
        })
    }
}

fn column_index(columns: &[Column], status: IssueStatus) -> Result<usize> {
    columns
        .iter()
        .position(|c| c.status == status)
        .ok_or_else(|| BoardError::ColumnNotFound(status.to_string()))
}

/// Column and position of an issue anywhere on the board
fn locate(columns: &[Column], issue_id: &str) -> Result<(usize, usize)> {
    columns
        .iter()
        .enumerate()
        .find_map(|(ci, column)| {
            column
                .issues
                .iter()
                .position(|i| i.id == issue_id)
                .map(|pos| (ci, pos))
        })
        .ok_or_else(|| BoardError::IssueNotFound(issue_id.to_string()))
}

/// Move an issue to the tail of another column
///
/// Callers have already resolved both ends, so this cannot fail and the
/// board never holds the issue in zero or two columns once it returns.
fn transfer(
    columns: &mut [Column],
    (from, pos): (usize, usize),
    to: usize,
    now: DateTime<Utc>,
) -> (usize, usize) {
    let mut issue = columns[from].issues.remove(pos);
    issue.status = columns[to].status;
    issue.updated_at = now;
    info!(
        issue = %issue.key,
        from = %columns[from].status,
        to = %columns[to].status,
        "moved issue"
    );

    let destination = &mut columns[to];
    destination.issues.push(issue);
    warn_if_over_limit(destination);
    (to, destination.issues.len() - 1)
}

fn warn_if_over_limit(column: &Column) {
    if column.is_over_limit() {
        warn!(
            column = %column.id,
            issues = column.issues.len(),
            limit = column.limit.unwrap_or_default(),
            "column is over its WIP limit"
        );
    }
}

impl IssueBoard for MemoryBoard {
    fn columns(&self) -> Vec<Column> {
        let columns = self.lock();
        debug!(columns = columns.len(), "snapshot of board columns");
        columns.clone()
    }

    fn project(&self) -> Project {
        self.project.clone()
    }

    fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    fn get_issue(&self, id: &str) -> Result<Issue> {
        let columns = self.lock();
        let (ci, pos) = locate(&columns, id)?;
        Ok(columns[ci].issues[pos].clone())
    }

    fn resolve_issue_id(&self, identifier: &str) -> Result<String> {
        let identifier = identifier.trim();
        let columns = self.lock();
        columns
            .iter()
            .flat_map(|c| c.issues.iter())
            .find(|i| i.id == identifier || i.key.eq_ignore_ascii_case(identifier))
            .map(|i| i.id.clone())
            .ok_or_else(|| BoardError::IssueNotFound(identifier.to_string()))
    }

    fn create_issue(&self, issue: &CreateIssue) -> Result<Issue> {
        let summary = validation::summary(&issue.summary)?;
        let labels = validation::labels(&issue.labels)?;
        let story_points = issue
            .story_points
            .map(validation::story_points)
            .transpose()?;
        let assignee = issue
            .assignee_id
            .as_deref()
            .map(|id| self.find_user(id))
            .transpose()?;

        let mut columns = self.lock();
        let target = match issue.target_column_id.as_deref() {
            Some(id) => columns
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| BoardError::ColumnNotFound(id.to_string()))?,
            None if columns.is_empty() => {
                return Err(BoardError::ColumnNotFound("board has no columns".to_string()))
            }
            None => 0,
        };

        let number = self.next_key_number(&columns)?;
        let now = self.now();
        let created = Issue {
            id: Uuid::new_v4().to_string(),
            key: format!("{}-{}", self.project.key, number),
            summary,
            description: issue.description.clone(),
            issue_type: issue.issue_type,
            priority: issue.priority,
            status: columns[target].status,
            assignee,
            reporter: self.acting_user.clone(),
            project: self.project.clone(),
            story_points,
            labels,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        info!(issue = %created.key, column = %columns[target].id, "created issue");
        columns[target].issues.push(created.clone());
        warn_if_over_limit(&columns[target]);
        Ok(created)
    }

    fn move_issue(&self, issue_id: &str, from: IssueStatus, to: IssueStatus) -> Result<()> {
        let mut columns = self.lock();
        let source = column_index(&columns, from)?;
        let pos = columns[source]
            .issues
            .iter()
            .position(|i| i.id == issue_id)
            .ok_or_else(|| BoardError::IssueNotFound(issue_id.to_string()))?;

        if from == to {
            debug!(issue = %issue_id, status = %from, "move within the same column ignored");
            return Ok(());
        }

        let destination = column_index(&columns, to)?;
        transfer(&mut columns, (source, pos), destination, self.now());
        Ok(())
    }

    fn update_issue(&self, issue_id: &str, update: &UpdateIssue) -> Result<Issue> {
        // Check everything up front so a bad patch never half-applies
        let summary = update
            .summary
            .as_deref()
            .map(validation::summary)
            .transpose()?;
        let labels = update
            .labels
            .as_deref()
            .map(validation::labels)
            .transpose()?;
        let story_points = match &update.story_points {
            Some(FieldChange::Set(points)) => Some(Some(validation::story_points(*points)?)),
            Some(FieldChange::Clear) => Some(None),
            None => None,
        };
        let assignee = match &update.assignee {
            Some(FieldChange::Set(user_id)) => Some(Some(self.find_user(user_id)?)),
            Some(FieldChange::Clear) => Some(None),
            None => None,
        };

        let mut columns = self.lock();
        let mut at = locate(&columns, issue_id)?;
        let now = self.now();

        if let Some(status) = update.status {
            if status != columns[at.0].status {
                let destination = column_index(&columns, status)?;
                at = transfer(&mut columns, at, destination, now);
            }
        }

        let (ci, pos) = at;
        let issue = &mut columns[ci].issues[pos];
        if let Some(summary) = summary {
            issue.summary = summary;
        }
        if let Some(description) = &update.description {
            issue.description = description.clone();
        }
        if let Some(issue_type) = update.issue_type {
            issue.issue_type = issue_type;
        }
        if let Some(priority) = update.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = assignee {
            issue.assignee = assignee;
        }
        if let Some(story_points) = story_points {
            issue.story_points = story_points;
        }
        if let Some(labels) = labels {
            issue.labels = labels;
        }
        issue.updated_at = now;

        info!(issue = %issue.key, "updated issue");
        Ok(issue.clone())
    }

    fn add_comment(&self, issue_id: &str, body: &str) -> Result<Comment> {
        let body = validation::comment_body(body)?;

        let mut columns = self.lock();
        let (ci, pos) = locate(&columns, issue_id)?;
        let now = self.now();
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            author: self.acting_user.clone(),
            body,
            created_at: now,
            updated_at: now,
        };

        let issue = &mut columns[ci].issues[pos];
        issue.comments.push(comment.clone());
        issue.updated_at = now;
        info!(issue = %issue.key, author = %comment.author.id, "added comment");
        Ok(comment)
    }
}
