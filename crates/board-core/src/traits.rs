use crate::error::Result;
use crate::models::*;

/// The single mutation surface of a kanban board
///
/// Implementations own the columns and the issues inside them. Each
/// mutating call is one atomic transition: readers never observe an issue
/// in zero or two columns, and a failed call leaves the board unchanged.
pub trait IssueBoard: Send + Sync {
    // ========== Reads ==========

    /// Snapshot of all columns, in board order
    fn columns(&self) -> Vec<Column>;

    /// The project that owns the board's issues
    fn project(&self) -> Project;

    /// Users known to the board (assignable, reporters, comment authors)
    fn users(&self) -> Vec<User>;

    /// Get an issue by its internal ID
    fn get_issue(&self, id: &str) -> Result<Issue>;

    /// Resolve an issue identifier (internal ID or key like "PROJ-12") to its internal ID
    fn resolve_issue_id(&self, identifier: &str) -> Result<String>;

    // ========== Issue Operations ==========

    /// Create a new issue at the tail of its target column
    fn create_issue(&self, issue: &CreateIssue) -> Result<Issue>;

    /// Move an issue from the `from` column to the tail of the `to` column
    ///
    /// Moving within the same column is a no-op.
    fn move_issue(&self, issue_id: &str, from: IssueStatus, to: IssueStatus) -> Result<()>;

    /// Merge a patch into an issue
    ///
    /// A status change goes through the same column transfer as `move_issue`.
    fn update_issue(&self, issue_id: &str, update: &UpdateIssue) -> Result<Issue>;

    // ========== Comment Operations ==========

    /// Append a comment to an issue
    fn add_comment(&self, issue_id: &str, body: &str) -> Result<Comment>;
}
