pub mod issue;
pub mod onboarding;
pub mod project;
pub mod session;
pub mod show;

use crate::cli::{BoardCommands, FilterArgs, OutputFormat};
use anyhow::Result;
use board_core::{FilterOptions, IssueBoard};

pub fn dispatch(board: &dyn IssueBoard, command: &BoardCommands, format: OutputFormat) -> Result<()> {
    match command {
        BoardCommands::Show(args) => show::handle_show(board, args, format),
        BoardCommands::Issue { action } => issue::handle_issue(board, action, format),
        BoardCommands::Project => project::handle_project(board, format),
    }
}

/// Resolve a user given as ID, email or display name
///
/// Unknown identifiers are passed through so the board reports them.
pub fn resolve_user_id(board: &dyn IssueBoard, identifier: &str) -> String {
    let identifier = identifier.trim();
    board
        .users()
        .into_iter()
        .find(|u| {
            u.id == identifier
                || u.email.eq_ignore_ascii_case(identifier)
                || u.name.eq_ignore_ascii_case(identifier)
        })
        .map(|u| u.id)
        .unwrap_or_else(|| identifier.to_string())
}

impl FilterArgs {
    pub fn to_options(&self, board: &dyn IssueBoard) -> FilterOptions {
        FilterOptions {
            statuses: self.statuses.iter().copied().collect(),
            labels: self.labels.iter().map(|l| l.trim().to_string()).collect(),
            assignees: self
                .assignees
                .iter()
                .map(|a| resolve_user_id(board, a))
                .collect(),
            issue_types: self.issue_types.iter().copied().collect(),
            priorities: self.priorities.iter().copied().collect(),
            reporters: self
                .reporters
                .iter()
                .map(|r| resolve_user_id(board, r))
                .collect(),
            unassigned: self.unassigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::{IssueStatus, IssueType};
    use board_store::{MemoryBoard, Seed};

    fn demo() -> MemoryBoard {
        MemoryBoard::new(Seed::demo().unwrap())
    }

    #[test]
    fn resolves_users_by_name_email_or_id() {
        let board = demo();
        assert_eq!(resolve_user_id(&board, "sarah chen"), "u-sarah");
        assert_eq!(resolve_user_id(&board, "MIKE.RODRIGUEZ@example.com"), "u-mike");
        assert_eq!(resolve_user_id(&board, "u-emma"), "u-emma");
        assert_eq!(resolve_user_id(&board, "stranger"), "stranger");
    }

    #[test]
    fn filter_args_become_options() {
        let board = demo();
        let args = FilterArgs {
            statuses: vec![IssueStatus::ToDo, IssueStatus::ToDo],
            labels: vec![" ui ".to_string()],
            assignees: vec!["Sarah Chen".to_string()],
            unassigned: true,
            issue_types: vec![IssueType::Bug],
            ..Default::default()
        };

        let options = args.to_options(&board);

        assert_eq!(options.statuses.len(), 1);
        assert!(options.labels.contains("ui"));
        assert!(options.assignees.contains("u-sarah"));
        assert!(options.unassigned);
        assert!(options.priorities.is_empty());
    }
}
